//! Runtime configuration for a single fetch.

use std::time::Duration;

use clap::ValueEnum;

use crate::http::request::FetchRequest;

/// The URL fetched when none is given on the command line.
pub const DEFAULT_URL: &str = "https://emergency-phone-numbers.herokuapp.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub url: String,
    /// `None` waits for the response indefinitely.
    pub timeout: Option<Duration>,
    pub format: OutputFormat,
}

impl FetchConfig {
    pub fn request(&self) -> FetchRequest {
        let request = FetchRequest::new(&self.url);
        match self.timeout {
            Some(timeout) => request.with_timeout(timeout),
            None => request,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: None,
            format: OutputFormat::default(),
        }
    }
}

/// How the outcome of a fetch is printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON of the decoded object.
    #[default]
    Pretty,
    /// The decoded object on a single line.
    Compact,
    /// A one-line `{"ok": ..}` envelope for machine consumers.
    Json,
}

//! Command-line surface: one optional URL plus output and timeout flags.

use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_URL, FetchConfig, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "getjson",
    version,
    about = "Fetch a URL and print its JSON object body",
    after_help = "Diagnostics go to stderr; set RUST_LOG=debug for request details."
)]
pub struct Cli {
    /// URL to GET.
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// Give up after this many milliseconds (0 or unset waits forever).
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// How to print the result.
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn into_config(self) -> FetchConfig {
        FetchConfig {
            url: self.url.trim().to_string(),
            timeout: self
                .timeout_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            format: self.format,
        }
    }
}

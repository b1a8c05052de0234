//! The fetch-decode flow and its completion handshake.
//!
//! `start` spawns the flow on the current tokio runtime and hands the outcome
//! to a callback exactly once. The caller gets back a [`Completion`] and parks
//! on it; nothing else about the flow is observable.

use reqwest::Client;
use serde_json::{Map, Value};
use tokio::sync::oneshot;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::client::{build_client, fetch};
use crate::http::request::FetchRequest;
use crate::json::decode_object;

pub type Outcome = Result<Map<String, Value>, FetchError>;

/// Fetch `request` and decode the body as a JSON object.
pub async fn run(client: &Client, request: &FetchRequest) -> Outcome {
    let response = fetch(client, request).await?;
    tracing::debug!(
        status = response.status,
        content_type = response.content_type.as_deref().unwrap_or("-"),
        duration_ms = response.duration_ms,
        size_bytes = response.size_bytes,
        "response received"
    );

    if !response.is_success() {
        tracing::warn!(
            status = response.status,
            status_text = %response.status_text,
            "non-success status, decoding body anyway"
        );
    }

    decode_object(&response.body)
}

/// Resolves once the completion callback of a started flow has returned.
#[derive(Debug)]
pub struct Completion {
    done: oneshot::Receiver<()>,
}

impl Completion {
    /// Park until the flow has finished.
    ///
    /// Also returns if the flow task died without signalling, so the caller
    /// never waits on a task that no longer exists.
    pub async fn wait(self) {
        if self.done.await.is_err() {
            tracing::error!("fetch task ended without completing");
        }
    }
}

/// Spawn the flow and return immediately.
///
/// `on_complete` runs exactly once, on the spawned task, with the outcome.
pub fn start<F>(client: Client, request: FetchRequest, on_complete: F) -> Completion
where
    F: FnOnce(Outcome) + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = run(&client, &request).await;
        if let Err(err) = &outcome {
            let kind = if err.is_transport() { "transport" } else { "decode" };
            tracing::debug!(kind, error = %err, "fetch failed");
        }
        on_complete(outcome);
        let _ = done_tx.send(());
    });

    Completion { done: done_rx }
}

/// Like [`start`], building the client from `config`.
///
/// A client that cannot be built is reported through `on_complete` like any
/// other transport failure.
pub fn start_with_config<F>(config: &FetchConfig, on_complete: F) -> Completion
where
    F: FnOnce(Outcome) + Send + 'static,
{
    let request = config.request();
    match build_client(&request) {
        Ok(client) => start(client, request, on_complete),
        Err(err) => {
            let (done_tx, done_rx) = oneshot::channel();
            tokio::spawn(async move {
                on_complete(Err(err));
                let _ = done_tx.send(());
            });
            Completion { done: done_rx }
        }
    }
}

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Instant;

use crate::error::FetchError;

use super::request::FetchRequest;
use super::response::HttpResponse;

pub fn build_client(request: &FetchRequest) -> Result<Client, FetchError> {
    let mut builder = Client::builder();

    if let Some(timeout) = request.timeout {
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
    }

    builder.build().map_err(FetchError::Transport)
}

/// Issue the GET and read the whole body.
///
/// The status code is not inspected: an error status with a body is returned
/// like any other response.
pub async fn fetch(client: &Client, request: &FetchRequest) -> Result<HttpResponse, FetchError> {
    tracing::debug!(url = %request.url, "sending request");

    let started = Instant::now();
    let response = client
        .get(&request.url)
        .send()
        .await
        .map_err(FetchError::Transport)?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await.map_err(FetchError::Read)?;
    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        content_type,
        duration_ms: elapsed,
        size_bytes: bytes.len(),
        body: bytes.to_vec(),
    })
}

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::OutputFormat;
use crate::flow::Outcome;

/// Prefix of every printed failure in the text formats.
pub const ERROR_PREFIX: &str = "Error ";

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Turn the outcome of one fetch into the single message that gets printed.
pub fn render(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => render_text(outcome, serde_json::to_string_pretty),
        OutputFormat::Compact => render_text(outcome, serde_json::to_string),
        OutputFormat::Json => render_envelope(outcome),
    }
}

/// Write the rendered outcome as one line to `out`.
///
/// A failed write (e.g. a closed stdout pipe) is logged, never raised.
pub fn emit<W: Write>(out: &mut W, outcome: &Outcome, format: OutputFormat) {
    let line = render(outcome, format);
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!(error = %err, "failed to write output");
    }
}

fn render_text(
    outcome: &Outcome,
    encode: fn(&Map<String, Value>) -> serde_json::Result<String>,
) -> String {
    match outcome {
        Ok(map) => encode(map).unwrap_or_else(|err| error_line(&err)),
        Err(err) => error_line(err),
    }
}

fn render_envelope(outcome: &Outcome) -> String {
    let envelope = match outcome {
        Ok(map) => Envelope {
            ok: true,
            value: Some(map),
            error: None,
        },
        Err(err) => Envelope {
            ok: false,
            value: None,
            error: Some(err.to_string()),
        },
    };
    serde_json::to_string(&envelope).unwrap_or_else(|err| error_line(&err))
}

fn error_line(err: &dyn std::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{err}")
}

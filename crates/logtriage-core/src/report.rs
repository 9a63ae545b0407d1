use crate::errors::CoreError;
use crate::models::FileOutcome;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::{Stderr, Stdout, Write};
use std::path::Path;

/// Parse a raw response body as JSON. Object keys come back sorted.
/// Bytes that are not valid UTF-8 are a parse error, never rewritten.
pub fn parse_response(body: &[u8]) -> Result<Value, CoreError> {
    serde_json::from_slice(body).map_err(|e| CoreError::Parse(e.to_string()))
}

/// Render a parsed response with 4-space indentation.
pub fn render_pretty(value: &Value) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CoreError::Parse(format!("rendering response: {e}")))?;
    String::from_utf8(buf).map_err(|e| CoreError::Parse(format!("rendering response: {e}")))
}

/// Writes per-file results to `out` and failures/diagnostics to `err`.
///
/// Write errors on either stream are ignored; a closed pipe must not stop the batch.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    verbose: bool,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio(verbose: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), verbose)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, verbose: bool) -> Self {
        Self { out, err, verbose }
    }

    /// Parse and print one response body. Parse failures are reported, not returned.
    pub fn report_response(&mut self, path: &Path, body: &[u8]) -> FileOutcome {
        let rendered = parse_response(body).and_then(|value| render_pretty(&value));
        match rendered {
            Ok(pretty) => {
                let _ = writeln!(self.out, "Analysis for file: {}", path.display());
                let _ = writeln!(self.out, "Response: {pretty}");
                FileOutcome::Reported {
                    path: path.to_path_buf(),
                }
            }
            Err(e) => {
                let _ = writeln!(
                    self.err,
                    "Error parsing API response for {}: {e}",
                    path.display()
                );
                FileOutcome::ParseFailed {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Print a read or transport failure for one file.
    pub fn report_failure(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::ReadFailed { path, error } => {
                let _ = writeln!(self.err, "Could not read {}: {error}", path.display());
            }
            FileOutcome::TransportFailed { path, error } => {
                let _ = writeln!(self.err, "Request failed for {}: {error}", path.display());
            }
            FileOutcome::ParseFailed { path, error } => {
                let _ = writeln!(
                    self.err,
                    "Error parsing API response for {}: {error}",
                    path.display()
                );
            }
            FileOutcome::Reported { .. } | FileOutcome::Skipped { .. } => {}
        }
    }

    /// Dry-run line: what would have been sent.
    pub fn report_skipped(&mut self, path: &Path, payload_bytes: usize) {
        let _ = writeln!(
            self.out,
            "Would analyze: {} ({payload_bytes} byte payload)",
            path.display()
        );
    }

    pub fn warn(&mut self, message: &str) {
        let _ = writeln!(self.err, "warning: {message}");
    }

    pub fn verbose(&mut self, message: &str) {
        if self.verbose {
            let _ = writeln!(self.err, "[verbose] {message}");
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

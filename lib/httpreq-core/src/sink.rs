//! Diagnostic sink.
//!
//! A [`RequestBuilder`](crate::RequestBuilder) reports request bodies, execution
//! traces and deferred errors to a [`DiagnosticSink`] it is given, instead of
//! writing to a global logger. [`TracingSink`] (the default) forwards to
//! `tracing` at verbose levels; [`NoopSink`] drops everything.

use std::fmt::Write;
use std::time::Duration;

use tracing::{Level, debug, trace};
use url::Url;

use crate::Error;

/// Summary of one executed request.
#[derive(Debug, Clone, Copy)]
pub struct RequestTrace<'a> {
    /// Verb as configured.
    pub verb: &'a str,
    /// Final URL.
    pub url: &'a Url,
    /// Whether the handler ran to completion.
    pub completed: bool,
    /// Time spent since execution started.
    pub elapsed: Duration,
}

/// Receiver of diagnostic output. Not required for correctness.
pub trait DiagnosticSink: Send + Sync {
    /// Request body content resolved while configuring a request.
    fn body(&self, prefix: &str, body: &[u8]);

    /// A request finished (handler called or not).
    fn trace(&self, trace: &RequestTrace<'_>);

    /// Execution was refused because of a deferred configuration error.
    fn error(&self, error: &Error);
}

/// Sink forwarding to `tracing`.
///
/// Bodies and traces are emitted at `TRACE`, deferred errors at `DEBUG`.
/// Nothing is formatted when the level is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn body(&self, prefix: &str, body: &[u8]) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        match printable(body) {
            Some(text) => trace!("{prefix}: {text}"),
            None => trace!("{prefix}:\n{}", hex_dump(body)),
        }
    }

    fn trace(&self, trace: &RequestTrace<'_>) {
        // Saturating conversion to u64 (truncates after ~584 million years)
        let elapsed_ms = u64::try_from(trace.elapsed.as_millis()).unwrap_or(u64::MAX);
        trace!(
            verb = %trace.verb,
            url = %trace.url,
            completed = trace.completed,
            elapsed_ms,
            "request finished"
        );
    }

    fn error(&self, error: &Error) {
        debug!(error = %error, "error in request");
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn body(&self, _prefix: &str, _body: &[u8]) {}

    fn trace(&self, _trace: &RequestTrace<'_>) {}

    fn error(&self, _error: &Error) {}
}

/// Body as text, unless it is not UTF-8 or holds bytes below `\n`.
fn printable(body: &[u8]) -> Option<&str> {
    if body.iter().any(|&b| b < 0x0a) {
        return None;
    }
    std::str::from_utf8(body).ok()
}

/// Canonical hex dump: offset, 16 bytes in two groups of 8, ASCII column.
pub(crate) fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(16).enumerate() {
        let encoded = hex::encode(chunk);
        let _ = write!(out, "{:08x}  ", row * 16);

        for i in 0..16 {
            match encoded.get(i * 2..i * 2 + 2) {
                Some(pair) => {
                    out.push_str(pair);
                    out.push(' ');
                }
                None => out.push_str("   "),
            }
            if i == 7 || i == 15 {
                out.push(' ');
            }
        }

        out.push('|');
        out.extend(chunk.iter().map(|&b| {
            if (0x20..=0x7e).contains(&b) {
                char::from(b)
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_text() {
        assert_eq!(printable(br#"{"name":"test"}"#), Some(r#"{"name":"test"}"#));
        assert_eq!(printable(b"line\nbreak"), Some("line\nbreak"));
        assert_eq!(printable(b"nul\x00byte"), None);
        assert_eq!(printable(&[0xff, 0xfe, 0x41]), None);
    }

    #[test]
    fn hex_dump_full_row() {
        assert_eq!(
            hex_dump(b"0123456789abcdef"),
            "00000000  30 31 32 33 34 35 36 37  38 39 61 62 63 64 65 66  |0123456789abcdef|\n"
        );
    }

    #[test]
    fn hex_dump_partial_row() {
        let dump = hex_dump(b"0123456789abcdef\x00\x01hi");
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].len(), lines[0].len() - 12);
        assert!(lines[1].starts_with("00000010  00 01 68 69 "));
        assert!(lines[1].ends_with("|..hi|"));
    }

    #[test]
    fn hex_dump_empty() {
        assert_eq!(hex_dump(b""), "");
    }

    #[test]
    fn tracing_sink_without_subscriber() {
        let url = Url::parse("https://example.test/").expect("url");
        let sink = TracingSink;
        sink.body("Request Body", b"\x00\x01");
        sink.trace(&RequestTrace {
            verb: "GET",
            url: &url,
            completed: true,
            elapsed: Duration::from_millis(3),
        });
        sink.error(&Error::Timeout);
    }
}

//! Error message extraction from stderr

use crate::output::LineBuffer;
use regex::Regex;
use std::sync::LazyLock;

/// `Error:` at the start of a line, case-insensitive; the message may be
/// empty, in which case it is on the following line
#[allow(clippy::expect_used)]
static ERROR_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*error:[ \t]*(.*)$").expect("error marker pattern is valid")
});

/// Scans stderr chunks for the tool's error message
///
/// Chunks are split into whole lines first, so a message cut by a pipe read
/// is matched once both halves have arrived. Only the most recent match is
/// retained; each new match overwrites the previous one. One extractor
/// belongs to exactly one invocation.
#[derive(Debug, Default)]
pub struct ErrorExtractor {
    lines: LineBuffer,
    // Last complete line was a bare marker
    awaiting_message: bool,
    message: Option<String>,
}

impl ErrorExtractor {
    /// Create an extractor with no captured message
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one chunk of stderr text
    ///
    /// Never fails; a chunk without a marker leaves the captured message
    /// unchanged. An unterminated tail is held until the next chunk or
    /// [`ErrorExtractor::into_message`].
    pub fn scan(&mut self, chunk: &str) {
        for line in self.lines.push(chunk) {
            self.scan_line(&line);
        }
    }

    fn scan_line(&mut self, line: &str) {
        let found = if std::mem::take(&mut self.awaiting_message) {
            Some(line.trim_end())
        } else if let Some(captures) = ERROR_MARKER.captures(line) {
            let message = captures.get(1).map_or("", |m| m.as_str().trim_end());
            self.awaiting_message = message.is_empty();
            Some(message)
        } else {
            None
        };

        if let Some(message) = found.filter(|message| !message.is_empty()) {
            tracing::trace!(error = message, "captured error message from stderr");
            self.message = Some(message.to_string());
        }
    }

    /// The most recently captured message from complete lines
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consume the extractor, returning the captured message
    ///
    /// The unterminated tail, if any, is scanned first.
    pub fn into_message(mut self) -> Option<String> {
        if let Some(rest) = self.lines.take_remainder() {
            self.scan_line(&rest);
        }
        self.message
    }
}

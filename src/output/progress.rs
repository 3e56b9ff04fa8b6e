//! Parsers for single-marker progress lines (`- name`, `U name`, `+ name`)

use super::{LineBuffer, OutputParser};
use crate::types::FileProgress;
use crate::utils::to_host_separators;

/// Emits a [`FileProgress`] for every line of the form `<marker> <name>`
///
/// Lines with any other shape are ignored. The name has its separators
/// rewritten to the host convention.
#[derive(Debug)]
pub struct ProgressParser {
    marker: char,
    lines: LineBuffer,
}

impl ProgressParser {
    /// Parser keyed on an arbitrary marker character
    pub fn with_marker(marker: char) -> Self {
        Self {
            marker,
            lines: LineBuffer::new(),
        }
    }

    /// Progress of `e` and `x`
    pub fn extraction() -> Self {
        Self::with_marker('-')
    }

    /// Progress of `u`
    pub fn update() -> Self {
        Self::with_marker('U')
    }

    /// Progress of `rn`, which 7-Zip reports like an update
    pub fn rename() -> Self {
        Self::with_marker('U')
    }

    /// Progress of `a`
    pub fn addition() -> Self {
        Self::with_marker('+')
    }

    /// Marker character this parser is keyed on
    pub fn marker(&self) -> char {
        self.marker
    }

    fn parse_line(&self, line: &str) -> Option<FileProgress> {
        let name = line.strip_prefix(self.marker)?.strip_prefix(' ')?;
        if name.is_empty() {
            return None;
        }
        Some(FileProgress {
            name: to_host_separators(name),
        })
    }
}

impl OutputParser for ProgressParser {
    type Event = FileProgress;

    fn parse_chunk(&mut self, chunk: &str) -> Vec<FileProgress> {
        self.lines
            .push(chunk)
            .iter()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    fn finish(&mut self) -> Vec<FileProgress> {
        self.lines
            .take_remainder()
            .and_then(|line| self.parse_line(&line))
            .into_iter()
            .collect()
    }
}

/// Parser for operations that report no per-file progress (`d`)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl OutputParser for NoProgress {
    type Event = FileProgress;

    fn parse_chunk(&mut self, _chunk: &str) -> Vec<FileProgress> {
        Vec::new()
    }

    fn finish(&mut self) -> Vec<FileProgress> {
        Vec::new()
    }
}

//! Parser for `l` (list) output

use super::{LineBuffer, OutputParser};
use crate::types::{ArchiveSpec, Entry};
use crate::utils::to_host_separators;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `YYYY-MM-DD HH:MM:SS <attr> <size> [<compressed>] <name>`
#[allow(clippy::expect_used)]
static ENTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) ([.D][.R][.H][.S][.A]) +(\d+) +(\d+)? +(.+)$",
    )
    .expect("entry line pattern is valid")
});

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PATH_PREFIX: &str = "Path = ";
const TYPE_PREFIX: &str = "Type = ";
const METHOD_PREFIX: &str = "Method = ";
const PHYSICAL_SIZE_PREFIX: &str = "Physical Size = ";
const HEADERS_SIZE_PREFIX: &str = "Headers Size = ";

enum ListingLine {
    Metadata,
    Entry(Entry),
    Unmatched,
}

/// Turns listing output into [`Entry`] events and an [`ArchiveSpec`]
///
/// Metadata lines (`Path = `, `Type = `, `Method = `, `Physical Size = `,
/// `Headers Size = `) update the accumulated spec; entry lines become events.
/// Complete lines matching neither are dropped, and so is an unparsable
/// unterminated tail left over when the stream ends.
#[derive(Debug, Default)]
pub struct ListingParser {
    lines: LineBuffer,
    spec: ArchiveSpec,
}

impl ListingParser {
    /// Create a parser for one listing run
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata accumulated so far
    pub fn spec(&self) -> &ArchiveSpec {
        &self.spec
    }

    /// Consume the parser, returning the accumulated metadata
    pub fn into_spec(self) -> ArchiveSpec {
        self.spec
    }

    fn parse_line(&mut self, line: &str) -> ListingLine {
        if let Some(path) = line.strip_prefix(PATH_PREFIX) {
            self.spec.path = Some(path.to_string());
        } else if let Some(kind) = line.strip_prefix(TYPE_PREFIX) {
            self.spec.archive_type = Some(kind.to_string());
        } else if let Some(method) = line.strip_prefix(METHOD_PREFIX) {
            self.spec.method = Some(method.to_string());
        } else if let Some(size) = line.strip_prefix(PHYSICAL_SIZE_PREFIX) {
            self.spec.physical_size = parse_size(size);
        } else if let Some(size) = line.strip_prefix(HEADERS_SIZE_PREFIX) {
            self.spec.headers_size = parse_size(size);
        } else {
            return match parse_entry(line) {
                Some(entry) => ListingLine::Entry(entry),
                None => ListingLine::Unmatched,
            };
        }
        ListingLine::Metadata
    }
}

impl OutputParser for ListingParser {
    type Event = Entry;

    fn parse_chunk(&mut self, chunk: &str) -> Vec<Entry> {
        let mut entries = Vec::new();
        for line in self.lines.push(chunk) {
            match self.parse_line(&line) {
                ListingLine::Entry(entry) => entries.push(entry),
                ListingLine::Metadata => {}
                ListingLine::Unmatched => trace!(line, "skipping unrecognized listing line"),
            }
        }
        entries
    }

    fn finish(&mut self) -> Vec<Entry> {
        let Some(line) = self.lines.take_remainder() else {
            return Vec::new();
        };
        match self.parse_line(&line) {
            ListingLine::Entry(entry) => vec![entry],
            ListingLine::Metadata | ListingLine::Unmatched => Vec::new(),
        }
    }
}

fn parse_size(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

fn parse_entry(line: &str) -> Option<Entry> {
    let captures = ENTRY_LINE.captures(line)?;
    let date = NaiveDateTime::parse_from_str(captures.get(1)?.as_str(), DATE_FORMAT).ok()?;
    Some(Entry {
        date,
        attributes: captures.get(2)?.as_str().to_string(),
        size: captures.get(3)?.as_str().parse().ok()?,
        compressed: captures.get(4).and_then(|m| m.as_str().parse().ok()),
        name: to_host_separators(captures.get(5)?.as_str()),
    })
}

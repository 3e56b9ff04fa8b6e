//! Core types for sevenz-cmd

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Operation code placed first in every argument vector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    /// Add files to an archive (`a`)
    Add,
    /// Delete files from an archive (`d`)
    Delete,
    /// Extract without directory structure (`e`)
    Extract,
    /// Extract with full paths (`x`)
    ExtractFull,
    /// List archive contents (`l`)
    List,
    /// Rename files inside an archive (`rn`)
    Rename,
    /// Update files in an archive (`u`)
    Update,
}

impl Verb {
    /// The token understood by the 7-Zip command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Add => "a",
            Verb::Delete => "d",
            Verb::Extract => "e",
            Verb::ExtractFull => "x",
            Verb::List => "l",
            Verb::Rename => "rn",
            Verb::Update => "u",
        }
    }

    /// Human-readable operation name used in log messages
    pub fn operation_name(&self) -> &'static str {
        match self {
            Verb::Add => "AddArchive",
            Verb::Delete => "DeleteArchive",
            Verb::Extract => "ExtractArchive",
            Verb::ExtractFull => "FullArchive",
            Verb::List => "ListArchive",
            Verb::Rename => "RenameArchive",
            Verb::Update => "UpdateArchive",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Verb::Add),
            "d" => Ok(Verb::Delete),
            "e" => Ok(Verb::Extract),
            "x" => Ok(Verb::ExtractFull),
            "l" => Ok(Verb::List),
            "rn" => Ok(Verb::Rename),
            "u" => Ok(Verb::Update),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown verb: {}",
                other
            ))),
        }
    }
}

/// One file or directory record from a listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Modification time as printed by the tool (local calendar, no zone)
    pub date: NaiveDateTime,
    /// Five-character attribute code, e.g. `D....` or `....A`
    pub attributes: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Compressed size in bytes, when the tool printed one
    pub compressed: Option<u64>,
    /// Entry name with host path separators
    pub name: String,
}

impl Entry {
    /// Whether the attribute code marks a directory
    pub fn is_dir(&self) -> bool {
        self.attributes.starts_with('D')
    }
}

/// Archive metadata accumulated while listing
///
/// Fields stay `None` until the matching `Name = value` line is seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSpec {
    /// `Path = `
    pub path: Option<String>,
    /// `Type = `
    #[serde(rename = "type")]
    pub archive_type: Option<String>,
    /// `Method = `
    pub method: Option<String>,
    /// `Physical Size = `
    pub physical_size: Option<u64>,
    /// `Headers Size = `
    pub headers_size: Option<u64>,
}

/// A file reported by an extract, add, update or rename run
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileProgress {
    /// File name with host path separators
    pub name: String,
}

/// Any progress event produced while a command runs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A listing entry
    Entry(Entry),
    /// A processed file
    Path(FileProgress),
}

impl From<Entry> for ProgressEvent {
    fn from(entry: Entry) -> Self {
        ProgressEvent::Entry(entry)
    }
}

impl From<FileProgress> for ProgressEvent {
    fn from(progress: FileProgress) -> Self {
        ProgressEvent::Path(progress)
    }
}

/// Successful settlement of one invocation
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Binary name the successful attempt ran against
    pub binary: String,
    /// Exit code (always 0)
    pub exit_code: i32,
    /// The argument vector handed to the process
    pub arguments: Vec<String>,
}

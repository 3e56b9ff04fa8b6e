//! # sevenz-cmd
//!
//! Async driver for the 7-Zip command line tools.
//!
//! ## Design Philosophy
//!
//! sevenz-cmd is designed to be:
//! - **Streaming** - Progress is parsed from stdout while the tool runs
//! - **Resilient** - A failed `7z` invocation is retried once with `7za`
//! - **Library-first** - No CLI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use sevenz_cmd::{Config, SevenZip, SwitchSet};
//! use sevenz_cmd::types::FileProgress;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sevenzip = SevenZip::new(Config::default())?;
//!
//!     // Stream progress through a channel
//!     let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<FileProgress>();
//!     tokio::spawn(async move {
//!         while let Some(file) = rx.recv().await {
//!             println!("extracted: {}", file.name);
//!         }
//!     });
//!
//!     let outcome = sevenzip
//!         .extract_full(Path::new("archive.7z"), Path::new("out"), &SwitchSet::new(), &mut tx)
//!         .await?;
//!     println!("{} {:?}", outcome.binary, outcome.arguments);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Command strings and argument vector assembly
pub mod command;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Stdout parsers and progress sinks
pub mod output;
/// External process execution
pub mod process;
/// Fallback to the secondary binary
pub mod retry;
/// The high-level archive client
pub mod sevenzip;
/// Switch sets and their rendering
pub mod switches;
/// Core types
pub mod types;
/// Path helpers
pub mod utils;

pub use command::{ArgumentAssembler, Command};
pub use config::{Config, ToolsConfig};
pub use error::{Error, Result};
pub use sevenzip::SevenZip;
pub use switches::{SwitchSet, SwitchValue};
pub use types::{ArchiveSpec, Entry, FileProgress, ProcessOutcome, ProgressEvent, Verb};

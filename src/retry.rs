//! Fallback to a secondary binary
//!
//! Some installations ship only `7za` (or only `7z`). Every operation is
//! therefore attempted against the primary binary first and, when that
//! attempt fails, issued once more with identical arguments against the
//! fallback binary. The second outcome is final.
//!
//! # Example
//!
//! ```no_run
//! use sevenz_cmd::config::ToolsConfig;
//! use sevenz_cmd::output::ProgressParser;
//! use sevenz_cmd::retry::FallbackInvoker;
//! use sevenz_cmd::types::FileProgress;
//!
//! # async fn example() -> sevenz_cmd::Result<()> {
//! let invoker = FallbackInvoker::new(&ToolsConfig::default());
//! let args = vec!["x".to_string(), "archive.7z".to_string(), "-bb2".to_string()];
//!
//! let mut extracted = Vec::new();
//! let (outcome, _parser) = invoker
//!     .invoke("FullArchive", &args, ProgressParser::extraction, &mut |event: FileProgress| {
//!         extracted.push(event)
//!     })
//!     .await?;
//! println!("{} extracted {} files", outcome.binary, extracted.len());
//! # Ok(())
//! # }
//! ```

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use crate::output::{OutputParser, ProgressSink};
use crate::process::{BinaryLocator, ProcessRunner};
use crate::types::ProcessOutcome;

/// Trait for errors that can be classified as worth a fallback attempt
///
/// Failures of the external process (missing binary, non-zero exit, broken
/// pipes) should return `true`. Problems with the caller's input should
/// return `false`, since the fallback binary would reject them too.
pub trait ShouldFallBack {
    /// Returns true if the operation should be re-issued against the fallback binary
    fn should_fall_back(&self) -> bool;
}

impl ShouldFallBack for Error {
    fn should_fall_back(&self) -> bool {
        match self {
            // Rejected before spawning, identical for any binary
            Error::InvalidArgument(_) => false,
            // Binary missing or not executable
            Error::SpawnFailure { .. } => true,
            // Non-zero exit, with or without a message
            Error::ToolFailure { .. } => true,
            // Pipe failures while the process ran
            Error::Io(_) => true,
        }
    }
}

/// Runs an argument vector against the primary binary, then the fallback
///
/// Each attempt gets a fresh parser from the caller's factory, so no parse
/// state leaks from the primary attempt into the fallback attempt. While a
/// fallback is configured the primary attempt's events are held back until
/// it exits: they reach the sink only if it succeeded. The caller therefore
/// never sees events of an attempt that was superseded.
#[derive(Clone, Debug)]
pub struct FallbackInvoker {
    locator: BinaryLocator,
    primary: String,
    fallback: Option<String>,
}

impl FallbackInvoker {
    /// Create an invoker from tool settings
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            locator: BinaryLocator::new(tools),
            primary: tools.binary.clone(),
            fallback: tools.fallback_binary.clone(),
        }
    }

    /// Primary binary name
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Fallback binary name, if the fallback attempt is enabled
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Run `args`, retrying once with the fallback binary on failure
    ///
    /// Events of the final attempt are forwarded to `sink` as their lines
    /// arrive. With a fallback configured, the primary attempt's events are
    /// buffered and delivered once it succeeds, or dropped when it fails. On
    /// success the outcome is returned together with the parser of the
    /// successful attempt, so callers can read any state it accumulated.
    ///
    /// `operation` only names the operation in log messages.
    pub async fn invoke<P, F, S>(
        &self,
        operation: &str,
        args: &[String],
        make_parser: F,
        sink: &mut S,
    ) -> Result<(ProcessOutcome, P)>
    where
        P: OutputParser,
        F: Fn() -> P,
        S: ProgressSink<P::Event>,
    {
        let first = match self.fallback {
            Some(_) => {
                let mut buffered: Vec<P::Event> = Vec::new();
                let result = self
                    .attempt(&self.primary, args, &make_parser, &mut |event: P::Event| {
                        buffered.push(event)
                    })
                    .await;
                if result.is_ok() {
                    for event in buffered {
                        sink.emit(event);
                    }
                }
                result
            }
            None => self.attempt(&self.primary, args, &make_parser, sink).await,
        };

        match (first, self.fallback.as_deref()) {
            (Ok(done), _) => Ok(done),
            (Err(e), Some(fallback)) if e.should_fall_back() => {
                tracing::warn!(
                    error = %e,
                    operation,
                    "{} failed using `{}`, retrying with `{}`",
                    operation,
                    self.primary,
                    fallback
                );

                match self.attempt(fallback, args, &make_parser, sink).await {
                    Ok(done) => {
                        tracing::info!(
                            operation,
                            binary = fallback,
                            "operation succeeded with fallback binary"
                        );
                        Ok(done)
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            operation,
                            binary = fallback,
                            "operation failed with fallback binary"
                        );
                        Err(e)
                    }
                }
            }
            (Err(e), _) => {
                tracing::error!(
                    error = %e,
                    operation,
                    binary = %self.primary,
                    "operation failed"
                );
                Err(e)
            }
        }
    }

    async fn attempt<P, F, S>(
        &self,
        binary: &str,
        args: &[String],
        make_parser: &F,
        sink: &mut S,
    ) -> Result<(ProcessOutcome, P)>
    where
        P: OutputParser,
        F: Fn() -> P,
        S: ProgressSink<P::Event>,
    {
        let program = self.locator.resolve(binary)?;
        let runner = ProcessRunner::new(binary, program);
        let mut parser = make_parser();

        let outcome = runner
            .run(args, |chunk| {
                for event in parser.parse_chunk(chunk) {
                    sink.emit(event);
                }
            })
            .await?;

        for event in parser.finish() {
            sink.emit(event);
        }
        Ok((outcome, parser))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::output::{ListingParser, ProgressParser};
    use crate::types::{Entry, FileProgress};
    use serial_test::serial;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const MISSING: &str = "/nonexistent/path/to/7z";

    fn tools(binary: &str, fallback: Option<&str>) -> ToolsConfig {
        ToolsConfig {
            binary: binary.to_string(),
            fallback_binary: fallback.map(str::to_string),
            binary_dir: None,
            search_path: true,
        }
    }

    fn shell(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    /// Fails on the first run, succeeds on every later one
    fn fail_once_script(marker: &Path) -> String {
        format!(
            "if [ -e '{0}' ]; then printf -- '- second.txt\\n'; else touch '{0}'; \
             printf -- '- first.txt\\n'; echo 'Error: first attempt' >&2; exit 2; fi",
            marker.display()
        )
    }

    #[test]
    fn test_invalid_argument_never_falls_back() {
        assert!(!Error::InvalidArgument("bad".into()).should_fall_back());
        assert!(Error::tool_failure("7z", Some(2), None).should_fall_back());
        assert!(
            Error::SpawnFailure {
                binary: PathBuf::from("7z"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .should_fall_back()
        );
        assert!(Error::Io(std::io::Error::other("pipe")).should_fall_back());
    }

    #[tokio::test]
    #[serial]
    async fn test_primary_success_skips_fallback() {
        let invoker = FallbackInvoker::new(&tools("sh", Some(MISSING)));
        let mut events: Vec<FileProgress> = Vec::new();

        let (outcome, _) = invoker
            .invoke(
                "test",
                &shell("printf -- '- a.txt\\n- b.txt'"),
                ProgressParser::extraction,
                &mut |event: FileProgress| events.push(event),
            )
            .await
            .unwrap();

        assert_eq!(outcome.binary, "sh");
        let names: Vec<_> = events.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_primary_falls_back_once() {
        let invoker = FallbackInvoker::new(&tools(MISSING, Some("sh")));
        let mut events: Vec<FileProgress> = Vec::new();
        let args = shell("printf -- '- from-fallback.txt\\n'");

        let (outcome, _) = invoker
            .invoke("test", &args, ProgressParser::extraction, &mut |event: FileProgress| {
                events.push(event)
            })
            .await
            .unwrap();

        assert_eq!(outcome.binary, "sh");
        assert_eq!(outcome.arguments, args);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "from-fallback.txt");
    }

    #[tokio::test]
    #[serial]
    async fn test_fallback_reissues_identical_arguments() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("attempted");
        let invoker = FallbackInvoker::new(&tools("sh", Some("sh")));
        let mut events: Vec<FileProgress> = Vec::new();

        let (outcome, _) = invoker
            .invoke(
                "test",
                &shell(&fail_once_script(&marker)),
                ProgressParser::extraction,
                &mut |event: FileProgress| events.push(event),
            )
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, 0);
        let names: Vec<_> = events.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["second.txt"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_failed_primary_events_are_discarded() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("attempted");
        let invoker = FallbackInvoker::new(&tools("sh", Some("sh")));
        let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<FileProgress>();

        invoker
            .invoke(
                "test",
                &shell(&fail_once_script(&marker)),
                ProgressParser::extraction,
                &mut tx,
            )
            .await
            .unwrap();
        drop(tx);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.name, "second.txt");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_fallback_failure_is_final() {
        let invoker = FallbackInvoker::new(&tools(MISSING, Some("sh")));
        let mut count = 0;

        let err = invoker
            .invoke(
                "test",
                &shell("echo 'Error: unsupported method' >&2; exit 7"),
                ProgressParser::extraction,
                &mut |_: FileProgress| count += 1,
            )
            .await
            .unwrap_err();

        match err {
            Error::ToolFailure {
                binary,
                message,
                exit_code,
            } => {
                assert_eq!(binary, "sh");
                assert_eq!(message, "unsupported method");
                assert_eq!(exit_code, Some(7));
            }
            other => panic!("Expected ToolFailure, got: {:?}", other),
        }
        assert_eq!(count, 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_disabled_fallback_surfaces_primary_error() {
        let invoker = FallbackInvoker::new(&tools(MISSING, None));
        assert_eq!(invoker.fallback(), None);

        let err = invoker
            .invoke("test", &shell("exit 0"), ListingParser::new, &mut |_: Entry| {})
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SpawnFailure { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_both_missing_reports_fallback_binary() {
        let invoker = FallbackInvoker::new(&tools(MISSING, Some("/nonexistent/path/to/7za")));

        let err = invoker
            .invoke("test", &shell("exit 0"), ListingParser::new, &mut |_: Entry| {})
            .await
            .unwrap_err();

        match err {
            Error::SpawnFailure { binary, .. } => {
                assert_eq!(binary, PathBuf::from("/nonexistent/path/to/7za"));
            }
            other => panic!("Expected SpawnFailure, got: {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_listing_parser_state_returned() {
        let invoker = FallbackInvoker::new(&tools("sh", None));

        let (_, parser) = invoker
            .invoke(
                "test",
                &shell("printf 'Type = 7z\\nPhysical Size = 4096\\n'"),
                ListingParser::new,
                &mut |_: Entry| {},
            )
            .await
            .unwrap();

        let spec = parser.into_spec();
        assert_eq!(spec.archive_type.as_deref(), Some("7z"));
        assert_eq!(spec.physical_size, Some(4096));
    }
}

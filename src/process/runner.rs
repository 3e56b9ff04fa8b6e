//! Spawning the external tool and draining its output

use super::decode::ChunkDecoder;
use super::stderr::ErrorExtractor;
use crate::error::{Error, Result};
use crate::types::ProcessOutcome;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

/// Size of a single pipe read
const CHUNK_SIZE: usize = 8 * 1024;

/// Runs one binary with one argument vector
///
/// stdout is forwarded chunk by chunk, in order, to the caller's callback
/// while stderr is scanned by an [`ErrorExtractor`]. Both pipes are drained
/// concurrently so the tool never stalls on a full pipe.
///
/// # Examples
///
/// ```no_run
/// use sevenz_cmd::process::ProcessRunner;
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = ProcessRunner::new("7z", PathBuf::from("/usr/bin/7z"));
/// let args = vec!["l".to_string(), "archive.7z".to_string(), "-bb2".to_string()];
///
/// let outcome = runner
///     .run(&args, |chunk| print!("{}", chunk))
///     .await?;
/// assert_eq!(outcome.exit_code, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    binary: String,
    program: PathBuf,
}

impl ProcessRunner {
    /// Create a runner for `binary`, executed as `program`
    pub fn new(binary: impl Into<String>, program: PathBuf) -> Self {
        Self {
            binary: binary.into(),
            program,
        }
    }

    /// Binary name used in errors and logs
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Program path handed to the OS
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Spawn the program and wait for it to exit
    ///
    /// `on_stdout` is called zero or more times with decoded stdout chunks.
    /// Exit code 0 resolves with the argument vector; any other exit rejects
    /// with [`Error::ToolFailure`] carrying the last stderr error message, if
    /// one was seen. A program that cannot be started rejects with
    /// [`Error::SpawnFailure`].
    pub async fn run<F>(&self, args: &[String], mut on_stdout: F) -> Result<ProcessOutcome>
    where
        F: FnMut(&str),
    {
        debug!(
            binary = %self.binary,
            program = ?self.program,
            ?args,
            "spawning external tool"
        );

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::SpawnFailure {
                binary: self.program.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Io(std::io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Io(std::io::Error::other("stderr was not captured")))?;

        let (pumped, scanned) = tokio::join!(
            pump_stdout(stdout, &mut on_stdout),
            scan_stderr(stderr)
        );
        let status = child.wait().await?;
        pumped?;
        let extracted = scanned?;

        debug!(
            binary = %self.binary,
            code = ?status.code(),
            "external tool exited"
        );

        if status.success() {
            Ok(ProcessOutcome {
                binary: self.binary.clone(),
                exit_code: 0,
                arguments: args.to_vec(),
            })
        } else {
            Err(Error::tool_failure(&self.binary, status.code(), extracted))
        }
    }
}

async fn pump_stdout<R, F>(mut reader: R, on_stdout: &mut F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut decoder = ChunkDecoder::default();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        let text = decoder.decode(&buf[..read]);
        if !text.is_empty() {
            on_stdout(&text);
        }
    }
    let rest = decoder.finish();
    if !rest.is_empty() {
        on_stdout(&rest);
    }
    Ok(())
}

async fn scan_stderr<R>(mut reader: R) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut decoder = ChunkDecoder::default();
    let mut extractor = ErrorExtractor::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        extractor.scan(&decoder.decode(&buf[..read]));
    }
    extractor.scan(&decoder.finish());
    Ok(extractor.into_message())
}

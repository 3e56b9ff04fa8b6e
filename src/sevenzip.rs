//! Archive operations backed by the 7-Zip command line

use crate::command::Command;
use crate::config::{Config, ToolsConfig};
use crate::error::{Error, Result};
use crate::output::{ListingParser, NoProgress, OutputParser, ProgressParser, ProgressSink};
use crate::retry::FallbackInvoker;
use crate::switches::SwitchSet;
use crate::types::{ArchiveSpec, Entry, FileProgress, ProcessOutcome, Verb};
use std::path::{Path, PathBuf};

/// Module used for self-extracting packages when no `sfx` switch is given
pub const DEFAULT_SFX_MODULE: &str = "7z.sfx";

/// Directory, under the caller's destination, that receives packages
pub const SFX_PACKAGE_DIR: &str = "SfxPackages";

/// Client for the external `7z`/`7za` binaries
///
/// Each operation assembles a [`Command`], merges the configured default
/// switches with the per-call switches, and runs it through a
/// [`FallbackInvoker`]. Progress is delivered to a [`ProgressSink`] (held
/// back per attempt while a fallback could still replace it); the returned
/// future settles once the process has exited.
///
/// # Examples
///
/// ```no_run
/// use sevenz_cmd::{SevenZip, SwitchSet};
/// use sevenz_cmd::types::{Entry, FileProgress};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sevenzip = SevenZip::from_path().expect("7z not found in PATH");
///
/// let spec = sevenzip
///     .list(Path::new("backup.7z"), &SwitchSet::new(), &mut |entry: Entry| {
///         println!("{} {}", entry.size, entry.name)
///     })
///     .await?;
/// println!("archive type: {:?}", spec.archive_type);
///
/// let switches = SwitchSet::new().with("p", "secret");
/// sevenzip
///     .extract_full(Path::new("backup.7z"), Path::new("restore"), &switches, &mut |f: FileProgress| {
///         println!("extracted {}", f.name)
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SevenZip {
    config: Config,
    invoker: FallbackInvoker,
}

impl SevenZip {
    /// Create a client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let invoker = FallbackInvoker::new(&config.tools);
        Ok(Self { config, invoker })
    }

    /// Attempt to find `7z` (or `7za`) in PATH
    ///
    /// Uses the `which` crate. When both binaries are present `7z` is primary
    /// and `7za` the fallback; when only one is present it is used alone.
    ///
    /// # Returns
    ///
    /// `Some(SevenZip)` if either binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        let defaults = ToolsConfig::default();
        let fallback = defaults
            .fallback_binary
            .clone()
            .filter(|name| which::which(name).is_ok());

        let tools = if which::which(&defaults.binary).is_ok() {
            ToolsConfig {
                fallback_binary: fallback,
                ..defaults
            }
        } else {
            ToolsConfig {
                binary: fallback?,
                fallback_binary: None,
                ..defaults
            }
        };

        Self::new(Config {
            tools,
            ..Default::default()
        })
        .ok()
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add files to an archive (`a`), reporting each file as it is added
    pub async fn add<I, P, S>(
        &self,
        archive: &Path,
        files: I,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        S: ProgressSink<FileProgress>,
    {
        let command = with_required_files(Command::new(Verb::Add, archive)?, files)?;
        self.execute(command, switches, ProgressParser::addition, sink)
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Build a self-extracting package `<dest>/SfxPackages/<name>.exe` (`a -sfx`)
    ///
    /// The `sfx` switch picks the module (per call, else from the configured
    /// defaults, else [`DEFAULT_SFX_MODULE`]). The package directory is
    /// created before the tool runs. Returns the package path with the outcome.
    pub async fn create_sfx<I, P, S>(
        &self,
        name: &str,
        files: I,
        dest: &Path,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<(PathBuf, ProcessOutcome)>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        S: ProgressSink<FileProgress>,
    {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::InvalidArgument(format!(
                "invalid package name `{}`",
                name
            )));
        }

        let package = dest.join(SFX_PACKAGE_DIR).join(format!("{}.exe", name));
        let command = with_required_files(Command::new(Verb::Add, &package)?, files)?;

        let mut switches = switches.clone();
        if switches.get("sfx").is_none() && self.config.default_switches.get("sfx").is_none() {
            switches.set("sfx", DEFAULT_SFX_MODULE);
        }
        // Rejects unknown switches before touching the filesystem
        switches.validate()?;

        if let Some(dir) = package.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tracing::debug!(package = %package.display(), "building self-extracting package");

        let (outcome, _) = self
            .execute(command, &switches, ProgressParser::addition, sink)
            .await?;
        Ok((package, outcome))
    }

    /// Delete files from an archive (`d`)
    pub async fn delete<I, P>(
        &self,
        archive: &Path,
        files: I,
        switches: &SwitchSet,
    ) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let command = with_required_files(Command::new(Verb::Delete, archive)?, files)?;
        self.execute(command, switches, NoProgress::default, &mut |_: FileProgress| {})
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Extract into `dest` without directory structure (`e`)
    ///
    /// `dest` may contain wildcards, e.g. `*` for a directory named after the archive.
    pub async fn extract<S>(
        &self,
        archive: &Path,
        dest: &Path,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ProcessOutcome>
    where
        S: ProgressSink<FileProgress>,
    {
        let command = Command::new(Verb::Extract, archive)?.with_output(dest)?;
        self.execute(command, switches, ProgressParser::extraction, sink)
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Extract into `dest` with full paths (`x`)
    pub async fn extract_full<S>(
        &self,
        archive: &Path,
        dest: &Path,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ProcessOutcome>
    where
        S: ProgressSink<FileProgress>,
    {
        let command = Command::new(Verb::ExtractFull, archive)?.with_output(dest)?;
        self.execute(command, switches, ProgressParser::extraction, sink)
            .await
            .map(|(outcome, _)| outcome)
    }

    /// List archive contents (`l`)
    ///
    /// Entries are streamed to `sink`; the archive metadata is returned once
    /// the listing completes.
    pub async fn list<S>(
        &self,
        archive: &Path,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ArchiveSpec>
    where
        S: ProgressSink<Entry>,
    {
        let command = Command::new(Verb::List, archive)?;
        self.execute(command, switches, ListingParser::new, sink)
            .await
            .map(|(_, parser)| parser.into_spec())
    }

    /// Rename files inside an archive (`rn`), given `(old, new)` pairs
    pub async fn rename<I, A, B, S>(
        &self,
        archive: &Path,
        pairs: I,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<Path>,
        B: AsRef<Path>,
        S: ProgressSink<FileProgress>,
    {
        let files: Vec<PathBuf> = pairs
            .into_iter()
            .flat_map(|(old, new)| [old.as_ref().to_path_buf(), new.as_ref().to_path_buf()])
            .collect();
        let command = with_required_files(Command::new(Verb::Rename, archive)?, files)?;
        self.execute(command, switches, ProgressParser::rename, sink)
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Update files in an archive (`u`)
    pub async fn update<I, P, S>(
        &self,
        archive: &Path,
        files: I,
        switches: &SwitchSet,
        sink: &mut S,
    ) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        S: ProgressSink<FileProgress>,
    {
        let command = with_required_files(Command::new(Verb::Update, archive)?, files)?;
        self.execute(command, switches, ProgressParser::update, sink)
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Run an arbitrary command with a caller-chosen parser
    ///
    /// Configured default switches are merged beneath the command's own.
    pub async fn run<P, F, S>(
        &self,
        command: &Command,
        make_parser: F,
        sink: &mut S,
    ) -> Result<(ProcessOutcome, P)>
    where
        P: OutputParser,
        F: Fn() -> P,
        S: ProgressSink<P::Event>,
    {
        let switches = self.config.default_switches.merged_with(command.switches());
        let command = command.clone().with_switches(switches);
        let args = command.arguments()?;
        self.invoker
            .invoke(command.verb().operation_name(), &args, make_parser, sink)
            .await
    }

    async fn execute<P, F, S>(
        &self,
        command: Command,
        switches: &SwitchSet,
        make_parser: F,
        sink: &mut S,
    ) -> Result<(ProcessOutcome, P)>
    where
        P: OutputParser,
        F: Fn() -> P,
        S: ProgressSink<P::Event>,
    {
        let command = command.with_switches(switches.clone());
        self.run(&command, make_parser, sink).await
    }
}

fn with_required_files<I, P>(command: Command, files: I) -> Result<Command>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let verb = command.verb();
    let mut files = files.into_iter().peekable();
    if files.peek().is_none() {
        return Err(Error::InvalidArgument(format!(
            "{} requires at least one file",
            verb.operation_name()
        )));
    }
    command.with_files(files)
}

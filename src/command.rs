//! Command construction
//!
//! A [`Command`] is the typed description of one operation. It renders to
//! the textual command string understood by [`ArgumentAssembler`], which
//! turns it into the argument vector handed to the process:
//!
//! ```text
//! [verb, ...normalized quoted segments, ...switch tokens, -bb2]
//! ```

use crate::error::{Error, Result};
use crate::switches::SwitchSet;
use crate::types::Verb;
use crate::utils::{normalize_path, path_to_str, quote, quote_files};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Flag that makes the tool print per-file lines on stdout
pub const INFO_FLAG: &str = "-bb2";

/// Marker introducing the output-destination segment
const OUTPUT_MARKER: &str = "-o";

/// A double-quoted segment
#[allow(clippy::expect_used)]
static QUOTED_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("quoted segment pattern is valid"));

/// Builds argument vectors from command strings
pub struct ArgumentAssembler;

impl ArgumentAssembler {
    /// Assemble the argument vector for `command` and `switches`
    ///
    /// Only the first whitespace-delimited token of `command` is used as the
    /// verb; every other argument must be enclosed in double quotes. A quoted
    /// segment directly preceded by `-o` is the output destination: it is
    /// rendered as a single `-o<path>` token after the other segments and may
    /// contain wildcards.
    ///
    /// # Examples
    ///
    /// ```
    /// use sevenz_cmd::command::ArgumentAssembler;
    /// use sevenz_cmd::SwitchSet;
    ///
    /// let sep = std::path::MAIN_SEPARATOR;
    /// let args = ArgumentAssembler::assemble(
    ///     r#"x "dir//archive.7z" -o"out/./here""#,
    ///     &SwitchSet::new(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(
    ///     args,
    ///     vec![
    ///         "x".to_string(),
    ///         format!("dir{sep}archive.7z"),
    ///         format!("-oout{sep}here"),
    ///         "-ssc".to_string(),
    ///         "-y".to_string(),
    ///         "-bb2".to_string(),
    ///     ]
    /// );
    /// ```
    pub fn assemble(command: &str, switches: &SwitchSet) -> Result<Vec<String>> {
        let verb = command
            .split_whitespace()
            .next()
            .filter(|token| !token.starts_with('"'))
            .ok_or_else(|| Error::InvalidArgument("command has no verb".to_string()))?;

        let mut args = vec![verb.to_string()];
        let mut output = None;
        let mut unquoted = String::with_capacity(command.len());
        let mut last_end = 0;

        for segment in QUOTED_SEGMENT.captures_iter(command) {
            let (Some(whole), Some(inner)) = (segment.get(0), segment.get(1)) else {
                continue;
            };
            let before = &command[last_end..whole.start()];
            unquoted.push_str(before);
            last_end = whole.end();

            let normalized = normalize_path(inner.as_str());
            if before.ends_with(OUTPUT_MARKER) {
                unquoted.truncate(unquoted.len() - OUTPUT_MARKER.len());
                output = Some(format!("{}{}", OUTPUT_MARKER, normalized));
            } else {
                args.push(normalized);
            }
        }
        unquoted.push_str(&command[last_end..]);

        if unquoted.contains('"') {
            return Err(Error::InvalidArgument(format!(
                "unterminated quote in command: {}",
                command
            )));
        }
        if let Some(stray) = unquoted.split_whitespace().nth(1) {
            return Err(Error::InvalidArgument(format!(
                "unquoted argument `{}` in command: {}",
                stray, command
            )));
        }

        args.extend(output);
        args.extend(switches.render()?);

        // The process gets no shell, so literal quotes would end up in paths
        for arg in args.iter_mut().filter(|arg| !arg.starts_with('-')) {
            let stripped = arg.trim_start_matches('"').trim_end_matches('"');
            if stripped.len() != arg.len() {
                *arg = stripped.to_string();
            }
        }

        args.push(INFO_FLAG.to_string());
        Ok(args)
    }
}

/// Typed description of one operation, independent of the binary it runs on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    archive: String,
    files: Vec<String>,
    output: Option<String>,
    switches: SwitchSet,
}

impl Command {
    /// Start a command for `verb` against `archive`
    pub fn new(verb: Verb, archive: &Path) -> Result<Self> {
        let archive = path_to_str(archive)?;
        if archive.is_empty() {
            return Err(Error::InvalidArgument("archive path is empty".to_string()));
        }
        Ok(Self {
            verb,
            archive: archive.to_string(),
            files: Vec::new(),
            output: None,
            switches: SwitchSet::new(),
        })
    }

    /// Append file arguments (files to add, delete, update, or rename pairs)
    pub fn with_files<I, P>(mut self, files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for file in files {
            self.files.push(path_to_str(file.as_ref())?.to_string());
        }
        Ok(self)
    }

    /// Set the output destination (`-o`); wildcards are allowed
    pub fn with_output(mut self, dest: &Path) -> Result<Self> {
        self.output = Some(path_to_str(dest)?.to_string());
        Ok(self)
    }

    /// Set the switches for this command
    #[must_use]
    pub fn with_switches(mut self, switches: SwitchSet) -> Self {
        self.switches = switches;
        self
    }

    /// The operation verb
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The switches rendered into the argument vector
    pub fn switches(&self) -> &SwitchSet {
        &self.switches
    }

    /// Render the command string, e.g. `x "a.7z" -o"dest"`
    pub fn command_line(&self) -> Result<String> {
        let mut line = format!("{} {}", self.verb, quote(&self.archive)?);
        if !self.files.is_empty() {
            line.push(' ');
            line.push_str(&quote_files(&self.files)?);
        }
        if let Some(dest) = &self.output {
            line.push(' ');
            line.push_str(OUTPUT_MARKER);
            line.push_str(&quote(dest)?);
        }
        Ok(line)
    }

    /// Assemble the full argument vector
    pub fn arguments(&self) -> Result<Vec<String>> {
        ArgumentAssembler::assemble(&self.command_line()?, &self.switches)
    }
}

//! Fake 7-Zip binaries backed by shell scripts
//!
//! Each installed binary records its argument vector, prints canned stdout
//! and stderr, and exits with a fixed code. Tests using these must be
//! `#[serial]`: a script being written while another test forks can fail
//! to execute with ETXTBSY.

use sevenz_cmd::config::ToolsConfig;
use sevenz_cmd::{Config, SevenZip};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Separator line written before each recorded invocation
const CALL_MARKER: &str = "--call--";

/// Canned behaviour of one fake binary
#[derive(Debug, Clone, Default)]
pub struct Behaviour {
    /// Text printed on stdout
    pub stdout: String,
    /// Text printed on stderr
    pub stderr: String,
    /// Exit code
    pub exit_code: i32,
}

impl Behaviour {
    /// Print `stdout` and exit 0
    pub fn succeed(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Default::default()
        }
    }

    /// Print `stderr` and exit with `exit_code`
    pub fn fail(stderr: &str, exit_code: i32) -> Self {
        Self {
            stderr: stderr.to_string(),
            exit_code,
            ..Default::default()
        }
    }

    /// Also print `stdout` before failing
    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = stdout.to_string();
        self
    }
}

/// Directory holding fake binaries
pub struct FakeInstall {
    dir: TempDir,
}

impl FakeInstall {
    /// Create an empty installation
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Directory the binaries live in
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Install a binary called `name`
    pub fn install(&self, name: &str, behaviour: Behaviour) -> PathBuf {
        let stdout = self.path().join(format!("{}.stdout", name));
        let stderr = self.path().join(format!("{}.stderr", name));
        let calls = self.calls_file(name);
        fs::write(&stdout, &behaviour.stdout).expect("Failed to write stdout fixture");
        fs::write(&stderr, &behaviour.stderr).expect("Failed to write stderr fixture");

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' '{marker}' \"$@\" >> '{calls}'\n\
             cat '{stdout}'\n\
             cat '{stderr}' >&2\n\
             exit {code}\n",
            marker = CALL_MARKER,
            calls = calls.display(),
            stdout = stdout.display(),
            stderr = stderr.display(),
            code = behaviour.exit_code,
        );

        let binary = self.path().join(name);
        fs::write(&binary, script).expect("Failed to write fake binary");
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake binary executable");
        binary
    }

    /// Argument vectors of every invocation of `name`, oldest first
    pub fn calls(&self, name: &str) -> Vec<Vec<String>> {
        let Ok(log) = fs::read_to_string(self.calls_file(name)) else {
            return Vec::new();
        };

        let mut calls: Vec<Vec<String>> = Vec::new();
        for line in log.lines() {
            if line == CALL_MARKER {
                calls.push(Vec::new());
            } else if let Some(current) = calls.last_mut() {
                current.push(line.to_string());
            }
        }
        calls
    }

    /// Tool settings resolving binaries inside this installation only
    pub fn tools(&self, binary: &str, fallback: Option<&str>) -> ToolsConfig {
        ToolsConfig {
            binary: binary.to_string(),
            fallback_binary: fallback.map(str::to_string),
            binary_dir: Some(self.path().to_path_buf()),
            search_path: false,
        }
    }

    /// Client using `7z` with the `7za` fallback from this installation
    pub fn client(&self) -> SevenZip {
        self.client_with(Config {
            tools: self.tools("7z", Some("7za")),
            ..Default::default()
        })
    }

    /// Client with a custom configuration
    pub fn client_with(&self, config: Config) -> SevenZip {
        SevenZip::new(config).expect("Failed to create client")
    }

    fn calls_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.calls", name))
    }
}

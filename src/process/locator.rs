//! Binary resolution

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use std::env::consts::EXE_SUFFIX;
use std::path::PathBuf;
use tracing::debug;

/// Resolves binary names to the program handed to the OS
///
/// - With a `binary_dir`, the binary is expected inside that directory.
/// - Otherwise, with PATH search enabled, the `which` crate locates it.
/// - A name that cannot be found is returned as-is, so spawning it produces
///   a [`Error::SpawnFailure`] that the fallback logic can react to.
#[derive(Clone, Debug, Default)]
pub struct BinaryLocator {
    binary_dir: Option<PathBuf>,
    search_path: bool,
}

impl BinaryLocator {
    /// Create a locator from tool settings
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            binary_dir: tools.binary_dir.clone(),
            search_path: tools.search_path,
        }
    }

    /// Resolve `name` to a program path
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "binary name must not be empty".to_string(),
            ));
        }

        if let Some(dir) = &self.binary_dir {
            let file_name = if EXE_SUFFIX.is_empty() || name.ends_with(EXE_SUFFIX) {
                name.to_string()
            } else {
                format!("{}{}", name, EXE_SUFFIX)
            };
            return Ok(dir.join(file_name));
        }

        if self.search_path {
            match which::which(name) {
                Ok(path) => return Ok(path),
                Err(e) => debug!(binary = name, error = %e, "binary not found in PATH"),
            }
        }

        Ok(PathBuf::from(name))
    }

    /// Whether `name` resolves to an existing file
    pub fn is_available(&self, name: &str) -> bool {
        self.resolve(name).is_ok_and(|path| path.is_file())
    }
}

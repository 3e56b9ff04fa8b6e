//! Configuration types for sevenz-cmd

use crate::error::{Error, Result};
use crate::switches::SwitchSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External binary names and how they are resolved
///
/// Used as a flattened sub-config within [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Primary binary name (default: "7z")
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Binary retried once when the primary attempt fails (default: "7za")
    ///
    /// `None` disables the fallback attempt.
    #[serde(default = "default_fallback_binary")]
    pub fallback_binary: Option<String>,

    /// Directory holding the binaries, overriding PATH lookup (default: None)
    #[serde(default)]
    pub binary_dir: Option<PathBuf>,

    /// Whether to search PATH for bare binary names (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            fallback_binary: default_fallback_binary(),
            binary_dir: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`SevenZip`](crate::SevenZip)
///
/// Tool settings are flattened, so the serialized form has no nesting:
///
/// ```json
/// { "binary": "7zz", "fallback_binary": null, "default_switches": { "m": "mt=4" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// External binary settings
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// Switches applied to every operation; per-call switches take precedence
    #[serde(default)]
    pub default_switches: SwitchSet,
}

impl Config {
    /// Check the configuration for values that can never work
    pub fn validate(&self) -> Result<()> {
        if self.tools.binary.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "binary name must not be empty".to_string(),
            ));
        }
        if let Some(fallback) = &self.tools.fallback_binary
            && fallback.trim().is_empty()
        {
            return Err(Error::InvalidArgument(
                "fallback binary name must not be empty".to_string(),
            ));
        }
        self.default_switches.validate()
    }
}

// Default value functions
fn default_binary() -> String {
    "7z".to_string()
}

fn default_fallback_binary() -> Option<String> {
    Some("7za".to_string())
}

fn default_true() -> bool {
    true
}

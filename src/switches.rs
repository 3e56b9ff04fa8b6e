//! 7-Zip switch configuration
//!
//! A [`SwitchSet`] maps option names to values and renders them into the
//! flag tokens appended after the positional arguments. Only names on a
//! fixed allow-list are accepted; anything else is rejected with
//! [`Error::InvalidArgument`] when the set is rendered.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Switches rendered as `-<name>` when set to `true`
const BOOLEAN_SWITCHES: &[&str] = &[
    "bd", "bt", "r", "sdel", "sni", "sns", "so", "spe", "spf", "spl", "ssc", "ssw", "stl", "y",
];

/// Switches rendered as `-<name><value>`
const VALUED_SWITCHES: &[&str] = &[
    "ai", "an", "ax", "i", "m", "p", "scc", "scs", "sfx", "si", "t", "u", "v", "w", "x",
];

/// Valued switches that may be repeated
const REPEATABLE_SWITCHES: &[&str] = &["ai", "ax", "i", "m", "u", "v", "x"];

/// Verbatim tokens appended after every rendered switch
const RAW_KEY: &str = "raw";

/// Positional patterns placed before every rendered switch
const WILDCARDS_KEY: &str = "wildcards";

/// Switches that are on unless explicitly disabled
const DEFAULT_ON: &[&str] = &["ssc", "y"];

/// Value of a single switch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwitchValue {
    /// On/off switch
    Flag(bool),
    /// Integer value, e.g. a volume size
    Number(i64),
    /// Text value, e.g. a password or archive type
    Text(String),
    /// Several values for a repeatable switch
    List(Vec<String>),
}

impl From<bool> for SwitchValue {
    fn from(value: bool) -> Self {
        SwitchValue::Flag(value)
    }
}

impl From<i64> for SwitchValue {
    fn from(value: i64) -> Self {
        SwitchValue::Number(value)
    }
}

impl From<&str> for SwitchValue {
    fn from(value: &str) -> Self {
        SwitchValue::Text(value.to_string())
    }
}

impl From<String> for SwitchValue {
    fn from(value: String) -> Self {
        SwitchValue::Text(value)
    }
}

impl From<Vec<String>> for SwitchValue {
    fn from(values: Vec<String>) -> Self {
        SwitchValue::List(values)
    }
}

impl From<Vec<&str>> for SwitchValue {
    fn from(values: Vec<&str>) -> Self {
        SwitchValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Mapping from switch names to values
///
/// # Examples
///
/// ```
/// use sevenz_cmd::SwitchSet;
///
/// let switches = SwitchSet::new()
///     .with("p", "secret")
///     .with("r", true)
///     .with("m", vec!["x=9", "he=on"]);
///
/// assert_eq!(
///     switches.render().unwrap(),
///     vec!["-mx=9", "-mhe=on", "-psecret", "-r", "-ssc", "-y"],
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchSet {
    entries: BTreeMap<String, SwitchValue>,
}

impl SwitchSet {
    /// Create an empty set (the `ssc` and `y` defaults still apply when rendering)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SwitchSet::set`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SwitchValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a switch, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<SwitchValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Get the value of a switch
    pub fn get(&self, name: &str) -> Option<&SwitchValue> {
        self.entries.get(name)
    }

    /// Whether no switch has been set explicitly
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `overrides` on top of `self`; entries in `overrides` win
    #[must_use]
    pub fn merged_with(&self, overrides: &SwitchSet) -> SwitchSet {
        let mut entries = self.entries.clone();
        for (name, value) in &overrides.entries {
            entries.insert(name.clone(), value.clone());
        }
        SwitchSet { entries }
    }

    /// Check every name against the allow-list and every value against its kind
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.entries {
            validate_entry(name, value)?;
        }
        Ok(())
    }

    /// Render into flag tokens
    ///
    /// Order: wildcard patterns, then switches sorted by name, then raw tokens.
    pub fn render(&self) -> Result<Vec<String>> {
        self.validate()?;

        let mut wildcards = Vec::new();
        let mut flags = Vec::new();
        let mut raw = Vec::new();

        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        for default in DEFAULT_ON {
            if !self.entries.contains_key(*default) {
                names.push(*default);
            }
        }
        names.sort_unstable();

        for name in names {
            let value = self
                .entries
                .get(name)
                .cloned()
                .unwrap_or(SwitchValue::Flag(true));

            match (name, value) {
                (WILDCARDS_KEY, value) => wildcards.extend(list_values(value)),
                (RAW_KEY, value) => raw.extend(list_values(value)),
                (_, SwitchValue::Flag(true)) => flags.push(format!("-{}", name)),
                (_, SwitchValue::Flag(false)) => {}
                (_, SwitchValue::Number(n)) => flags.push(format!("-{}{}", name, n)),
                (_, SwitchValue::Text(text)) => flags.push(format!("-{}{}", name, text)),
                (_, SwitchValue::List(values)) => {
                    flags.extend(values.into_iter().map(|v| format!("-{}{}", name, v)))
                }
            }
        }

        wildcards.extend(flags);
        wildcards.extend(raw);
        Ok(wildcards)
    }
}

fn list_values(value: SwitchValue) -> Vec<String> {
    match value {
        SwitchValue::List(values) => values,
        SwitchValue::Text(text) => vec![text],
        SwitchValue::Number(n) => vec![n.to_string()],
        SwitchValue::Flag(_) => Vec::new(),
    }
}

fn validate_entry(name: &str, value: &SwitchValue) -> Result<()> {
    let kind_error = |expected: &str| {
        Err(Error::InvalidArgument(format!(
            "switch `{}` expects {}, got {:?}",
            name, expected, value
        )))
    };

    if name == RAW_KEY || name == WILDCARDS_KEY {
        return match value {
            SwitchValue::List(_) | SwitchValue::Text(_) => Ok(()),
            _ => kind_error("a list of strings"),
        };
    }

    if BOOLEAN_SWITCHES.contains(&name) {
        return match value {
            SwitchValue::Flag(_) => Ok(()),
            _ => kind_error("a boolean"),
        };
    }

    if VALUED_SWITCHES.contains(&name) {
        return match value {
            SwitchValue::Text(text) if text.is_empty() => kind_error("a non-empty value"),
            SwitchValue::Text(_) | SwitchValue::Number(_) => Ok(()),
            SwitchValue::List(_) if REPEATABLE_SWITCHES.contains(&name) => Ok(()),
            SwitchValue::List(_) => kind_error("a single value"),
            SwitchValue::Flag(_) => kind_error("a value"),
        };
    }

    Err(Error::InvalidArgument(format!("unknown switch: {}", name)))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_renders_defaults() {
        assert_eq!(SwitchSet::new().render().unwrap(), vec!["-ssc", "-y"]);
    }

    #[test]
    fn test_defaults_can_be_disabled() {
        let switches = SwitchSet::new().with("ssc", false).with("y", false);
        assert!(switches.render().unwrap().is_empty());
    }

    #[test]
    fn test_valued_switches() {
        let switches = SwitchSet::new()
            .with("t", "zip")
            .with("v", 100i64)
            .with("y", false)
            .with("ssc", false);
        assert_eq!(switches.render().unwrap(), vec!["-tzip", "-v100"]);
    }

    #[test]
    fn test_wildcards_come_first_and_raw_last() {
        let switches = SwitchSet::new()
            .with("raw", vec!["-r0", "-xr!*.tmp"])
            .with("wildcards", vec!["*.txt", "*.md"])
            .with("r", true);
        assert_eq!(
            switches.render().unwrap(),
            vec!["*.txt", "*.md", "-r", "-ssc", "-y", "-r0", "-xr!*.tmp"]
        );
    }

    #[test]
    fn test_unknown_switch_is_rejected() {
        let err = SwitchSet::new().with("bogus", true).render().unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("bogus")),
            other => panic!("Expected InvalidArgument, got: {:?}", other),
        }
    }

    #[test]
    fn test_output_is_not_a_switch() {
        assert!(SwitchSet::new().with("o", "dest").validate().is_err());
    }

    #[test]
    fn test_kind_mismatches_are_rejected() {
        assert!(SwitchSet::new().with("r", "yes").validate().is_err());
        assert!(SwitchSet::new().with("p", true).validate().is_err());
        assert!(SwitchSet::new().with("p", "").validate().is_err());
        assert!(SwitchSet::new().with("t", vec!["7z", "zip"]).validate().is_err());
        assert!(SwitchSet::new().with("raw", true).validate().is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = SwitchSet::new().with("p", "base").with("r", true);
        let overrides = SwitchSet::new().with("p", "call");
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.get("p"), Some(&SwitchValue::Text("call".into())));
        assert_eq!(merged.get("r"), Some(&SwitchValue::Flag(true)));
    }

    #[test]
    fn test_deserializes_mixed_values_from_json() {
        let switches: SwitchSet = serde_json::from_str(
            r#"{"p": "pw", "r": true, "v": 5, "m": ["x=9", "mt=on"]}"#,
        )
        .unwrap();
        assert_eq!(
            switches.render().unwrap(),
            vec!["-mx=9", "-mmt=on", "-ppw", "-r", "-ssc", "-v5", "-y"]
        );
    }
}

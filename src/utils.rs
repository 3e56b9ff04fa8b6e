//! Utility functions for path manipulation and command-string quoting

use crate::error::{Error, Result};
use std::path::{MAIN_SEPARATOR, Path};

/// Rewrite every `/` and `\` to the host path separator
///
/// # Examples
///
/// ```
/// use sevenz_cmd::utils::to_host_separators;
///
/// let host = to_host_separators("dir/sub\\file.txt");
/// let sep = std::path::MAIN_SEPARATOR;
/// assert_eq!(host, format!("dir{sep}sub{sep}file.txt"));
/// ```
#[must_use]
pub fn to_host_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Lexically normalize a path using the host separator
///
/// Separators are unified, redundant separators and `.` segments are
/// removed and `..` segments are resolved against preceding segments. The
/// file system is never consulted, so wildcards such as `*` pass through
/// untouched. A trailing separator is preserved and an empty path becomes `.`.
///
/// # Examples
///
/// ```
/// use sevenz_cmd::utils::normalize_path;
///
/// let sep = std::path::MAIN_SEPARATOR;
/// assert_eq!(normalize_path("a//b/./c/../d"), format!("a{sep}b{sep}d"));
/// assert_eq!(normalize_path("*"), "*");
/// assert_eq!(normalize_path(""), ".");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = to_host_separators(path);
    let (prefix, rest) = split_drive_prefix(&unified);

    let absolute = rest.starts_with(MAIN_SEPARATOR);
    let trailing = rest.len() > 1 && rest.ends_with(MAIN_SEPARATOR);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(MAIN_SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` above the root is dropped
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = String::with_capacity(unified.len());
    normalized.push_str(prefix);
    if absolute {
        normalized.push(MAIN_SEPARATOR);
        if segments.is_empty() {
            return normalized;
        }
    } else if segments.is_empty() {
        normalized.push('.');
    }
    normalized.push_str(&segments.join(&MAIN_SEPARATOR.to_string()));
    if trailing {
        normalized.push(MAIN_SEPARATOR);
    }
    normalized
}

/// Split a Windows drive prefix (`C:`) from the rest of the path
#[cfg(windows)]
fn split_drive_prefix(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        path.split_at(2)
    } else {
        ("", path)
    }
}

#[cfg(not(windows))]
fn split_drive_prefix(path: &str) -> (&str, &str) {
    ("", path)
}

/// Borrow a path as UTF-8 text, rejecting anything else
///
/// The command string handed to the argument assembler is textual, so paths
/// that are not valid UTF-8 cannot be represented.
pub fn path_to_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::InvalidArgument(format!("path is not valid UTF-8: {}", path.display()))
    })
}

/// Quote a list of files for a command string: `"a" "b" "c"`
///
/// Names containing a double quote cannot be represented and are rejected.
pub fn quote_files<S: AsRef<str>>(files: &[S]) -> Result<String> {
    let mut quoted = Vec::with_capacity(files.len());
    for file in files {
        quoted.push(quote(file.as_ref())?);
    }
    Ok(quoted.join(" "))
}

/// Wrap a single value in double quotes
pub fn quote(value: &str) -> Result<String> {
    if value.contains('"') {
        return Err(Error::InvalidArgument(format!(
            "value contains a double quote: {}",
            value
        )));
    }
    Ok(format!("\"{}\"", value))
}

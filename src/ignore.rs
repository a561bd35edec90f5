//! Glob pattern sets used to exclude or tag template entries.
//! Patterns are matched against template-relative paths written with
//! forward slashes, before any placeholder substitution.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::{Component, Path};

/// Compiles `patterns` into a single set. `what` names the set in errors.
///
/// `*` and `?` stay inside one path component; `**` crosses directories.
/// A trailing `/` is accepted and ignored, so `docker/` and `docker` both
/// match the directory itself.
pub fn build_glob_set<S: AsRef<str>>(patterns: &[S], what: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            continue;
        }
        let pattern = pattern.trim_end_matches('/');
        let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(|e| {
            Error::ConfigError(format!("invalid {what} pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("{what} patterns failed to load: {e}")))
}

/// Builds the ignore set: the built-in defaults plus `patterns`.
pub fn build_ignore_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut all: Vec<&str> = DEFAULT_IGNORE_PATTERNS.to_vec();
    all.extend(patterns.iter().map(|p| p.as_ref()));
    debug!("Ignore patterns: {:?}", all);
    build_glob_set(&all, "ignore")
}

/// Renders a relative path with `/` separators regardless of platform.
/// Returns `None` for paths that are not plain relative paths.
pub fn to_slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

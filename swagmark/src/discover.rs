//! Source discovery: every `.go` file under a directory tree.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Recursively collect `.go` files below `dir`, sorted by path.
///
/// Entries the walk cannot read are logged and skipped.
pub fn go_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/**/*.go", root.trim_end_matches('/'));
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    // Sort for deterministic merge order
    files.sort();
    files.dedup();
    Ok(files)
}

//! Comment extraction, dispatched by file extension.

pub mod go;

use anyhow::{anyhow, Result};
use std::path::Path;
use swagmark_core::RawBlock;

pub use go::GoSource;

/// Pull every comment out of a source file based on its extension.
pub fn extract_file(path: &Path, content: &str) -> Result<GoSource> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("go") => go::extract(content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}

impl GoSource {
    /// Whether this file belongs to `package`, compared case-insensitively.
    /// Files without a package clause never match.
    pub fn in_package(&self, package: &str) -> bool {
        self.package
            .as_deref()
            .is_some_and(|p| p.to_lowercase() == package.to_lowercase())
    }

    /// Comments as raw blocks tagged with this file's package.
    pub fn into_blocks(self) -> Vec<RawBlock> {
        let package = self.package;
        self.comments
            .into_iter()
            .map(|text| {
                let block = RawBlock::new(&text);
                match &package {
                    Some(p) => block.with_package(p.clone()),
                    None => block,
                }
            })
            .collect()
    }
}

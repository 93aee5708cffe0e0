//! Assembly pipeline: scan → merge → validate.

use crate::error::AssemblyError;
use crate::markup::{MarkupKind, MarkupTable, RawBlock};
use crate::merge;
use crate::model::Document;
use crate::validate::validate;
use std::path::PathBuf;

/// Comment blocks of one source file, in source order.
///
/// Blocks from packages the caller filtered out must not be included.
#[derive(Debug, Clone)]
pub struct SourceBlocks {
    pub path: PathBuf,
    pub blocks: Vec<RawBlock>,
}

impl SourceBlocks {
    pub fn new(path: impl Into<PathBuf>, blocks: Vec<RawBlock>) -> Self {
        SourceBlocks {
            path: path.into(),
            blocks,
        }
    }
}

/// Build a document from the blocks of every scanned file.
///
/// Files must arrive in a fixed order; later files win path and definition
/// conflicts.
pub fn assemble<I>(files: I) -> Result<Document, AssemblyError>
where
    I: IntoIterator<Item = SourceBlocks>,
{
    let mut table = MarkupTable::new();
    for file in files {
        let matched = table.scan(&file.blocks);
        log::debug!(
            "{}: {} of {} comment blocks are markup",
            file.path.display(),
            matched,
            file.blocks.len()
        );
    }
    assemble_table(&table)
}

/// Merge an already collected table and validate the result.
pub fn assemble_table(table: &MarkupTable) -> Result<Document, AssemblyError> {
    let mut doc = Document::default();
    for kind in MarkupKind::ALL {
        let bodies = table.bodies(kind);
        if bodies.is_empty() {
            continue;
        }
        log::debug!("merging {} {} block(s)", bodies.len(), kind);
        merge::merge(kind, &mut doc, bodies)
            .map_err(|source| AssemblyError::Decode { kind, source })?;
    }
    validate(&doc)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn file(path: &str, blocks: &[&str]) -> SourceBlocks {
        SourceBlocks::new(path, blocks.iter().map(|b| RawBlock::new(b)).collect())
    }

    const META: &str = "/* api:meta\nInfo:\n  Title: T\n  Version: \"1\"\n*/";

    #[test]
    fn meta_only_is_missing_paths() {
        let err = assemble(vec![file("a.go", &[META])]).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Validation(ValidationError::MissingPaths)
        ));
    }

    #[test]
    fn no_markup_is_missing_version() {
        let err = assemble(vec![file("a.go", &["// plain comment"])]).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Validation(ValidationError::MissingVersion)
        ));
    }

    #[test]
    fn routes_without_meta_are_missing_version() {
        let err = assemble(vec![file("a.go", &["/* api:route\n/a: {}\n*/"])]).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Validation(ValidationError::MissingVersion)
        ));
    }

    #[test]
    fn later_files_win_path_conflicts() {
        let doc = assemble(vec![
            file("a.go", &[META, "/* api:route\n/x:\n  Get:\n    Summary: from a\n*/"]),
            file("b.go", &["/* api:route\n/x:\n  Get:\n    Summary: from b\n*/"]),
        ])
        .unwrap();
        let paths = doc.paths.unwrap();
        assert_eq!(
            paths["/x"].get.as_ref().unwrap().summary.as_deref(),
            Some("from b")
        );
    }

    #[test]
    fn bad_meta_stops_before_other_kinds() {
        let err = assemble(vec![file(
            "a.go",
            &["/* api:meta\nInfo: [\n*/", "/* api:route\n/x: [\n*/"],
        )])
        .unwrap_err();
        match err {
            AssemblyError::Decode { kind, source } => {
                assert_eq!(kind, MarkupKind::Meta);
                assert_eq!(source.text(), "Info: [");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_route_reports_kind_and_text() {
        let err = assemble(vec![file(
            "a.go",
            &[META, "/* api:route\n/x:\n  Get: [\n*/"],
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Decode {
                kind: MarkupKind::Route,
                ..
            }
        ));
        assert_eq!(err.offending_text(), Some("/x:\n  Get: ["));
    }

    #[test]
    fn empty_route_body_still_provides_paths() {
        let doc = assemble(vec![file("a.go", &[META, "/* api:route\n\n*/"])]).unwrap();
        assert_eq!(doc.paths, Some(Default::default()));
    }

    #[test]
    fn numeric_version_is_rejected_not_rewritten() {
        for version in ["1.0", "1.10"] {
            let meta = format!("/* api:meta\nInfo:\n  Title: T\n  Version: {version}\n*/");
            let err = assemble(vec![file("a.go", &[meta.as_str(), "/* api:route\n/a: {}\n*/"])])
                .unwrap_err();
            match err {
                AssemblyError::Decode { kind, source } => {
                    assert_eq!(kind, MarkupKind::Meta);
                    assert!(matches!(source, crate::error::DecodeError::Shape { .. }));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn quoted_version_is_kept_verbatim() {
        let meta = "/* api:meta\nInfo:\n  Title: T\n  Version: \"1.10\"\n*/";
        let doc = assemble(vec![file("a.go", &[meta, "/* api:route\n/a: {}\n*/"])]).unwrap();
        assert_eq!(doc.info.unwrap().version, "1.10");
    }
}

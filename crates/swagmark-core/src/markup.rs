//! Markup recognition: which comment blocks carry `api:*` data.

use std::collections::BTreeMap;
use std::fmt;

/// Recognized block kinds, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkupKind {
    Meta,
    Route,
    Model,
}

impl MarkupKind {
    /// Every kind, in classification and merge order.
    pub const ALL: [MarkupKind; 3] = [MarkupKind::Meta, MarkupKind::Route, MarkupKind::Model];

    /// Tag label looked for (lowercase) on a block's first line.
    pub fn label(self) -> &'static str {
        match self {
            MarkupKind::Meta => "api:meta",
            MarkupKind::Route => "api:route",
            MarkupKind::Model => "api:model",
        }
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A comment block as extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    lines: Vec<String>,
    /// Package the block was found in, for filtering upstream.
    pub package: Option<String>,
}

impl RawBlock {
    /// Split comment text into lines on `\n`. A trailing newline yields a
    /// trailing empty line.
    pub fn new(text: &str) -> Self {
        RawBlock {
            lines: text.split('\n').map(str::to_string).collect(),
            package: None,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A block recognized as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub kind: MarkupKind,
    /// Every line but the tag line and the closing line, joined with `\n`.
    pub body: String,
}

/// Closing lines that hold nothing but the comment delimiter.
fn is_bare_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed == "*/"
}

/// Classify a raw comment block.
///
/// A block is markup when its first line contains a kind label (compared
/// lowercase) and it has more than two lines. The first line and the last
/// line are dropped; the last is taken to be the closing delimiter.
pub fn classify(block: &RawBlock) -> Option<Markup> {
    let lines = block.lines();
    let first = lines.first()?.to_lowercase();
    let kind = MarkupKind::ALL
        .into_iter()
        .find(|kind| first.contains(kind.label()))?;

    if lines.len() <= 2 {
        log::debug!("ignoring {} block without a body", kind);
        return None;
    }

    let last = &lines[lines.len() - 1];
    if !is_bare_delimiter(last) {
        log::warn!(
            "{} block closing line {:?} is not a bare delimiter; its content is dropped",
            kind,
            last.trim()
        );
    }

    Some(Markup {
        kind,
        body: lines[1..lines.len() - 1].join("\n"),
    })
}

/// Markup bodies grouped by kind, each group in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupTable {
    bodies: BTreeMap<MarkupKind, Vec<String>>,
}

impl MarkupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MarkupKind, body: String) {
        self.bodies.entry(kind).or_default().push(body);
    }

    /// Classify `blocks` in order and append every match. Returns the number
    /// of blocks recognized.
    pub fn scan<'a, I>(&mut self, blocks: I) -> usize
    where
        I: IntoIterator<Item = &'a RawBlock>,
    {
        let mut matched = 0;
        for markup in blocks.into_iter().filter_map(classify) {
            self.push(markup.kind, markup.body);
            matched += 1;
        }
        matched
    }

    /// Bodies collected for `kind`, oldest first.
    pub fn bodies(&self, kind: MarkupKind) -> &[String] {
        self.bodies.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bodies.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_meta_block() {
        let block = RawBlock::new("/* api:meta\nHost: example.com\nBasePath: /v2\n*/");
        let markup = classify(&block).unwrap();
        assert_eq!(markup.kind, MarkupKind::Meta);
        assert_eq!(markup.body, "Host: example.com\nBasePath: /v2");
    }

    #[test]
    fn classify_label_is_case_insensitive() {
        let block = RawBlock::new("/* API:Route\n/x: {}\n*/");
        assert_eq!(classify(&block).unwrap().kind, MarkupKind::Route);
    }

    #[test]
    fn classify_ignores_unlabelled_blocks() {
        for text in [
            "// This is a test",
            "/* just a comment\nwith lines\nand more\n*/",
            "/* api:unknown\nfoo: bar\n*/",
            "/*\napi:meta\nHost: x\n*/",
        ] {
            assert_eq!(classify(&RawBlock::new(text)), None, "{text:?}");
        }
    }

    #[test]
    fn classify_requires_more_than_two_lines() {
        assert_eq!(classify(&RawBlock::new("/* api:model */")), None);
        assert_eq!(classify(&RawBlock::new("/* api:model\nPet: {} */")), None);
        let three = classify(&RawBlock::new("/* api:model\nPet: {}\n*/")).unwrap();
        assert_eq!(three.body, "Pet: {}");
    }

    #[test]
    fn classify_drops_closing_line_content() {
        let markup = classify(&RawBlock::new("/* api:meta\nHost: a\nBasePath: /b */")).unwrap();
        assert_eq!(markup.body, "Host: a");
    }

    #[test]
    fn classify_prefers_first_kind_in_order() {
        let block = RawBlock::new("/* api:model api:meta\nx: 1\n*/");
        assert_eq!(classify(&block).unwrap().kind, MarkupKind::Meta);
    }

    #[test]
    fn table_preserves_discovery_order() {
        let blocks = vec![
            RawBlock::new("/* api:model\nB: {}\n*/"),
            RawBlock::new("// unrelated"),
            RawBlock::new("/* api:route\n/a: {}\n*/"),
            RawBlock::new("/* api:model\nA: {}\n*/"),
        ];
        let mut table = MarkupTable::new();
        assert_eq!(table.scan(&blocks), 3);
        assert_eq!(table.bodies(MarkupKind::Model), ["B: {}", "A: {}"]);
        assert_eq!(table.bodies(MarkupKind::Route), ["/a: {}"]);
        assert!(table.bodies(MarkupKind::Meta).is_empty());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn package_is_carried_but_not_classified() {
        let block = RawBlock::new("/* api:route\n/a: {}\n*/").with_package("testapi");
        assert_eq!(block.package.as_deref(), Some("testapi"));
        assert!(classify(&block).is_some());
    }
}

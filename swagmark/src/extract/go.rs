//! Go comment extractor.
//!
//! Walks Go source once, skipping string, raw string and rune literals, and
//! returns the raw text of every comment in source order:
//!
//! - `// ...` comments are one line each, without the trailing newline
//! - `/* ... */` comments keep both delimiters and their inner newlines
//!
//! Carriage returns inside comments are dropped. The package clause is read
//! from the source with comments blanked out.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*package\s+([\p{L}_][\p{L}\p{N}_]*)").unwrap());

/// Comments and package name of one Go file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GoSource {
    pub package: Option<String>,
    pub comments: Vec<String>,
}

/// Extract every comment from Go source text.
pub fn extract(input: &str) -> Result<GoSource> {
    let bytes = input.as_bytes();
    let mut comments = Vec::new();
    // Source with comments replaced by a space, for the package clause.
    let mut code = String::with_capacity(input.len());
    let mut line = 1;
    let mut i = 0;
    let mut copied = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = input[i..].find('\n').map_or(input.len(), |n| i + n);
                comments.push(strip_cr(&input[i..end]));
                code.push_str(&input[copied..i]);
                code.push(' ');
                i = end;
                copied = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let Some(close) = input[i + 2..].find("*/") else {
                    bail!("line {}: comment not terminated", line);
                };
                let end = i + 2 + close + 2;
                let text = &input[i..end];
                line += text.matches('\n').count();
                comments.push(strip_cr(text));
                code.push_str(&input[copied..i]);
                code.push(' ');
                i = end;
                copied = end;
            }
            b'"' => i = skip_quoted(bytes, i, b'"', line)?,
            b'\'' => i = skip_quoted(bytes, i, b'\'', line)?,
            b'`' => {
                let Some(close) = input[i + 1..].find('`') else {
                    bail!("line {}: raw string literal not terminated", line);
                };
                let end = i + 1 + close + 1;
                line += input[i..end].matches('\n').count();
                i = end;
            }
            _ => i += 1,
        }
    }
    code.push_str(&input[copied..]);

    let package = RE_PACKAGE.captures(&code).map(|caps| caps[1].to_string());
    Ok(GoSource { package, comments })
}

/// Skip an interpreted string or rune literal starting at `start`; returns
/// the index just past the closing quote.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8, line: usize) -> Result<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => break,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    let what = if quote == b'"' { "string" } else { "rune" };
    bail!("line {}: {} literal not terminated", line, what)
}

fn strip_cr(text: &str) -> String {
    text.replace('\r', "")
}

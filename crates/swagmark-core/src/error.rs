//! Error taxonomy for the markup engine.
//!
//! Unmatched comment blocks are not errors and never show up here; everything
//! in this module aborts assembly.

use crate::markup::MarkupKind;
use std::fmt;
use thiserror::Error;

/// Error raised while mapping a decoded tree onto a typed document value.
pub type ShapeError = serde::de::value::Error;

/// Line/column position inside a block body, as reported by the YAML parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A block body that could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not well-formed YAML.
    #[error("malformed YAML{}: {source}", at(.location))]
    Syntax {
        text: String,
        location: Option<Location>,
        #[source]
        source: serde_yaml::Error,
    },

    /// The body is valid YAML but does not fit the expected document shape.
    #[error("unexpected structure: {source}")]
    Shape {
        text: String,
        #[source]
        source: ShapeError,
    },
}

fn at(location: &Option<Location>) -> String {
    location.map(|l| format!(" at {}", l)).unwrap_or_default()
}

impl DecodeError {
    pub(crate) fn syntax(text: &str, source: serde_yaml::Error) -> Self {
        let location = source.location().map(|l| Location {
            line: l.line(),
            column: l.column(),
        });
        DecodeError::Syntax {
            text: text.to_string(),
            location,
            source,
        }
    }

    pub(crate) fn shape(text: &str, source: ShapeError) -> Self {
        DecodeError::Shape {
            text: text.to_string(),
            source,
        }
    }

    /// The body text that failed to decode.
    pub fn text(&self) -> &str {
        match self {
            DecodeError::Syntax { text, .. } | DecodeError::Shape { text, .. } => text,
        }
    }

    /// Where the YAML parser gave up, if it reported a position.
    pub fn location(&self) -> Option<Location> {
        match self {
            DecodeError::Syntax { location, .. } => *location,
            DecodeError::Shape { .. } => None,
        }
    }

    fn first_line(&self) -> &str {
        self.text()
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }
}

/// A required top-level property missing after merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required property: 'swagger'")]
    MissingVersion,
    #[error("missing required property: 'info'")]
    MissingInfo,
    #[error("missing required property: 'paths'")]
    MissingPaths,
}

impl ValidationError {
    /// Name of the missing document field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingVersion => "swagger",
            ValidationError::MissingInfo => "info",
            ValidationError::MissingPaths => "paths",
        }
    }
}

/// Failure of a whole assembly run.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("failed to decode {kind} block starting with {:?}", .source.first_line())]
    Decode {
        kind: MarkupKind,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AssemblyError {
    /// The body text that triggered a decode failure.
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            AssemblyError::Decode { source, .. } => Some(source.text()),
            AssemblyError::Validation(_) => None,
        }
    }
}

//! swagmark-core — turn `api:*` comment blocks into a Swagger 2.0 document.
//!
//! Source comments tagged on their first line with `api:meta`, `api:route` or
//! `api:model` carry a YAML body:
//!
//! ```text
//! /* api:route
//! "/pet/{petId}":
//!     Get:
//!         Summary: Find pet by ID
//! */
//! ```
//!
//! The pipeline:
//!
//! 1. **Classify** ([`markup`]): recognize markup blocks and cut out their bodies
//! 2. **Decode** ([`node`]): YAML body → generic tree → typed model
//! 3. **Merge** ([`merge`]): fold bodies into one [`Document`] per kind rules
//! 4. **Validate** ([`mod@validate`]): require `swagger`, `info` and `paths`
//!
//! [`assemble()`] runs all four over the comment blocks of every scanned file.
//! Finding files and pulling comments out of them is left to the caller.

pub mod assemble;
pub mod error;
pub mod markup;
pub mod merge;
pub mod model;
pub mod node;
pub mod validate;

pub use assemble::{assemble, assemble_table, SourceBlocks};
pub use error::{AssemblyError, DecodeError, Location, ValidationError};
pub use markup::{classify, Markup, MarkupKind, MarkupTable, RawBlock};
pub use model::Document;
pub use node::{decode, Node, Scalar};
pub use validate::validate;

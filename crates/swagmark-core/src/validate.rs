//! Required-field checks on a merged document.

use crate::error::ValidationError;
use crate::model::Document;

/// Check `swagger`, `info` and `paths`, in that order.
///
/// An empty `paths` map passes; only an absent one fails.
pub fn validate(doc: &Document) -> Result<(), ValidationError> {
    if doc.swagger.is_empty() {
        return Err(ValidationError::MissingVersion);
    }
    if doc.info.is_none() {
        return Err(ValidationError::MissingInfo);
    }
    if doc.paths.is_none() {
        return Err(ValidationError::MissingPaths);
    }
    Ok(())
}

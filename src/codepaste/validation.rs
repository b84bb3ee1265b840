//! Pre-submit checks for a draft. A draft that fails here is never sent.

use crate::error::CodepasteError;
use crate::model::Draft;

/// Returns the first problem with a title/code pair, if any.
pub fn validate(title: &str, code: &str) -> Option<CodepasteError> {
    match (title.trim().is_empty(), code.trim().is_empty()) {
        (true, true) => Some(CodepasteError::MissingAllFields),
        (true, false) => Some(CodepasteError::MissingTitle),
        (false, true) => Some(CodepasteError::MissingCode),
        (false, false) => None,
    }
}

pub fn validate_draft(draft: &Draft) -> Option<CodepasteError> {
    validate(&draft.title, &draft.code)
}

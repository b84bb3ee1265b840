//! # Search Filter
//!
//! Derives the visible list from the collection and a free-text query. The
//! filter is a pure function: callers re-run it whenever the collection or the
//! query changes.
//!
//! Matching is a case-insensitive substring test on the title only. Result
//! order is collection order.
//!
//! One query shape is refused outright: anything containing `++`. A refused
//! query yields the whole collection and the caller is expected to clear the
//! query it displays.

use crate::error::CodepasteError;
use crate::model::Snippet;

pub const DISALLOWED_TOKEN: &str = "++";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Matched(Vec<&'a Snippet>),
    /// The query was refused; carries the unfiltered collection.
    Rejected(Vec<&'a Snippet>),
}

impl<'a> SearchOutcome<'a> {
    pub fn snippets(&self) -> &[&'a Snippet] {
        match self {
            SearchOutcome::Matched(s) | SearchOutcome::Rejected(s) => s,
        }
    }

    pub fn into_snippets(self) -> Vec<&'a Snippet> {
        match self {
            SearchOutcome::Matched(s) | SearchOutcome::Rejected(s) => s,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SearchOutcome::Rejected(_))
    }
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Checks a query against the sanitization rule without filtering anything.
pub fn check_query(query: &str) -> Result<String, CodepasteError> {
    let normalized = normalize_query(query);
    if normalized.contains(DISALLOWED_TOKEN) {
        return Err(CodepasteError::InvalidQuery(query.to_string()));
    }
    Ok(normalized)
}

pub fn filter<'a>(collection: &'a [Snippet], query: &str) -> SearchOutcome<'a> {
    let term = match check_query(query) {
        Ok(term) => term,
        Err(_) => return SearchOutcome::Rejected(collection.iter().collect()),
    };

    let matched = collection
        .iter()
        .filter(|s| s.title.to_lowercase().contains(&term))
        .collect();
    SearchOutcome::Matched(matched)
}

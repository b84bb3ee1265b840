//! # Display Positions
//!
//! Remote ids are long opaque strings, awkward to type. Listings therefore
//! number snippets 1, 2, 3... by their position in the collection, and
//! commands accept either that position or a raw id.
//!
//! Positions are always taken from the full collection, never from a filtered
//! view, so `codepaste list -s foo` shows the same number for a snippet as a
//! plain `codepaste list` does.
//!
//! A short number is ambiguous when the remote hands out numeric ids. An exact
//! id match wins; only then is the number read as a position. Numbers with a
//! leading zero or sign are never positions.

use crate::error::{CodepasteError, Result};
use crate::model::{Snippet, SnippetId};
use std::fmt;
use std::str::FromStr;

/// A user input naming one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetRef {
    /// 1-based position in the collection.
    Position(usize),
    Id(SnippetId),
}

impl fmt::Display for SnippetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetRef::Position(n) => write!(f, "{}", n),
            SnippetRef::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for SnippetRef {
    type Err = CodepasteError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CodepasteError::NotFound("empty reference".to_string()));
        }
        // Positions are short; anything longer is treated as an id even if numeric.
        if s.len() <= 6 {
            if let Ok(n) = s.parse::<usize>() {
                if n.to_string() == s {
                    return Ok(SnippetRef::Position(n));
                }
            }
        }
        Ok(SnippetRef::Id(SnippetId::new(s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnippet {
    pub snippet: Snippet,
    pub position: usize,
}

/// Pairs each visible snippet with its position in `collection`.
pub fn index_snippets(collection: &[Snippet], visible: &[&Snippet]) -> Vec<DisplaySnippet> {
    // `visible` is an order-preserving subset of `collection`; walk both together.
    let mut positions = collection.iter().enumerate();
    visible
        .iter()
        .filter_map(|wanted| {
            positions
                .by_ref()
                .find(|(_, s)| s.id == wanted.id)
                .map(|(i, s)| DisplaySnippet {
                    snippet: s.clone(),
                    position: i + 1,
                })
        })
        .collect()
}

pub fn resolve(collection: &[Snippet], selector: &SnippetRef) -> Result<SnippetId> {
    match selector {
        SnippetRef::Position(n) => {
            let as_id = n.to_string();
            collection
                .iter()
                .find(|s| s.id.as_str() == as_id)
                .or_else(|| n.checked_sub(1).and_then(|i| collection.get(i)))
                .map(|s| s.id.clone())
                .ok_or_else(|| CodepasteError::NotFound(format!("no snippet at position {}", n)))
        }
        SnippetRef::Id(id) => collection
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.id.clone())
            .ok_or_else(|| CodepasteError::NotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<Snippet> {
        vec![
            Snippet::new("65a1f0aa", "One", "1"),
            Snippet::new("65a1f0bb", "Two", "2"),
            Snippet::new("65a1f0cc", "Three", "3"),
        ]
    }

    #[test]
    fn parses_positions_and_ids() {
        assert_eq!("3".parse::<SnippetRef>().unwrap(), SnippetRef::Position(3));
        assert_eq!(
            "65a1f0bb".parse::<SnippetRef>().unwrap(),
            SnippetRef::Id(SnippetId::from("65a1f0bb"))
        );
        assert_eq!(
            "1234567890".parse::<SnippetRef>().unwrap(),
            SnippetRef::Id(SnippetId::from("1234567890"))
        );
        assert!("  ".parse::<SnippetRef>().is_err());
    }

    #[test]
    fn resolves_position() {
        let snippets = collection();
        let id = resolve(&snippets, &SnippetRef::Position(2)).unwrap();
        assert_eq!(id.as_str(), "65a1f0bb");
    }

    #[test]
    fn numeric_id_wins_over_position() {
        let snippets = vec![
            Snippet::new("2", "Two", "2"),
            Snippet::new("1", "One", "1"),
            Snippet::new("65a1f0cc", "Three", "3"),
        ];
        let one: SnippetRef = "1".parse().unwrap();
        assert_eq!(resolve(&snippets, &one).unwrap().as_str(), "1");

        // No snippet has id "3", so 3 is the third entry.
        let three: SnippetRef = "3".parse().unwrap();
        assert_eq!(resolve(&snippets, &three).unwrap().as_str(), "65a1f0cc");
    }

    #[test]
    fn non_canonical_numbers_are_ids() {
        assert_eq!(
            "007".parse::<SnippetRef>().unwrap(),
            SnippetRef::Id(SnippetId::from("007"))
        );
        assert_eq!(
            "+3".parse::<SnippetRef>().unwrap(),
            SnippetRef::Id(SnippetId::from("+3"))
        );
    }

    #[test]
    fn out_of_range_positions_are_not_found() {
        let snippets = collection();
        assert!(resolve(&snippets, &SnippetRef::Position(0)).is_err());
        assert!(resolve(&snippets, &SnippetRef::Position(4)).is_err());
    }

    #[test]
    fn resolves_known_id_only() {
        let snippets = collection();
        let id = SnippetRef::Id(SnippetId::from("65a1f0cc"));
        assert_eq!(resolve(&snippets, &id).unwrap().as_str(), "65a1f0cc");

        let ghost = SnippetRef::Id(SnippetId::from("ghost"));
        assert_eq!(
            resolve(&snippets, &ghost).unwrap_err(),
            CodepasteError::NotFound("ghost".into())
        );
    }

    #[test]
    fn filtered_view_keeps_collection_positions() {
        let snippets = collection();
        let visible = vec![&snippets[0], &snippets[2]];
        let listed = index_snippets(&snippets, &visible);
        let positions: Vec<_> = listed.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(listed[1].snippet.title, "Three");
    }
}

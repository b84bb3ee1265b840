use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the remote store. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnippetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SnippetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    // The backend is a document store and names its key `_id`.
    #[serde(rename = "_id", alias = "id")]
    pub id: SnippetId,
    pub title: String,
    pub code: String,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Snippet {
    pub fn new(id: impl Into<SnippetId>, title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            code: code.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Code,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Title => f.write_str("title"),
            DraftField::Code => f.write_str("code"),
        }
    }
}

/// The title/code pair being composed or edited. Never part of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub code: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
        }
    }

    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self::new(snippet.title.clone(), snippet.code.clone())
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.title = value,
            DraftField::Code => self.code = value,
        }
    }

    /// The values actually sent to the remote.
    pub fn trimmed(&self) -> (&str, &str) {
        (self.title.trim(), self.code.trim())
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.code.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.code.clear();
    }
}

use crate::error::CodepasteError;
use crate::index::DisplaySnippet;
use crate::model::Snippet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, human-readable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_snippets: Vec<Snippet>,
    pub listed_snippets: Vec<DisplaySnippet>,
    pub messages: Vec<CmdMessage>,
    /// Set when the intent failed; the matching error message is in `messages`.
    pub error: Option<CodepasteError>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.affected_snippets = snippets;
        self
    }

    pub fn with_listed_snippets(mut self, snippets: Vec<DisplaySnippet>) -> Self {
        self.listed_snippets = snippets;
        self
    }

    pub fn success(content: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::success(content));
        result
    }

    /// A failed intent: the error plus its notification text.
    pub fn failure(error: CodepasteError, content: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::error(content));
        result.error = Some(error);
        result
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

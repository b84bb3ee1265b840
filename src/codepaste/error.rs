use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodepasteError {
    /// Network or connectivity failure, including timeouts.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote answered with an unexpected status or a malformed body.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The remote rejected the payload. Holds the server's message when it sent one.
    #[error("{0}")]
    Validation(String),

    #[error("Snippet not found: {0}")]
    NotFound(String),

    #[error("Please fill in the title field")]
    MissingTitle,

    #[error("Please fill in the code field")]
    MissingCode,

    #[error("Please fill in all fields")]
    MissingAllFields,

    #[error("Invalid search term: {0}")]
    InvalidQuery(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Copy was requested with no focused snippet, or one with empty code.
    #[error("No code to copy")]
    NothingToCopy,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Editor error: {0}")]
    Editor(String),
}

impl CodepasteError {
    /// Only a configuration error ends the session; everything else is reported and retried by hand.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CodepasteError::Configuration(_))
    }

    /// Errors raised by the remote client, as opposed to local checks.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CodepasteError::Transport(_)
                | CodepasteError::Protocol(_)
                | CodepasteError::Validation(_)
                | CodepasteError::NotFound(_)
        )
    }

    /// Draft validation errors, which never reach the network.
    pub fn is_validation_gate(&self) -> bool {
        matches!(
            self,
            CodepasteError::MissingTitle
                | CodepasteError::MissingCode
                | CodepasteError::MissingAllFields
        )
    }
}

impl From<reqwest::Error> for CodepasteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CodepasteError::Protocol(err.to_string())
        } else if err.is_timeout() {
            CodepasteError::Transport(format!("request timed out: {}", err))
        } else {
            CodepasteError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CodepasteError>;

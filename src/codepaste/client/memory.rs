use super::SnippetClient;
use crate::error::{CodepasteError, Result};
use crate::model::{Snippet, SnippetId};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

/// In-memory snippet backend for testing and development.
/// Does NOT persist data.
///
/// Mirrors the remote API's observable behavior: ids are assigned on create,
/// blank payloads are rejected, unknown ids are not found.
#[derive(Default)]
pub struct InMemoryClient {
    snippets: RefCell<Vec<Snippet>>,
    next_id: Cell<u64>,
    pending_failure: RefCell<Option<CodepasteError>>,
    calls: Cell<usize>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snippets(snippets: Vec<Snippet>) -> Self {
        let client = Self::new();
        client.next_id.set(snippets.len() as u64);
        *client.snippets.borrow_mut() = snippets;
        client
    }

    /// The next call (of any kind) fails with `err` instead of touching the data.
    pub fn fail_next(&self, err: CodepasteError) {
        *self.pending_failure.borrow_mut() = Some(err);
    }

    /// Number of calls received so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// What the "remote" currently holds.
    pub fn remote_snippets(&self) -> Vec<Snippet> {
        self.snippets.borrow().clone()
    }

    /// Changes the remote behind the store's back, as another client would.
    pub fn remote_remove(&self, id: &SnippetId) {
        self.snippets.borrow_mut().retain(|s| &s.id != id);
    }

    fn begin_call(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        match self.pending_failure.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_payload(title: &str, code: &str) -> Result<()> {
        if title.trim().is_empty() || code.trim().is_empty() {
            return Err(CodepasteError::Validation(
                "Title and code are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SnippetClient for InMemoryClient {
    async fn list(&self) -> Result<Vec<Snippet>> {
        self.begin_call()?;
        Ok(self.snippets.borrow().clone())
    }

    async fn create(&self, title: &str, code: &str) -> Result<Snippet> {
        self.begin_call()?;
        Self::check_payload(title, code)?;

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let snippet = Snippet::new(format!("mem-{}", id), title, code);
        self.snippets.borrow_mut().push(snippet.clone());
        Ok(snippet)
    }

    async fn update(&self, id: &SnippetId, title: &str, code: &str) -> Result<Snippet> {
        self.begin_call()?;
        Self::check_payload(title, code)?;

        let mut snippets = self.snippets.borrow_mut();
        let existing = snippets
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CodepasteError::NotFound(id.to_string()))?;
        existing.title = title.to_string();
        existing.code = code.to_string();
        Ok(existing.clone())
    }

    async fn delete(&self, id: &SnippetId) -> Result<()> {
        self.begin_call()?;

        let mut snippets = self.snippets.borrow_mut();
        let before = snippets.len();
        snippets.retain(|s| &s.id != id);
        if snippets.len() == before {
            return Err(CodepasteError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct ClientFixture {
        snippets: Vec<Snippet>,
    }

    impl Default for ClientFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ClientFixture {
        pub fn new() -> Self {
            Self {
                snippets: Vec::new(),
            }
        }

        pub fn with_snippets(mut self, count: usize) -> Self {
            for _ in 0..count {
                let n = self.snippets.len() + 1;
                self.snippets.push(Snippet::new(
                    format!("mem-{}", n),
                    format!("Test Snippet {}", n),
                    format!("// code for snippet {}", n),
                ));
            }
            self
        }

        pub fn with_snippet(mut self, title: &str, code: &str) -> Self {
            let n = self.snippets.len() + 1;
            self.snippets
                .push(Snippet::new(format!("mem-{}", n), title, code));
            self
        }

        pub fn build(self) -> InMemoryClient {
            InMemoryClient::with_snippets(self.snippets)
        }
    }
}

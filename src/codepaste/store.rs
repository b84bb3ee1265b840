//! # Snippet Store
//!
//! The store owns the canonical in-memory collection of snippets along with
//! the draft, the edit target and the focused snippet. It is the only cache of
//! remote state.
//!
//! ## Consistency
//!
//! The store is pessimistic: the collection changes only after the remote
//! confirms. A failed call leaves the collection and the draft exactly as they
//! were and records the error in `last_error`, so nothing needs rolling back
//! and the user can simply retry.
//!
//! ## Sequencing
//!
//! Every operation borrows the store mutably for its whole duration, network
//! wait included. Two operations therefore cannot interleave on one store;
//! the second starts only after the first has resolved.

use crate::client::SnippetClient;
use crate::error::{CodepasteError, Result};
use crate::model::{Draft, DraftField, Snippet, SnippetId};
use crate::validation::validate_draft;
use log::{debug, warn};
use std::collections::HashSet;

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(Snippet),
    Updated(Snippet),
}

impl Submitted {
    pub fn snippet(&self) -> &Snippet {
        match self {
            Submitted::Created(s) | Submitted::Updated(s) => s,
        }
    }
}

pub struct SnippetStore<C: SnippetClient> {
    client: C,
    collection: Vec<Snippet>,
    draft: Draft,
    edit_target: Option<SnippetId>,
    focused: Option<SnippetId>,
    last_error: Option<CodepasteError>,
}

impl<C: SnippetClient> SnippetStore<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            collection: Vec::new(),
            draft: Draft::default(),
            edit_target: None,
            focused: None,
            last_error: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.collection
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<&SnippetId> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn focused(&self) -> Option<&Snippet> {
        self.focused.as_ref().and_then(|id| self.get(id))
    }

    pub fn last_error(&self) -> Option<&CodepasteError> {
        self.last_error.as_ref()
    }

    pub fn get(&self, id: &SnippetId) -> Option<&Snippet> {
        self.collection.iter().find(|s| &s.id == id)
    }

    pub fn position(&self, id: &SnippetId) -> Option<usize> {
        self.collection.iter().position(|s| &s.id == id)
    }

    /// Replaces the collection with the remote's current list.
    pub async fn refresh(&mut self) -> Result<()> {
        self.last_error = None;
        let fetched = self.client.list().await.map_err(|e| self.record(e))?;
        self.collection = dedupe(fetched);
        debug!("refreshed: {} snippets", self.collection.len());
        Ok(())
    }

    /// Creates or updates from the draft, depending on the edit target.
    pub async fn submit_draft(&mut self) -> Result<Submitted> {
        if let Some(err) = validate_draft(&self.draft) {
            return Err(err);
        }
        self.last_error = None;

        let (title, code) = self.draft.trimmed();
        match self.edit_target.clone() {
            Some(id) => {
                let updated = self
                    .client
                    .update(&id, title, code)
                    .await
                    .map_err(|e| self.record(e))?;
                match self.position(&id) {
                    Some(index) => self.collection[index] = updated.clone(),
                    None => self.upsert(updated.clone()),
                }
                self.draft.clear();
                self.edit_target = None;
                debug!("updated snippet {}", updated.id);
                Ok(Submitted::Updated(updated))
            }
            None => {
                let created = self
                    .client
                    .create(title, code)
                    .await
                    .map_err(|e| self.record(e))?;
                self.upsert(created.clone());
                self.draft.clear();
                debug!("created snippet {}", created.id);
                Ok(Submitted::Created(created))
            }
        }
    }

    /// Deletes remotely, then drops the local entry. Returns the removed snippet.
    pub async fn delete_snippet(&mut self, id: &SnippetId) -> Result<Option<Snippet>> {
        self.last_error = None;
        self.client.delete(id).await.map_err(|e| self.record(e))?;

        let removed = self
            .position(id)
            .map(|index| self.collection.remove(index));
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        debug!("deleted snippet {}", id);
        Ok(removed)
    }

    pub fn begin_edit(&mut self, id: &SnippetId) -> Result<()> {
        let draft = self
            .get(id)
            .map(Draft::from_snippet)
            .ok_or_else(|| CodepasteError::NotFound(id.to_string()))?;
        self.draft = draft;
        self.edit_target = Some(id.clone());
        self.focused = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.draft.clear();
        self.edit_target = None;
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
    }

    pub fn focus(&mut self, id: &SnippetId) -> Result<&Snippet> {
        let index = self
            .position(id)
            .ok_or_else(|| CodepasteError::NotFound(id.to_string()))?;
        self.focused = Some(id.clone());
        Ok(&self.collection[index])
    }

    pub fn unfocus(&mut self) {
        self.focused = None;
    }

    fn record(&mut self, err: CodepasteError) -> CodepasteError {
        warn!("remote call failed: {}", err);
        self.last_error = Some(err.clone());
        err
    }

    fn upsert(&mut self, snippet: Snippet) {
        match self.position(&snippet.id) {
            Some(index) => self.collection[index] = snippet,
            None => self.collection.push(snippet),
        }
    }
}

fn dedupe(snippets: Vec<Snippet>) -> Vec<Snippet> {
    let mut seen = HashSet::new();
    snippets
        .into_iter()
        .filter(|s| {
            let fresh = seen.insert(s.id.clone());
            if !fresh {
                warn!("remote returned duplicate id {}; keeping the first", s.id);
            }
            fresh
        })
        .collect()
}

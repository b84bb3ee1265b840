//! # Remote Snippet Client
//!
//! The [`SnippetClient`] trait is the only path from codepaste to the remote
//! snippet API. Everything above it (store, API facade, CLI) is generic over
//! the trait, so tests can swap the network for an in-memory backend.
//!
//! ## Implementations
//!
//! - [`http::HttpClient`]: Production client speaking JSON over HTTP
//!   - `GET /api/code` lists, `POST /api/snippet` creates
//!   - `PUT` / `DELETE /api/snippet/{id}` update and delete
//!   - Every request carries a bounded timeout
//!
//! - [`memory::InMemoryClient`]: In-memory backend for testing
//!   - Assigns ids, rejects blank payloads like the real API does
//!   - Can be told to fail the next call
//!
//! ## Contract
//!
//! Each call performs exactly one round trip. There are no retries and no
//! caching here; the store is the only cache layer.

use crate::error::Result;
use crate::model::{Snippet, SnippetId};
use async_trait::async_trait;

pub mod http;
pub mod memory;

// Single logical actor: futures need not be Send.
#[async_trait(?Send)]
pub trait SnippetClient {
    /// Fetch every snippet, in server order.
    async fn list(&self) -> Result<Vec<Snippet>>;

    /// Create a snippet; the remote assigns the id.
    async fn create(&self, title: &str, code: &str) -> Result<Snippet>;

    /// Replace title and code of an existing snippet.
    async fn update(&self, id: &SnippetId, title: &str, code: &str) -> Result<Snippet>;

    /// Remove a snippet.
    async fn delete(&self, id: &SnippetId) -> Result<()>;
}

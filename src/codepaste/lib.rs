//! # Codepaste Architecture
//!
//! Codepaste is a **UI-agnostic snippet manager library** for a remote snippet
//! API. The bundled command line is one client of it; a TUI or a web front end
//! would drive the same API.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Dispatches a closed set of user intents                  │
//! │  - Turns outcomes into notifications (CmdResult)            │
//! │  - Exposes read-only projections: visible list, draft, ...  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store Layer (store.rs, filter.rs, validation.rs)           │
//! │  - Canonical in-memory collection, draft, focus             │
//! │  - Applies changes only after the remote confirms           │
//! │  - Pure search filter and draft validation                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client Layer (client/)                                     │
//! │  - Abstract SnippetClient trait                             │
//! │  - HttpClient (production), InMemoryClient (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Pessimistic Sync
//!
//! The remote API is the source of truth. The store never shows a snippet the
//! remote has not confirmed: a create appears only once the server returned its
//! id, an edit lands only once the server accepted it, a delete vanishes only
//! once the server removed it. A failure leaves local state untouched.
//!
//! ## Testing Strategy
//!
//! 1. **Store** (`store.rs`): the sync properties, against `InMemoryClient`.
//! 2. **API** (`api.rs`): intent dispatch and notification wording.
//! 3. **HTTP client** (`tests/http_client.rs`): wire format and status mapping
//!    against a local mock server.
//! 4. **CLI** (`tests/cli.rs`): the binary end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and [`api::Intent`]
//! - [`store`]: The snippet store
//! - [`filter`]: Search with query sanitization
//! - [`validation`]: Draft checks run before any submit
//! - [`client`]: Remote client abstraction and implementations
//! - [`model`]: Core data types (`Snippet`, `SnippetId`, `Draft`)
//! - [`index`]: Display positions and snippet references
//! - [`config`]: Configuration loading
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod index;
pub mod message;
pub mod model;
pub mod store;
pub mod validation;

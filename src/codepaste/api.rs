//! # API Facade
//!
//! The API layer is the **interaction surface** of codepaste: the single entry
//! point any UI (the bundled CLI, a TUI, a web front end) uses to drive the
//! snippet store.
//!
//! ## Intents In, Results Out
//!
//! A UI never calls store operations directly. It raises an [`Intent`], one of
//! a closed set of named user actions, and gets back a [`CmdResult`]: the
//! notifications to show plus any snippets to display. Failures are folded
//! into the result as error messages; nothing is thrown past this layer.
//!
//! Between intents the UI reads projections: [`CodepasteApi::visible`],
//! [`CodepasteApi::draft`], [`CodepasteApi::is_editing`],
//! [`CodepasteApi::focused`], [`CodepasteApi::last_error`] and
//! [`CodepasteApi::query`].
//!
//! ## Generic Over Client and Clipboard
//!
//! `CodepasteApi<C: SnippetClient, K: Clipboard>`:
//! - Production: `CodepasteApi<HttpClient, SystemClipboard>`
//! - Testing: `CodepasteApi<InMemoryClient, MemoryClipboard>`

use crate::client::SnippetClient;
use crate::clipboard::Clipboard;
use crate::error::{CodepasteError, Result};
use crate::filter::{check_query, filter};
use crate::index::{index_snippets, resolve, DisplaySnippet, SnippetRef};
use crate::model::{Draft, DraftField, Snippet, SnippetId};
use crate::store::{SnippetStore, Submitted};
use log::debug;

pub use crate::message::{CmdMessage, CmdResult, MessageLevel};

/// Every action a UI may request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Refresh,
    ChangeDraftField { field: DraftField, value: String },
    SubmitDraft,
    CancelEdit,
    RequestEdit(SnippetId),
    RequestDelete(SnippetId),
    RequestFocus(SnippetId),
    Unfocus,
    ChangeSearchQuery(String),
    CopyFocusedToClipboard,
}

pub struct CodepasteApi<C: SnippetClient, K: Clipboard> {
    store: SnippetStore<C>,
    clipboard: K,
    query: String,
}

impl<C: SnippetClient, K: Clipboard> CodepasteApi<C, K> {
    pub fn new(client: C, clipboard: K) -> Self {
        Self {
            store: SnippetStore::new(client),
            clipboard,
            query: String::new(),
        }
    }

    pub fn store(&self) -> &SnippetStore<C> {
        &self.store
    }

    pub fn clipboard(&self) -> &K {
        &self.clipboard
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The collection filtered by the current query, with display positions.
    pub fn visible(&self) -> Vec<DisplaySnippet> {
        let snippets = self.store.snippets();
        let outcome = filter(snippets, &self.query);
        index_snippets(snippets, outcome.snippets())
    }

    pub fn draft(&self) -> &Draft {
        self.store.draft()
    }

    pub fn is_editing(&self) -> bool {
        self.store.is_editing()
    }

    pub fn focused(&self) -> Option<&Snippet> {
        self.store.focused()
    }

    pub fn last_error(&self) -> Option<&CodepasteError> {
        self.store.last_error()
    }

    /// Turns a user-typed reference into an id present in the collection.
    pub fn resolve(&self, selector: &SnippetRef) -> Result<SnippetId> {
        resolve(self.store.snippets(), selector)
    }

    pub async fn dispatch(&mut self, intent: Intent) -> CmdResult {
        debug!("dispatch {:?}", intent);
        match intent {
            Intent::Refresh => self.refresh().await,
            Intent::ChangeDraftField { field, value } => {
                self.store.set_draft_field(field, value);
                CmdResult::default()
            }
            Intent::SubmitDraft => self.submit_draft().await,
            Intent::CancelEdit => {
                self.store.cancel_edit();
                CmdResult::default()
            }
            Intent::RequestEdit(id) => self.request_edit(&id),
            Intent::RequestDelete(id) => self.request_delete(&id).await,
            Intent::RequestFocus(id) => self.request_focus(&id),
            Intent::Unfocus => {
                self.store.unfocus();
                CmdResult::default()
            }
            Intent::ChangeSearchQuery(query) => self.change_search_query(query),
            Intent::CopyFocusedToClipboard => self.copy_focused(),
        }
    }

    async fn refresh(&mut self) -> CmdResult {
        match self.store.refresh().await {
            Ok(()) => CmdResult::default().with_listed_snippets(self.visible()),
            Err(e) => {
                let text = failure_text("Failed to fetch snippets", &e);
                CmdResult::failure(e, text)
            }
        }
    }

    async fn submit_draft(&mut self) -> CmdResult {
        let fallback = if self.store.is_editing() {
            "Failed to update snippet"
        } else {
            "Failed to add snippet"
        };

        match self.store.submit_draft().await {
            Ok(Submitted::Created(snippet)) => {
                CmdResult::success("Snippet added successfully").with_affected_snippets(vec![snippet])
            }
            Ok(Submitted::Updated(snippet)) => {
                CmdResult::success("Snippet updated successfully")
                    .with_affected_snippets(vec![snippet])
            }
            Err(e) if e.is_validation_gate() => {
                let text = e.to_string();
                CmdResult::failure(e, text)
            }
            Err(e) => {
                let text = failure_text(fallback, &e);
                CmdResult::failure(e, text)
            }
        }
    }

    fn request_edit(&mut self, id: &SnippetId) -> CmdResult {
        match self.store.begin_edit(id) {
            Ok(()) => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::info(format!(
                    "Editing: {}",
                    self.store.draft().title
                )));
                result
            }
            Err(e) => CmdResult::failure(e, "Snippet not found"),
        }
    }

    async fn request_delete(&mut self, id: &SnippetId) -> CmdResult {
        match self.store.delete_snippet(id).await {
            Ok(removed) => CmdResult::success("Snippet deleted successfully")
                .with_affected_snippets(removed.into_iter().collect()),
            Err(e) => {
                let text = failure_text("Failed to delete snippet", &e);
                CmdResult::failure(e, text)
            }
        }
    }

    fn request_focus(&mut self, id: &SnippetId) -> CmdResult {
        match self.store.focus(id) {
            Ok(snippet) => CmdResult::default().with_affected_snippets(vec![snippet.clone()]),
            Err(e) => CmdResult::failure(e, "Snippet not found"),
        }
    }

    fn change_search_query(&mut self, query: String) -> CmdResult {
        match check_query(&query) {
            Ok(_) => {
                self.query = query;
                CmdResult::default().with_listed_snippets(self.visible())
            }
            Err(e) => {
                // A refused query is cleared so the UI stops showing it.
                self.query.clear();
                let mut result = CmdResult::failure(e, "Invalid search term");
                result.listed_snippets = self.visible();
                result
            }
        }
    }

    fn copy_focused(&mut self) -> CmdResult {
        let code = match self.store.focused() {
            Some(snippet) if !snippet.code.is_empty() => snippet.code.clone(),
            _ => {
                let err = CodepasteError::NothingToCopy;
                let text = err.to_string();
                return CmdResult::failure(err, text);
            }
        };

        match self.clipboard.copy(&code) {
            Ok(()) => CmdResult::success("Snippet copied successfully"),
            Err(e) => {
                let text = format!("Failed to copy snippet: {}", e);
                CmdResult::failure(e, text)
            }
        }
    }
}

/// A server-supplied rejection message wins over the generic text.
fn failure_text(fallback: &str, err: &CodepasteError) -> String {
    match err {
        CodepasteError::Validation(message) => message.clone(),
        other => format!("{}: {}", fallback, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::fixtures::ClientFixture;
    use crate::client::memory::InMemoryClient;
    use crate::clipboard::MemoryClipboard;

    type TestApi = CodepasteApi<InMemoryClient, MemoryClipboard>;

    async fn api_with(client: InMemoryClient, clipboard: MemoryClipboard) -> TestApi {
        let mut api = CodepasteApi::new(client, clipboard);
        let result = api.dispatch(Intent::Refresh).await;
        assert!(!result.failed());
        api
    }

    async fn api() -> TestApi {
        let client = ClientFixture::new()
            .with_snippet("FooBar", "let foo = 1;")
            .with_snippet("baz", "let baz = 2;")
            .build();
        api_with(client, MemoryClipboard::new()).await
    }

    fn first_message(result: &CmdResult) -> (MessageLevel, &str) {
        let m = &result.messages[0];
        (m.level, m.content.as_str())
    }

    async fn set_draft(api: &mut TestApi, title: &str, code: &str) {
        api.dispatch(Intent::ChangeDraftField {
            field: DraftField::Title,
            value: title.into(),
        })
        .await;
        api.dispatch(Intent::ChangeDraftField {
            field: DraftField::Code,
            value: code.into(),
        })
        .await;
    }

    #[tokio::test]
    async fn refresh_lists_everything() {
        let mut api = api().await;
        let result = api.dispatch(Intent::Refresh).await;
        assert_eq!(result.listed_snippets.len(), 2);
        assert_eq!(result.listed_snippets[1].position, 2);
    }

    #[tokio::test]
    async fn refresh_failure_is_reported() {
        let mut api = api().await;
        api.store()
            .client()
            .fail_next(CodepasteError::Transport("connection refused".into()));
        let result = api.dispatch(Intent::Refresh).await;
        assert!(result.failed());
        let (level, text) = first_message(&result);
        assert_eq!(level, MessageLevel::Error);
        assert!(text.starts_with("Failed to fetch snippets"));
        assert_eq!(api.visible().len(), 2);
    }

    #[tokio::test]
    async fn submit_reports_create_and_update() {
        let mut api = api().await;
        set_draft(&mut api, "New", "code").await;
        let result = api.dispatch(Intent::SubmitDraft).await;
        assert_eq!(
            first_message(&result),
            (MessageLevel::Success, "Snippet added successfully")
        );

        let id = result.affected_snippets[0].id.clone();
        api.dispatch(Intent::RequestEdit(id)).await;
        assert!(api.is_editing());
        set_draft(&mut api, "Renamed", "code").await;
        let result = api.dispatch(Intent::SubmitDraft).await;
        assert_eq!(
            first_message(&result),
            (MessageLevel::Success, "Snippet updated successfully")
        );
        assert_eq!(api.visible()[2].snippet.title, "Renamed");
    }

    #[tokio::test]
    async fn submit_reports_local_validation() {
        let mut api = api().await;
        set_draft(&mut api, "", "code").await;
        let result = api.dispatch(Intent::SubmitDraft).await;
        assert_eq!(result.error, Some(CodepasteError::MissingTitle));
        assert_eq!(
            first_message(&result),
            (MessageLevel::Error, "Please fill in the title field")
        );
    }

    #[tokio::test]
    async fn server_rejection_message_is_shown() {
        let mut api = api().await;
        set_draft(&mut api, "Title", "code").await;
        api.store()
            .client()
            .fail_next(CodepasteError::Validation("Title already exists".into()));
        let result = api.dispatch(Intent::SubmitDraft).await;
        assert_eq!(first_message(&result).1, "Title already exists");
        assert_eq!(api.draft().title, "Title");
    }

    #[tokio::test]
    async fn failed_update_uses_update_wording() {
        let mut api = api().await;
        let id = api.visible()[0].snippet.id.clone();
        api.dispatch(Intent::RequestEdit(id)).await;
        api.store()
            .client()
            .fail_next(CodepasteError::Transport("reset".into()));
        let result = api.dispatch(Intent::SubmitDraft).await;
        assert!(first_message(&result).1.starts_with("Failed to update snippet"));
    }

    #[tokio::test]
    async fn request_edit_of_stale_id() {
        let mut api = api().await;
        let result = api
            .dispatch(Intent::RequestEdit(SnippetId::from("ghost")))
            .await;
        assert_eq!(first_message(&result), (MessageLevel::Error, "Snippet not found"));
        assert!(!api.is_editing());
    }

    #[tokio::test]
    async fn delete_reports_success() {
        let mut api = api().await;
        let id = api.visible()[0].snippet.id.clone();
        api.dispatch(Intent::RequestFocus(id.clone())).await;

        let result = api.dispatch(Intent::RequestDelete(id)).await;
        assert_eq!(
            first_message(&result),
            (MessageLevel::Success, "Snippet deleted successfully")
        );
        assert_eq!(result.affected_snippets.len(), 1);
        assert!(api.focused().is_none());
        assert_eq!(api.visible().len(), 1);
    }

    #[tokio::test]
    async fn search_filters_visible_list() {
        let mut api = api().await;
        let result = api.dispatch(Intent::ChangeSearchQuery("foo".into())).await;
        assert!(!result.failed());
        assert_eq!(api.query(), "foo");
        assert_eq!(result.listed_snippets.len(), 1);
        assert_eq!(result.listed_snippets[0].snippet.title, "FooBar");
    }

    #[tokio::test]
    async fn invalid_search_resets_query() {
        let mut api = api().await;
        api.dispatch(Intent::ChangeSearchQuery("foo".into())).await;

        let result = api.dispatch(Intent::ChangeSearchQuery("a++b".into())).await;
        assert_eq!(result.error, Some(CodepasteError::InvalidQuery("a++b".into())));
        assert_eq!(first_message(&result).1, "Invalid search term");
        assert_eq!(api.query(), "");
        assert_eq!(result.listed_snippets.len(), 2);
    }

    #[tokio::test]
    async fn copy_focused_snippet() {
        let mut api = api().await;
        let id = api.visible()[1].snippet.id.clone();
        api.dispatch(Intent::RequestFocus(id)).await;

        let result = api.dispatch(Intent::CopyFocusedToClipboard).await;
        assert_eq!(
            first_message(&result),
            (MessageLevel::Success, "Snippet copied successfully")
        );
        assert_eq!(api.clipboard().contents(), Some("let baz = 2;"));
    }

    #[tokio::test]
    async fn copy_without_focus() {
        let mut api = api().await;
        let result = api.dispatch(Intent::CopyFocusedToClipboard).await;
        assert_eq!(first_message(&result), (MessageLevel::Error, "No code to copy"));
        assert_eq!(result.error, Some(CodepasteError::NothingToCopy));
        assert!(api.last_error().is_none());
    }

    #[tokio::test]
    async fn copy_with_denied_clipboard() {
        let client = ClientFixture::new().with_snippets(1).build();
        let mut api = api_with(client, MemoryClipboard::unavailable()).await;
        let id = api.visible()[0].snippet.id.clone();
        api.dispatch(Intent::RequestFocus(id)).await;

        let result = api.dispatch(Intent::CopyFocusedToClipboard).await;
        assert!(matches!(
            result.error,
            Some(CodepasteError::ClipboardUnavailable(_))
        ));
        assert!(first_message(&result).1.starts_with("Failed to copy snippet"));
    }

    #[tokio::test]
    async fn cancel_and_unfocus_are_silent() {
        let mut api = api().await;
        let id = api.visible()[0].snippet.id.clone();
        api.dispatch(Intent::RequestEdit(id.clone())).await;
        assert!(api.dispatch(Intent::CancelEdit).await.messages.is_empty());
        assert!(!api.is_editing());

        api.dispatch(Intent::RequestFocus(id)).await;
        assert!(api.focused().is_some());
        assert!(api.dispatch(Intent::Unfocus).await.messages.is_empty());
        assert!(api.focused().is_none());
    }

    #[test]
    fn resolves_positions_against_collection() {
        let api: TestApi = CodepasteApi::new(InMemoryClient::new(), MemoryClipboard::new());
        assert!(api.resolve(&SnippetRef::Position(1)).is_err());
    }
}

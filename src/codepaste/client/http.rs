use super::SnippetClient;
use crate::config::CodepasteConfig;
use crate::error::{CodepasteError, Result};
use crate::model::{Snippet, SnippetId};
use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LIST_PATH: &str = "/api/code";
const SNIPPET_PATH: &str = "/api/snippet";

#[derive(Serialize)]
struct SnippetPayload<'a> {
    title: &'a str,
    code: &'a str,
}

/// Error bodies look like `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// JSON-over-HTTP client for the snippet API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    base: Url,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodepasteError::Configuration(format!("HTTP client: {}", e)))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| {
            CodepasteError::Configuration(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(CodepasteError::Configuration(format!(
                "invalid base URL '{}'",
                base_url
            )));
        }
        Ok(Self {
            http,
            base_url,
            base,
        })
    }

    /// Builds a client from configuration. Fails when no base URL is configured.
    pub fn from_config(config: &CodepasteConfig) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        Self::new(&base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ids are opaque: each goes in as a single percent-encoded path segment.
    fn snippet_url(&self, id: &SnippetId) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(SNIPPET_PATH.split('/').filter(|s| !s.is_empty()))
                .push(id.as_str());
        }
        url
    }
}

#[async_trait(?Send)]
impl SnippetClient for HttpClient {
    async fn list(&self) -> Result<Vec<Snippet>> {
        let url = self.url(LIST_PATH);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let response = expect_status(response, StatusCode::OK, None).await?;
        decode(response).await
    }

    async fn create(&self, title: &str, code: &str) -> Result<Snippet> {
        let url = self.url(SNIPPET_PATH);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(&SnippetPayload { title, code })
            .send()
            .await?;
        let response = expect_status(response, StatusCode::CREATED, None).await?;
        decode(response).await
    }

    async fn update(&self, id: &SnippetId, title: &str, code: &str) -> Result<Snippet> {
        let url = self.snippet_url(id);
        debug!("PUT {}", url);
        let response = self
            .http
            .put(url)
            .json(&SnippetPayload { title, code })
            .send()
            .await?;
        let response = expect_status(response, StatusCode::OK, Some(id)).await?;
        decode(response).await
    }

    async fn delete(&self, id: &SnippetId) -> Result<()> {
        let url = self.snippet_url(id);
        debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        expect_status(response, StatusCode::OK, Some(id)).await?;
        Ok(())
    }
}

async fn expect_status(
    response: Response,
    expected: StatusCode,
    target: Option<&SnippetId>,
) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let message = server_message(response).await;
    debug!("unexpected status {} (wanted {})", status, expected);
    Err(classify_status(status, message, target))
}

fn classify_status(
    status: StatusCode,
    message: Option<String>,
    target: Option<&SnippetId>,
) -> CodepasteError {
    match status {
        StatusCode::NOT_FOUND => CodepasteError::NotFound(
            target
                .map(|id| id.to_string())
                .or(message)
                .unwrap_or_else(|| "remote resource".to_string()),
        ),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            CodepasteError::Validation(
                message.unwrap_or_else(|| format!("Request rejected ({})", status)),
            )
        }
        _ => match message {
            Some(m) => CodepasteError::Protocol(format!("unexpected status {}: {}", status, m)),
            None => CodepasteError::Protocol(format!("unexpected status {}", status)),
        },
    }
}

async fn server_message(response: Response) -> Option<String> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .map(|body| body.message)
        .filter(|m| !m.trim().is_empty())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CodepasteError::Protocol(format!("malformed response body: {}", e)))
}

//! HTTP client for the external AI backend.
//!
//! Every generator lives at `<ai_service_url>/<kind>` and takes and returns
//! JSON. The backend's own behaviour is opaque; this client only forwards the
//! request, applies the timeout and optional bearer key, and classifies
//! failures.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiKind {
    Tasks,
    Study,
    Translate,
    SeoArticle,
}

impl AiKind {
    pub fn path(self) -> &'static str {
        match self {
            AiKind::Tasks => "tasks",
            AiKind::Study => "study",
            AiKind::Translate => "translate",
            AiKind::SeoArticle => "seo-article",
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI service unreachable: {0}")]
    Transport(String),

    #[error("AI service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("AI service returned an unreadable answer: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct AiGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AiGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AiError> {
        Self::new(
            config.ai_service_url.clone(),
            config.ai_api_key.clone(),
            Duration::from_secs(config.ai_timeout_secs),
        )
    }

    fn url(&self, kind: AiKind) -> String {
        format!("{}/{}", self.base_url, kind.path())
    }

    /// Posts `payload` to the generator and returns its JSON answer.
    pub async fn generate<P: Serialize + ?Sized>(
        &self,
        kind: AiKind,
        payload: &P,
    ) -> Result<Value, AiError> {
        let url = self.url(kind);
        log::info!("Calling AI generator {url}");

        let mut request = self.client.post(&url).json(payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            log::error!("AI request to {url} failed: {e}");
            AiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::error!("Failed to read AI response from {url}: {e}");
            AiError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            log::error!("AI generator {url} answered {status}: {message}");
            return Err(AiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("AI generator {url} sent invalid JSON: {e}");
            AiError::Decode(e.to_string())
        })
    }
}

/// Pulls `message` or `error` out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_generator_names() {
        assert_eq!(AiKind::SeoArticle.path(), "seo-article");
        assert_eq!(AiKind::Tasks.path(), "tasks");
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let gateway =
            AiGateway::new("http://ai.local/v1/", Some(" ".into()), Duration::from_secs(5))
                .unwrap();
        assert_eq!(gateway.url(AiKind::Study), "http://ai.local/v1/study");
        assert!(gateway.api_key.is_none());
    }

    #[test]
    fn error_message_prefers_message_then_error() {
        assert_eq!(
            error_message(r#"{"message":"quota"}"#).as_deref(),
            Some("quota")
        );
        assert_eq!(error_message(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message("oops"), None);
    }
}

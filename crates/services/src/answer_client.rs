use std::env;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use tutorial_core::model::{CheckAnswerRequest, CheckAnswerResponse, ServerErrorBody};

use crate::error::CheckAnswerError;

const CHECK_ANSWER_PATH: &str = "/api/check-answer";

/// Sends console submissions to the tutorial server.
#[async_trait]
pub trait AnswerChecker: Send + Sync {
    /// Evaluate one submission.
    ///
    /// # Errors
    ///
    /// Returns `CheckAnswerError::Server` for non-success statuses and
    /// `CheckAnswerError::Transport` when the request or decoding fails.
    async fn check(
        &self,
        request: &CheckAnswerRequest,
    ) -> Result<CheckAnswerResponse, CheckAnswerError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerClientConfig {
    pub base_url: String,
}

impl AnswerClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `TUTORIAL_SERVER_URL`, falling back to the local dev server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("TUTORIAL_SERVER_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        Self { base_url }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{CHECK_ANSWER_PATH}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for AnswerClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[derive(Clone)]
pub struct HttpAnswerClient {
    client: Client,
    config: AnswerClientConfig,
}

impl HttpAnswerClient {
    #[must_use]
    pub fn new(config: AnswerClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(AnswerClientConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &AnswerClientConfig {
        &self.config
    }
}

#[async_trait]
impl AnswerChecker for HttpAnswerClient {
    async fn check(
        &self,
        request: &CheckAnswerRequest,
    ) -> Result<CheckAnswerResponse, CheckAnswerError> {
        debug!(
            target: "console",
            topic = %request.topic,
            lesson = %request.lesson,
            "posting submission"
        );
        let response = self
            .client
            .post(self.config.endpoint())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The error body is best effort; an unreadable one just loses the detail.
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ServerErrorBody>(&body)
                .ok()
                .and_then(|body| body.detail_text());
            warn!(
                target: "console",
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "check-answer request rejected"
            );
            return Err(CheckAnswerError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AnswerClientConfig::new("http://localhost:8000/");
        assert_eq!(config.endpoint(), "http://localhost:8000/api/check-answer");
    }

    #[test]
    fn default_points_at_local_server() {
        assert_eq!(
            AnswerClientConfig::default().endpoint(),
            "http://127.0.0.1:8000/api/check-answer"
        );
    }
}

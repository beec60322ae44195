use super::models::RequestBody;
use super::response::{extract_error_message, extract_reply};
use crate::error::{ChatError, Result};
use crate::models::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// Anything that can turn a message history into a reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model_id: &str, history: &[Message]) -> Result<String>;
}

/// Chat-completions client for OpenRouter-compatible endpoints.
pub struct CompletionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(api_key: &str, endpoint: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ChatError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, model_id: &str, history: &[Message]) -> Result<String> {
        let request_body = RequestBody {
            model: model_id,
            messages: history,
        };

        log::debug!(
            "POST {} (model={}, {} message(s))",
            self.endpoint,
            model_id,
            history.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        log::debug!("response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::ResponseFormat(format!(
                "status {}: {}",
                status.as_u16(),
                extract_error_message(&body)
            )));
        }

        let response_json: Value = serde_json::from_str(&body)
            .map_err(|e| ChatError::ResponseFormat(format!("Response is not JSON: {}", e)))?;

        extract_reply(&response_json)
    }
}

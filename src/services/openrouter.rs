//! OpenRouter (OpenAI-compatible) chat completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::completion::{CompletionError, CompletionService};
use crate::config::ManagerConfig;
use crate::signals::prompt::ChatMessage;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenRouterClient {
    /// Build a client from configuration. Returns `None` when no API key is set.
    pub fn from_config(config: &ManagerConfig) -> Result<Option<Self>, CompletionError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Some(
            Self::with_client(config.base_url.clone(), api_key, config.model.clone(), client)
                .with_temperature(config.temperature),
        ))
    }

    /// Create with an existing HTTP client and endpoint (used to point at mock servers).
    pub fn with_client(base_url: String, api_key: String, model: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature: crate::config::DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }
}

use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Outbound single-turn chat completion.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Completion>;
}

/// Client for DeepSeek's OpenAI-compatible `/chat/completions` endpoint.
pub struct DeepSeekClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: Option<String>,
}

impl DeepSeekClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
            system_prompt: config.system_prompt,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for DeepSeekClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Completion> {
        let request = prompt.to_request(&self.model, self.system_prompt.as_deref())?;

        debug!(
            "Sending chat completion to {} (context: {:?})",
            self.endpoint, prompt.disease_context
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Chat completion failed with status {}: {}", status, body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::transport(format!("Malformed upstream response: {}", e)))?;

        debug!("Received {} completion choices", body.choices.len());

        body.into_completion()
    }
}

//! Gemini-backed solver built on the `llm` crate.

use super::gateway::{
    CONNECTION_ERROR, NOT_CONFIGURED, SolverGateway, answer_or_fallback, build_prompt,
};
use crate::config::AiConfig;
use futures::FutureExt;
use futures::future::BoxFuture;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatProvider};
use std::time::Duration;

const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for Google's Gemini models.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client from configuration, reading the key from the
    /// environment when the config has none or a blank one. A disabled solver
    /// gets no key.
    pub fn from_config(config: &AiConfig) -> Self {
        let api_key = resolve_key(config, std::env::var(API_KEY_ENV).ok());

        Self {
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Whether this client has a key to call the service with.
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, query: &str) -> anyhow::Result<Option<String>> {
        let provider = LLMBuilder::new()
            .backend(LLMBackend::Google)
            .api_key(api_key)
            .model(&self.model)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let messages = vec![ChatMessage::user().content(build_prompt(query)).build()];
        let response = provider.chat(&messages).await?;
        Ok(response.text())
    }
}

/// Pick the key to use: a non-blank config key, else a non-blank
/// environment key. A disabled solver gets none.
fn resolve_key(config: &AiConfig, env_key: Option<String>) -> Option<String> {
    if !config.enabled {
        return None;
    }

    let non_blank = |key: &String| !key.trim().is_empty();
    config
        .api_key
        .clone()
        .filter(non_blank)
        .or_else(|| env_key.filter(non_blank))
}

impl SolverGateway for GeminiClient {
    fn solve<'a>(&'a self, query: &'a str) -> BoxFuture<'a, String> {
        async move {
            let Some(api_key) = self.api_key.as_deref() else {
                tracing::warn!("AI solver called without an API key");
                return NOT_CONFIGURED.to_string();
            };

            tracing::debug!(model = %self.model, "Sending query to Gemini");
            match tokio::time::timeout(self.timeout, self.request(api_key, query)).await {
                Ok(Ok(text)) => answer_or_fallback(text),
                Ok(Err(e)) => {
                    tracing::error!("Gemini error: {}", e);
                    CONNECTION_ERROR.to_string()
                }
                Err(_) => {
                    tracing::error!("Gemini request timed out after {:?}", self.timeout);
                    CONNECTION_ERROR.to_string()
                }
            }
        }
        .boxed()
    }
}

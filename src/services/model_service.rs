use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// A text-completion model: one prompt in, free text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint. Gemini is
/// reached through its `/v1beta/openai` compatibility layer.
pub struct OpenAiCompatibleModel {
    client: Client<OpenAIConfig>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleModel {
    pub fn new(api_base: &str, api_key: &SecretString, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key.expose_secret());

        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompatibleModel {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        log::info!("Requesting completion from model '{}'", self.model);

        let reply: ChatCompletionReply = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| AppError::AIGenerationError(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::AIGenerationError("model returned no text".to_string()))
    }
}

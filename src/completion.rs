#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use async_openai::{Client, config::OpenAIConfig, types::CreateChatCompletionRequest};
use async_trait::async_trait;
use tracing::info;

use crate::{config, config::OpenAiEnv, error::CompletionError, prompt::Prompt};

/// Boundary to the text-completion backend. The orchestrator issues exactly
/// one `complete` call per student and never retries; any retry or backoff
/// policy belongs to the implementation behind this trait.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the prompt and returns the generated feedback text.
    async fn complete(&self, prompt: Prompt) -> Result<String, CompletionError>;
}

/// Chat-completion backend over the OpenAI API.
pub struct OpenAiService {
    /// Endpoint, credentials, and sampling parameters.
    env:     OpenAiEnv,
    /// Deadline for a single request.
    timeout: Duration,
}

impl OpenAiService {
    /// Creates a service from an explicit environment bundle.
    pub fn new(env: OpenAiEnv, timeout: Duration) -> Self {
        Self { env, timeout }
    }

    /// Creates a service from the global configuration, failing when the
    /// required OpenAI environment variables are absent.
    pub fn from_config() -> Result<Self, CompletionError> {
        let env = config::openai_config().ok_or(CompletionError::MissingConfig)?;
        Ok(Self::new(env, config::completion_timeout()))
    }
}

#[async_trait]
impl CompletionService for OpenAiService {
    async fn complete(&self, prompt: Prompt) -> Result<String, CompletionError> {
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(self.env.api_base())
                .with_api_key(self.env.api_key()),
        );

        let request = CreateChatCompletionRequest {
            model: self.env.model().to_string(),
            messages: prompt.into_messages(),
            temperature: self.env.temperature(),
            top_p: self.env.top_p(),
            n: Some(1),
            stream: Some(false),
            ..Default::default()
        };

        info!("Requesting chat completion from {}", self.env.api_base());
        let response = tokio::time::timeout(self.timeout, client.chat().create(request))
            .await
            .map_err(|_| CompletionError::Timeout(self.timeout.as_secs()))??;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(CompletionError::EmptyResponse)
    }
}

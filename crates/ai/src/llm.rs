//! LLM client seam and its rig-core implementation.

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{
    client::{CompletionClient, Nothing},
    completion::{Chat, Message},
    message::{AssistantContent, Text, UserContent},
    providers::{groq, ollama, openai},
    OneOrMany,
};

use crate::error::AiError;
use crate::types::{ChatMessage, MessageRole};

/// A model that completes one chat turn.
///
/// Expected to fail by timeout or provider error rather than hang; the
/// orchestrator converts any failure into a fallback reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        preamble: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError>;
}

/// Connection settings for [`RigLlmClient`].
pub struct LlmConfig {
    /// Provider id: "groq", "ollama", or anything OpenAI-compatible.
    pub provider_id: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Base URL override, used by ollama.
    pub base_url: Option<String>,
}

/// LLM client over rig-core provider agents.
pub struct RigLlmClient {
    config: LlmConfig,
}

impl RigLlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey(self.config.provider_id.clone()))
    }
}

fn to_rig_history(history: &[ChatMessage]) -> Vec<Message> {
    history
        .iter()
        .map(|msg| match msg.role {
            MessageRole::User => Message::User {
                content: OneOrMany::one(UserContent::Text(Text {
                    text: msg.content.clone(),
                })),
            },
            MessageRole::Assistant => Message::Assistant {
                id: None,
                content: OneOrMany::one(AssistantContent::Text(Text {
                    text: msg.content.clone(),
                })),
            },
        })
        .collect()
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn complete(
        &self,
        preamble: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError> {
        let history = to_rig_history(history);
        debug!(
            "Completing chat turn with provider {} model {} ({} history messages)",
            self.config.provider_id,
            self.config.model,
            history.len()
        );

        let response = match self.config.provider_id.as_str() {
            "groq" => {
                let client: groq::Client<HttpClient> = groq::Client::new(self.api_key()?)
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                client
                    .agent(&self.config.model)
                    .preamble(preamble)
                    .build()
                    .chat(message, history)
                    .await
                    .map_err(|e| AiError::Provider(e.to_string()))?
            }
            "ollama" => {
                let mut builder = ollama::Client::<HttpClient>::builder().api_key(Nothing);
                if let Some(url) = &self.config.base_url {
                    builder = builder.base_url(url);
                }
                let client = builder
                    .build()
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                client
                    .agent(&self.config.model)
                    .preamble(preamble)
                    .build()
                    .chat(message, history)
                    .await
                    .map_err(|e| AiError::Provider(e.to_string()))?
            }
            _ => {
                // Default to OpenAI-compatible
                let client: openai::Client<HttpClient> = openai::Client::new(self.api_key()?)
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                client
                    .agent(&self.config.model)
                    .preamble(preamble)
                    .build()
                    .chat(message, history)
                    .await
                    .map_err(|e| AiError::Provider(e.to_string()))?
            }
        };

        Ok(response.trim().to_string())
    }
}

// ============================================================================
// Fake client for testing
// ============================================================================

/// Records one observed `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub preamble: String,
    pub history_len: usize,
    pub message: String,
}

/// Fake LLM client that replies with a fixed string or fails, recording
/// every call it receives.
pub struct FakeLlmClient {
    reply: Option<String>,
    calls: std::sync::Mutex<Vec<RecordedCall>>,
}

impl FakeLlmClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(
        &self,
        preamble: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            preamble: preamble.to_string(),
            history_len: history.len(),
            message: message.to_string(),
        });
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(AiError::Provider("simulated provider outage".to_string())),
        }
    }
}

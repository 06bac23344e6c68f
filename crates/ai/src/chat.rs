//! Chat orchestrator: session bookkeeping, grounding, and LLM dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use uuid::Uuid;

use folio_core::portfolio::PortfolioStoreTrait;

use crate::error::AiError;
use crate::llm::LlmClient;
use crate::prompt::{portfolio_context, system_preamble};
use crate::types::{
    ChatMessage, ChatResponse, ChatSession, SendMessageRequest, SessionRepositoryTrait,
    SessionSummary,
};

/// Prior messages included in the prompt, most recent first retained.
pub const HISTORY_WINDOW: usize = 10;

/// Assistant reply used when the provider call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

#[async_trait]
pub trait ChatServiceTrait: Send + Sync {
    /// Run one chat turn.
    ///
    /// Never fails on provider errors; those degrade to [`FALLBACK_REPLY`],
    /// which is appended so the transcript stays faithful.
    async fn send_message(&self, request: SendMessageRequest) -> Result<ChatResponse, AiError>;

    fn create_session(&self) -> ChatSession;
    fn list_sessions(&self) -> Vec<SessionSummary>;
    fn get_session(&self, id: &Uuid) -> Result<ChatSession, AiError>;
    fn delete_session(&self, id: &Uuid) -> Result<(), AiError>;

    /// Empty a session's transcript while keeping the session listed.
    fn reset_session(&self, id: &Uuid) -> Result<ChatSession, AiError>;
}

pub struct ChatService {
    repository: Arc<dyn SessionRepositoryTrait>,
    llm: Arc<dyn LlmClient>,
    portfolio_store: Arc<dyn PortfolioStoreTrait>,
    history_window: usize,
}

impl ChatService {
    pub fn new(
        repository: Arc<dyn SessionRepositoryTrait>,
        llm: Arc<dyn LlmClient>,
        portfolio_store: Arc<dyn PortfolioStoreTrait>,
    ) -> Self {
        Self {
            repository,
            llm,
            portfolio_store,
            history_window: HISTORY_WINDOW,
        }
    }
}

#[async_trait]
impl ChatServiceTrait for ChatService {
    async fn send_message(&self, request: SendMessageRequest) -> Result<ChatResponse, AiError> {
        let message = request.message.trim().to_string();
        if message.is_empty() {
            return Err(AiError::invalid_input("Message must not be empty"));
        }

        let session = self.repository.get_or_create(request.session_id);

        // The user message lands in the transcript before anything that can
        // fail, so a failed turn never forgets what triggered it.
        let session = self
            .repository
            .append(&session.id, ChatMessage::user(&message))?;

        // One snapshot read per turn; a concurrent refresh cannot hand us
        // half-replaced state.
        let snapshot = self.portfolio_store.get();
        let preamble = system_preamble(&portfolio_context(snapshot.as_deref()));

        let prior = &session.messages[..session.messages.len() - 1];
        let window_start = prior.len().saturating_sub(self.history_window);
        let history = &prior[window_start..];

        let reply = match self.llm.complete(&preamble, history, &message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("LLM call failed for session {}: {}", session.id, e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.repository
            .append(&session.id, ChatMessage::assistant(&reply))?;

        info!("Completed chat turn for session {}", session.id);
        Ok(ChatResponse {
            session_id: session.id,
            reply,
        })
    }

    fn create_session(&self) -> ChatSession {
        self.repository.create()
    }

    fn list_sessions(&self) -> Vec<SessionSummary> {
        self.repository.list()
    }

    fn get_session(&self, id: &Uuid) -> Result<ChatSession, AiError> {
        self.repository.get(id)
    }

    fn delete_session(&self, id: &Uuid) -> Result<(), AiError> {
        self.repository.delete(id)
    }

    fn reset_session(&self, id: &Uuid) -> Result<ChatSession, AiError> {
        self.repository.clear(id)
    }
}

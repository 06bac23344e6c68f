//! Portfolio-grounded chat for the folio backend.
//!
//! Sessions live in an in-memory repository; each turn reads the current
//! portfolio snapshot once, renders it into the system prompt, and dispatches
//! to an LLM provider through rig-core. Provider failures degrade to a fixed
//! fallback reply instead of failing the turn.

pub mod chat;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod repository;
pub mod title;
pub mod types;

pub use chat::{ChatService, ChatServiceTrait, FALLBACK_REPLY, HISTORY_WINDOW};
pub use error::AiError;
pub use llm::{FakeLlmClient, LlmClient, LlmConfig, RigLlmClient};
pub use repository::InMemorySessionRepository;
pub use types::{
    ChatMessage, ChatResponse, ChatSession, MessageRole, SendMessageRequest,
    SessionRepositoryTrait, SessionSummary,
};

//! Shared types for the chat layer: sessions, messages, and the
//! request/response shapes of the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AiError;

/// Title a session carries until its first user message names it.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Max characters of the first user message used as the session title.
pub const TITLE_MAX_CHARS: usize = 50;

/// Oldest messages are evicted past this per-session cap.
pub const MAX_MESSAGES_PER_SESSION: usize = 50;

// ============================================================================
// Domain types
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry in a session's append-only transcript.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A persisted conversation thread.
///
/// `last_active_at` is the explicit sort key for the sidebar listing;
/// ordering is never inferred from insertion order.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            created_at: now,
            last_active_at: now,
            messages: Vec::new(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            title: self.title.clone(),
            created_at: self.created_at,
            last_active_at: self.last_active_at,
            message_count: self.messages.len(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Listing row for the session sidebar; no transcript attached.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub message_count: usize,
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
}

// ============================================================================
// Repository seam
// ============================================================================

/// Storage for chat sessions.
///
/// Appends to one session are serialized; different sessions are independent.
/// All operations complete without blocking on I/O.
pub trait SessionRepositoryTrait: Send + Sync {
    /// Create an empty session with the default title.
    fn create(&self) -> ChatSession;

    /// Fetch the session with the given id, creating it fresh when the id is
    /// absent or unknown.
    fn get_or_create(&self, id: Option<Uuid>) -> ChatSession;

    /// All sessions, most recently active first.
    fn list(&self) -> Vec<SessionSummary>;

    fn get(&self, id: &Uuid) -> Result<ChatSession, AiError>;

    /// Append one message, returning the updated session.
    ///
    /// The first user message renames a still-default title; every append
    /// bumps `last_active_at` and evicts the oldest messages past
    /// [`MAX_MESSAGES_PER_SESSION`].
    fn append(&self, id: &Uuid, message: ChatMessage) -> Result<ChatSession, AiError>;

    /// Empty the transcript while keeping the session listed.
    fn clear(&self, id: &Uuid) -> Result<ChatSession, AiError>;

    fn delete(&self, id: &Uuid) -> Result<(), AiError>;
}

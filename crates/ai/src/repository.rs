//! In-memory session storage.

use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AiError;
use crate::title::truncate_to_title;
use crate::types::{
    ChatMessage, ChatSession, MessageRole, SessionRepositoryTrait, SessionSummary,
    DEFAULT_SESSION_TITLE, MAX_MESSAGES_PER_SESSION, TITLE_MAX_CHARS,
};

/// Session repository backed by a concurrent map.
///
/// `DashMap` locks per entry, so two appends to the same session are
/// serialized while appends to different sessions proceed in parallel.
pub struct InMemorySessionRepository {
    sessions: DashMap<Uuid, ChatSession>,
    max_messages: usize,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            max_messages: MAX_MESSAGES_PER_SESSION,
        }
    }

    #[cfg(test)]
    fn with_max_messages(max_messages: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_messages,
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepositoryTrait for InMemorySessionRepository {
    fn create(&self) -> ChatSession {
        let session = ChatSession::new();
        self.sessions.insert(session.id, session.clone());
        session
    }

    fn get_or_create(&self, id: Option<Uuid>) -> ChatSession {
        match id {
            // A client-held id is honored even after a server restart dropped
            // the session it referred to.
            Some(id) => self
                .sessions
                .entry(id)
                .or_insert_with(|| ChatSession {
                    id,
                    ..ChatSession::new()
                })
                .clone(),
            None => self.create(),
        }
    }

    fn list(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> =
            self.sessions.iter().map(|s| s.summary()).collect();
        summaries.sort_by(|a, b| {
            b.last_active_at
                .cmp(&a.last_active_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        summaries
    }

    fn get(&self, id: &Uuid) -> Result<ChatSession, AiError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| AiError::SessionNotFound(id.to_string()))
    }

    fn append(&self, id: &Uuid, message: ChatMessage) -> Result<ChatSession, AiError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| AiError::SessionNotFound(id.to_string()))?;
        let session = entry.value_mut();

        if session.title == DEFAULT_SESSION_TITLE && message.role == MessageRole::User {
            let title = truncate_to_title(&message.content, TITLE_MAX_CHARS);
            if !title.is_empty() {
                session.title = title;
            }
        }

        session.last_active_at = message.timestamp;
        session.messages.push(message);

        if session.messages.len() > self.max_messages {
            let excess = session.messages.len() - self.max_messages;
            session.messages.drain(..excess);
        }

        Ok(session.clone())
    }

    fn clear(&self, id: &Uuid) -> Result<ChatSession, AiError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| AiError::SessionNotFound(id.to_string()))?;
        let session = entry.value_mut();
        session.messages.clear();
        session.last_active_at = chrono::Utc::now();
        Ok(session.clone())
    }

    fn delete(&self, id: &Uuid) -> Result<(), AiError> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AiError::SessionNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_user_message_names_the_session() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create();
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);

        let session = repo
            .append(&session.id, ChatMessage::user("How is my portfolio doing?"))
            .unwrap();
        assert_eq!(session.title, "How is my portfolio doing?");

        // A later user message does not rename it.
        let session = repo
            .append(&session.id, ChatMessage::user("And what about INFY?"))
            .unwrap();
        assert_eq!(session.title, "How is my portfolio doing?");
    }

    #[test]
    fn long_first_message_is_truncated_for_title() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create();
        let long = "Could you please walk me through the complete breakdown of every holding I own";
        let session = repo.append(&session.id, ChatMessage::user(long)).unwrap();
        assert!(session.title.chars().count() <= TITLE_MAX_CHARS + 3);
        assert!(session.title.ends_with("..."));
    }

    #[test]
    fn assistant_message_never_sets_the_title() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create();
        let session = repo
            .append(&session.id, ChatMessage::assistant("Hello!"))
            .unwrap();
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn list_orders_by_recent_activity() {
        let repo = InMemorySessionRepository::new();
        let first = repo.create();
        let second = repo.create();

        repo.append(&first.id, ChatMessage::user("newer activity"))
            .unwrap();

        let listed = repo.list();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn cap_evicts_oldest_messages() {
        let repo = InMemorySessionRepository::with_max_messages(3);
        let session = repo.create();
        for i in 0..5 {
            repo.append(&session.id, ChatMessage::user(format!("message {}", i)))
                .unwrap();
        }
        let session = repo.get(&session.id).unwrap();
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[0].content, "message 2");
        assert_eq!(session.messages[2].content, "message 4");
    }

    #[test]
    fn clear_empties_transcript_but_keeps_session() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create();
        repo.append(&session.id, ChatMessage::user("hello")).unwrap();

        let session = repo.clear(&session.id).unwrap();
        assert!(session.messages.is_empty());
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn delete_then_get_fails() {
        let repo = InMemorySessionRepository::new();
        let session = repo.create();
        repo.delete(&session.id).unwrap();
        assert!(matches!(
            repo.get(&session.id),
            Err(AiError::SessionNotFound(_))
        ));
        assert!(matches!(
            repo.delete(&session.id),
            Err(AiError::SessionNotFound(_))
        ));
    }

    #[test]
    fn get_or_create_honors_a_client_held_id() {
        let repo = InMemorySessionRepository::new();
        let id = Uuid::new_v4();
        let session = repo.get_or_create(Some(id));
        assert_eq!(session.id, id);

        // Subsequent calls reuse the same session.
        repo.append(&id, ChatMessage::user("hi")).unwrap();
        let again = repo.get_or_create(Some(id));
        assert_eq!(again.messages.len(), 1);
    }
}

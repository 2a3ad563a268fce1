//! A chat session with the coach.

use log::{debug, warn};

use crate::assessment::AssessmentSnapshot;
use crate::coach::greeting::greeting;
use crate::coach::{ChatMessage, ChatRequest, CoachClient, CoachError};
use crate::store::{load_json, save_json, SessionStore, StoreError};

/// Assistant message shown in place of a reply when the coach cannot answer.
pub const FALLBACK_REPLY: &str = "Sorry, I ran into a problem. Please try again later.";

/// Store key for the saved chat history.
pub const CHAT_HISTORY_KEY: &str = "coach_history";

/// Messages exchanged with the coach, opened by a greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    user_id: String,
    snapshot: Option<AssessmentSnapshot>,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation with a greeting derived from the snapshot.
    pub fn new(user_id: impl Into<String>, snapshot: Option<AssessmentSnapshot>) -> Self {
        let opening = ChatMessage::assistant(greeting(snapshot.as_ref()));
        Self {
            user_id: user_id.into(),
            snapshot,
            messages: vec![opening],
        }
    }

    /// Continue from earlier messages, or start fresh when there are none.
    pub fn resume(
        user_id: impl Into<String>,
        snapshot: Option<AssessmentSnapshot>,
        history: Vec<ChatMessage>,
    ) -> Self {
        if history.is_empty() {
            return Self::new(user_id, snapshot);
        }
        Self {
            user_id: user_id.into(),
            snapshot,
            messages: history,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Send `input` to the coach and append its reply.
    ///
    /// Blank input is ignored and returns `Ok(None)`. On failure the
    /// fallback reply is appended and the error is returned, so the caller
    /// can both show something and tell that the coach did not answer.
    pub fn send<C: CoachClient + ?Sized>(
        &mut self,
        client: &C,
        input: &str,
    ) -> Result<Option<&ChatMessage>, CoachError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let request = ChatRequest {
            message: input.to_string(),
            user_id: self.user_id.clone(),
            chat_history: self.messages.clone(),
            assessment_results: self.snapshot.clone(),
        };
        self.messages.push(ChatMessage::user(input));

        match client.send(&request) {
            Ok(reply) => {
                debug!("Coach replied with {} characters", reply.len());
                self.messages.push(ChatMessage::assistant(reply));
                Ok(self.messages.last())
            }
            Err(e) => {
                warn!("Coach request failed: {}", e);
                self.messages.push(ChatMessage::assistant(FALLBACK_REPLY));
                Err(e)
            }
        }
    }
}

/// Persist the conversation's messages.
pub fn save_history<S: SessionStore + ?Sized>(
    store: &S,
    conversation: &Conversation,
) -> Result<(), StoreError> {
    save_json(store, CHAT_HISTORY_KEY, &conversation.messages)
}

/// Load previously saved messages; empty when none were saved.
pub fn load_history<S: SessionStore + ?Sized>(store: &S) -> Result<Vec<ChatMessage>, StoreError> {
    Ok(load_json(store, CHAT_HISTORY_KEY)?.unwrap_or_default())
}

/// Forget the saved messages.
pub fn clear_history<S: SessionStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    store.remove(CHAT_HISTORY_KEY)
}

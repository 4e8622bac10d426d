//! Conversation messages and recorded intents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::IntentKind;
use crate::state::ConversationState;

/// Who said a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Bot => "bot",
        }
    }
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Intent classified for this message (user messages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentKind>,
    /// State the conversation was in when the message was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ConversationState>,
}

impl Message {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
            intent: None,
            state: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Bot, text)
    }

    pub fn with_intent(mut self, intent: IntentKind) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_state(mut self, state: ConversationState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Intent observation kept in the bounded per-session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedIntent {
    pub kind: IntentKind,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl RecordedIntent {
    pub fn new(kind: IntentKind, confidence: f32) -> Self {
        Self {
            kind,
            confidence,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builders() {
        let msg = Message::user("I need a website")
            .with_intent(IntentKind::GetStarted)
            .with_state(ConversationState::Welcome);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.intent, Some(IntentKind::GetStarted));
        assert_eq!(msg.state, Some(ConversationState::Welcome));
    }

    #[test]
    fn test_recorded_intent() {
        let rec = RecordedIntent::new(IntentKind::QuoteRequest, 0.9);
        assert_eq!(rec.kind, IntentKind::QuoteRequest);
    }
}

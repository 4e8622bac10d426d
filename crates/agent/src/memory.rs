//! Session-scoped conversation memory
//!
//! An owned value passed in and out of every turn. No ambient state: the
//! host checks a memory out of the store, runs a turn against it, and
//! commits it back.

use chatbot_config::SessionConfig;
use chatbot_core::{
    ConversationProfile, ConversationState, LeadScore, Message, Recommendation, RecordedIntent,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-shot conversation flags, mostly "already asked X" markers that keep
/// the question planner from repeating itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub has_greeted: bool,
    pub asked_business_type: bool,
    pub asked_budget: bool,
    pub asked_timeline: bool,
    pub asked_features: bool,
    pub showed_recommendation: bool,
    pub showed_form_cta: bool,
    pub has_objections: bool,
}

/// Session statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: Uuid,
    pub duration_seconds: i64,
    pub message_count: u32,
    pub current_state: ConversationState,
    pub lead_score: u8,
    pub lead_level: chatbot_core::LeadLevel,
    /// Percent of scalar qualification fields known
    pub completion_rate: u8,
}

/// All state for one conversation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMemory {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub current_state: ConversationState,
    /// Counts both user and bot messages
    pub message_count: u32,
    pub profile: ConversationProfile,
    messages: Vec<Message>,
    intent_history: Vec<RecordedIntent>,
    /// State after each turn, repeats included; stagnation detection
    /// inspects the tail of this list
    state_history: Vec<ConversationState>,
    pub lead_score: LeadScore,
    pub recommendation: Option<Recommendation>,
    pub flags: SessionFlags,
    #[serde(default)]
    limits: SessionConfig,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(limits: SessionConfig) -> Self {
        let state = ConversationState::default();
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            current_state: state,
            message_count: 0,
            profile: ConversationProfile::default(),
            messages: Vec::new(),
            intent_history: Vec::new(),
            state_history: vec![state],
            lead_score: LeadScore::cold(),
            recommendation: None,
            flags: SessionFlags::default(),
            limits,
        }
    }

    /// Append a message and bump the count, dropping the oldest past the cap
    pub fn record_message(&mut self, message: Message) {
        self.messages.push(message);
        self.message_count += 1;
        if self.messages.len() > self.limits.max_messages {
            let overflow = self.messages.len() - self.limits.max_messages;
            self.messages.drain(..overflow);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == chatbot_core::MessageRole::User)
    }

    /// Append to the bounded intent history
    pub fn push_intent(&mut self, intent: RecordedIntent) {
        self.intent_history.push(intent);
        if self.intent_history.len() > self.limits.max_intent_history {
            let overflow = self.intent_history.len() - self.limits.max_intent_history;
            self.intent_history.drain(..overflow);
        }
    }

    pub fn intent_history(&self) -> &[RecordedIntent] {
        &self.intent_history
    }

    /// The last `recent_intent_window` intents, most recent last
    pub fn recent_intents(&self) -> &[RecordedIntent] {
        let window = self.limits.recent_intent_window;
        let start = self.intent_history.len().saturating_sub(window);
        &self.intent_history[start..]
    }

    /// Move to (or stay in) a state, recording it in the history. A turn
    /// that stays put still records its state so stagnation is observable.
    pub fn update_state(&mut self, new_state: ConversationState) {
        self.current_state = new_state;
        self.state_history.push(new_state);
        if self.state_history.len() > self.limits.max_messages {
            let overflow = self.state_history.len() - self.limits.max_messages;
            self.state_history.drain(..overflow);
        }
    }

    pub fn state_history(&self) -> &[ConversationState] {
        &self.state_history
    }

    /// Merge extracted entities into the profile (scalars overwrite when
    /// present, sets union)
    pub fn merge_entities(&mut self, extracted: &ConversationProfile) {
        self.profile.merge(extracted);
    }

    /// Session age relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.started_at
    }

    /// True once the session has outlived the configured expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age(now) > Duration::hours(self.limits.expiry_hours as i64)
    }

    pub fn limits(&self) -> &SessionConfig {
        &self.limits
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.session_id,
            duration_seconds: self.age(Utc::now()).num_seconds(),
            message_count: self.message_count,
            current_state: self.current_state,
            lead_score: self.lead_score.score,
            lead_level: self.lead_score.level,
            completion_rate: self.profile.completion_rate(),
        }
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

//! Session and call-to-action policy

use serde::{Deserialize, Serialize};

/// Session lifetime and history bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions expire this many hours after they start
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u32,
    /// Transcript cap; oldest messages are dropped beyond this
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
    /// Intent history cap
    #[serde(default = "default_max_intent_history")]
    pub max_intent_history: usize,
    /// How many recent intents scoring and CTA checks look at
    #[serde(default = "default_recent_intent_window")]
    pub recent_intent_window: usize,

    /// Quote-form CTA: minimum messages exchanged
    #[serde(default = "default_cta_min_messages")]
    pub cta_min_messages: u32,
    /// Quote-form CTA: minimum lead score
    #[serde(default = "default_cta_min_lead_score")]
    pub cta_min_lead_score: u8,
}

fn default_expiry_hours() -> u32 {
    24
}
fn default_max_messages() -> usize {
    50
}
fn default_max_intent_history() -> usize {
    10
}
fn default_recent_intent_window() -> usize {
    5
}
fn default_cta_min_messages() -> u32 {
    5
}
fn default_cta_min_lead_score() -> u8 {
    40
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_hours: default_expiry_hours(),
            max_messages: default_max_messages(),
            max_intent_history: default_max_intent_history(),
            recent_intent_window: default_recent_intent_window(),
            cta_min_messages: default_cta_min_messages(),
            cta_min_lead_score: default_cta_min_lead_score(),
        }
    }
}

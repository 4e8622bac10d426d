//! Core types for the sales chatbot conversation engine
//!
//! This crate provides the foundational types used across all other crates:
//! - Conversation states and the terminal-state contract
//! - The visitor profile and its monotonic merge rules
//! - Intent kinds, classification results, and confidence bucketing
//! - Lead score and recommendation result types
//! - Message / intent history records
//! - Error types

pub mod error;
pub mod intent;
pub mod lead;
pub mod message;
pub mod package;
pub mod profile;
pub mod state;

pub use error::{Error, Result};
pub use intent::{ConfidenceLevel, Intent, IntentKind, MatchLayer};
pub use lead::{LeadLevel, LeadScore, ScoreBreakdown};
pub use message::{Message, MessageRole, RecordedIntent};
pub use package::{Package, Recommendation, RoiEstimate};
pub use profile::{
    BudgetRange, BusinessType, ConversationProfile, DecisionMaker, FeatureTag, PainPointTag,
    TimelineUrgency,
};
pub use state::ConversationState;

//! Conversation engine for the sales chatbot
//!
//! Features:
//! - Deterministic state machine over twelve conversation phases
//! - Session memory with bounded message and intent history
//! - Lead scoring with a typed component breakdown
//! - Decision-tree package recommendation with ROI estimates
//! - Per-turn orchestration behind a single `process_turn` call

pub mod engine;
pub mod flow;
pub mod memory;
pub mod qualifier;
pub mod recommend;
pub mod session;

pub use engine::{ChatEngine, TurnOutcome};
pub use flow::{ConversationFlow, NextQuestion};
pub use memory::{ConversationMemory, SessionFlags, SessionStats};
pub use qualifier::{DisqualificationReason, LeadInsights, LeadQualifier};
pub use recommend::{
    FeatureMatch, PackageComparison, RecommendationEngine, UpsellOffer,
};
pub use session::SessionStore;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Session error: {0}")]
    Session(#[from] chatbot_core::Error),

    #[error("Config error: {0}")]
    Config(#[from] chatbot_config::ConfigError),
}

//! Conversation states for the scripted sales flow

use serde::{Deserialize, Serialize};

/// Phases of the sales conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ConversationState {
    /// Initial greeting
    #[default]
    Welcome,
    /// Open-ended discovery of the visitor's situation
    Discovery,
    /// Pinning down what kind of business they run
    BusinessProfiling,
    /// Collecting feature needs and pain points
    NeedsAssessment,
    /// Discussing budget
    BudgetDiscussion,
    /// Discussing timeline and urgency
    TimelineAssessment,
    /// Presenting the package recommendation
    Recommendation,
    /// Walking through a specific package
    PackageDetails,
    /// Addressing objections (budget, hesitation)
    ObjectionHandling,
    /// Asking for commitment / showing the quote form
    Closing,
    /// Answering support-style questions
    Support,
    /// Conversation over; terminal
    Exit,
}

impl ConversationState {
    pub const ALL: [ConversationState; 12] = [
        ConversationState::Welcome,
        ConversationState::Discovery,
        ConversationState::BusinessProfiling,
        ConversationState::NeedsAssessment,
        ConversationState::BudgetDiscussion,
        ConversationState::TimelineAssessment,
        ConversationState::Recommendation,
        ConversationState::PackageDetails,
        ConversationState::ObjectionHandling,
        ConversationState::Closing,
        ConversationState::Support,
        ConversationState::Exit,
    ];

    /// Terminal states have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationState::Exit)
    }

    /// Forced next state when a conversation has stalled in this state.
    ///
    /// Used by stagnation recovery to push the dialog forward regardless of
    /// intent. States late in the funnel all force toward `Closing`.
    pub fn forced_next(&self) -> ConversationState {
        match self {
            ConversationState::Welcome => ConversationState::Discovery,
            ConversationState::Discovery => ConversationState::BusinessProfiling,
            ConversationState::BusinessProfiling => ConversationState::NeedsAssessment,
            ConversationState::NeedsAssessment => ConversationState::BudgetDiscussion,
            ConversationState::BudgetDiscussion => ConversationState::TimelineAssessment,
            ConversationState::TimelineAssessment => ConversationState::Recommendation,
            ConversationState::Recommendation => ConversationState::Closing,
            ConversationState::PackageDetails => ConversationState::Closing,
            ConversationState::ObjectionHandling => ConversationState::Closing,
            ConversationState::Support => ConversationState::Closing,
            ConversationState::Closing => ConversationState::Closing,
            ConversationState::Exit => ConversationState::Exit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Welcome => "welcome",
            ConversationState::Discovery => "discovery",
            ConversationState::BusinessProfiling => "business_profiling",
            ConversationState::NeedsAssessment => "needs_assessment",
            ConversationState::BudgetDiscussion => "budget_discussion",
            ConversationState::TimelineAssessment => "timeline_assessment",
            ConversationState::Recommendation => "recommendation",
            ConversationState::PackageDetails => "package_details",
            ConversationState::ObjectionHandling => "objection_handling",
            ConversationState::Closing => "closing",
            ConversationState::Support => "support",
            ConversationState::Exit => "exit",
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

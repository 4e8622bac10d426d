//! Conversation state machine
//!
//! A deterministic transition function over (state, intent, context), a
//! handful of global overrides that fire from any state, and the auxiliary
//! decisions that gate recommendation, the quote-form CTA, and the next
//! question to ask.

use chatbot_config::SessionConfig;
use chatbot_core::{ConversationState, IntentKind};
use serde::{Deserialize, Serialize};

use crate::memory::ConversationMemory;

/// The single fact the dialog should solicit next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextQuestion {
    BusinessType,
    Features,
    Budget,
    Timeline,
    DecisionMaker,
}

/// The state machine. Stateless; every decision reads the passed-in memory.
#[derive(Debug, Clone, Default)]
pub struct ConversationFlow {
    session: SessionConfig,
}

impl ConversationFlow {
    pub fn new(session: SessionConfig) -> Self {
        Self { session }
    }

    /// Compute the next state for an intent observed in the current state.
    ///
    /// Global overrides win over state-specific handlers; `exit` is
    /// terminal and only loops to itself.
    pub fn next_state(&self, intent: IntentKind, memory: &ConversationMemory) -> ConversationState {
        let current = memory.current_state;
        if current.is_terminal() {
            return current;
        }

        if let Some(overridden) = self.global_override(intent, memory) {
            return overridden;
        }

        match current {
            ConversationState::Welcome => self.from_welcome(intent),
            ConversationState::Discovery => self.from_discovery(intent, memory),
            ConversationState::BusinessProfiling => self.from_business_profiling(intent, memory),
            ConversationState::NeedsAssessment => self.from_needs_assessment(intent, memory),
            ConversationState::BudgetDiscussion => self.from_budget_discussion(intent, memory),
            ConversationState::TimelineAssessment => self.from_timeline_assessment(intent, memory),
            ConversationState::Recommendation => self.from_recommendation(intent),
            ConversationState::PackageDetails => self.from_package_details(intent),
            ConversationState::ObjectionHandling => self.from_objection_handling(intent),
            ConversationState::Closing => self.from_closing(intent),
            ConversationState::Support => self.from_support(intent),
            ConversationState::Exit => ConversationState::Exit,
        }
    }

    /// Intents that redirect the conversation regardless of current state
    fn global_override(
        &self,
        intent: IntentKind,
        memory: &ConversationMemory,
    ) -> Option<ConversationState> {
        match intent {
            IntentKind::NotInterested | IntentKind::Goodbye => Some(ConversationState::Exit),
            IntentKind::SupportInquiry => Some(ConversationState::Support),
            IntentKind::ReadyToStart | IntentKind::QuoteRequest
                if memory.recommendation.is_some() =>
            {
                Some(ConversationState::Closing)
            }
            IntentKind::BudgetConcern | IntentKind::BudgetTight => {
                Some(ConversationState::ObjectionHandling)
            }
            kind if kind.is_package_details() => Some(ConversationState::PackageDetails),
            _ => None,
        }
    }

    fn from_welcome(&self, intent: IntentKind) -> ConversationState {
        match intent {
            IntentKind::Greeting => ConversationState::Discovery,
            // Get context before quoting numbers.
            IntentKind::PricingInquiry | IntentKind::PackageComparison => {
                ConversationState::Discovery
            }
            IntentKind::GetStarted => ConversationState::BusinessProfiling,
            kind if kind.is_business_mention() => ConversationState::NeedsAssessment,
            _ => ConversationState::Discovery,
        }
    }

    fn from_discovery(&self, intent: IntentKind, memory: &ConversationMemory) -> ConversationState {
        if intent.is_business_mention() || memory.profile.business_type.is_some() {
            return ConversationState::NeedsAssessment;
        }
        if intent == IntentKind::GetStarted {
            return ConversationState::BusinessProfiling;
        }
        if intent.is_feature_need() || intent.is_inquiry() {
            return ConversationState::NeedsAssessment;
        }
        ConversationState::BusinessProfiling
    }

    fn from_business_profiling(
        &self,
        intent: IntentKind,
        memory: &ConversationMemory,
    ) -> ConversationState {
        if memory.profile.business_type.is_some() {
            return ConversationState::NeedsAssessment;
        }
        // Still unclear; stay and re-ask.
        if matches!(intent, IntentKind::Clarification | IntentKind::Unknown) {
            return ConversationState::BusinessProfiling;
        }
        ConversationState::NeedsAssessment
    }

    fn from_needs_assessment(
        &self,
        intent: IntentKind,
        memory: &ConversationMemory,
    ) -> ConversationState {
        // Keep collecting while the visitor is naming needs.
        if intent.is_feature_need() || intent.is_inquiry() {
            return ConversationState::NeedsAssessment;
        }

        let has_context =
            memory.profile.business_type.is_some() && memory.profile.has_needs_signal();
        if has_context || memory.message_count >= 4 {
            return ConversationState::BudgetDiscussion;
        }

        ConversationState::NeedsAssessment
    }

    fn from_budget_discussion(
        &self,
        intent: IntentKind,
        memory: &ConversationMemory,
    ) -> ConversationState {
        if memory.profile.budget_range.is_some() {
            return ConversationState::TimelineAssessment;
        }
        if intent.is_budget() {
            return ConversationState::BudgetDiscussion;
        }
        // Stay and explain value.
        if matches!(
            intent,
            IntentKind::PricingInquiry | IntentKind::PackageComparison
        ) {
            return ConversationState::BudgetDiscussion;
        }
        // Move on eventually even without a stated budget.
        if memory.message_count >= 6 {
            return ConversationState::TimelineAssessment;
        }
        ConversationState::BudgetDiscussion
    }

    fn from_timeline_assessment(
        &self,
        intent: IntentKind,
        memory: &ConversationMemory,
    ) -> ConversationState {
        if memory.profile.timeline_urgency.is_some() {
            return ConversationState::Recommendation;
        }
        if matches!(
            intent,
            IntentKind::TimelineInquiry | IntentKind::UrgentTimeline
        ) {
            return ConversationState::TimelineAssessment;
        }
        if memory.message_count >= 8 {
            return ConversationState::Recommendation;
        }
        ConversationState::TimelineAssessment
    }

    fn from_recommendation(&self, intent: IntentKind) -> ConversationState {
        match intent {
            IntentKind::SeeExamples | IntentKind::PackageComparison => {
                ConversationState::PackageDetails
            }
            IntentKind::ReadyToStart | IntentKind::QuoteRequest => ConversationState::Closing,
            IntentKind::Clarification => ConversationState::PackageDetails,
            kind if kind.is_package_details() => ConversationState::PackageDetails,
            _ => ConversationState::Closing,
        }
    }

    fn from_package_details(&self, intent: IntentKind) -> ConversationState {
        match intent {
            IntentKind::ReadyToStart | IntentKind::QuoteRequest => ConversationState::Closing,
            IntentKind::PackageComparison => ConversationState::PackageDetails,
            kind if kind.is_package_details() => ConversationState::PackageDetails,
            _ => ConversationState::Closing,
        }
    }

    fn from_objection_handling(&self, intent: IntentKind) -> ConversationState {
        match intent {
            IntentKind::ReadyToStart | IntentKind::QuoteRequest => ConversationState::Closing,
            IntentKind::NotReady => ConversationState::ObjectionHandling,
            IntentKind::PackageComparison => ConversationState::PackageDetails,
            kind if kind.is_budget() => ConversationState::ObjectionHandling,
            kind if kind.is_package_details() => ConversationState::PackageDetails,
            _ => ConversationState::Closing,
        }
    }

    fn from_closing(&self, intent: IntentKind) -> ConversationState {
        match intent {
            // Stay and show the form CTA.
            IntentKind::ReadyToStart | IntentKind::QuoteRequest => ConversationState::Closing,
            // Stay and offer to send info along.
            IntentKind::NeedApproval => ConversationState::Closing,
            IntentKind::NotReady => ConversationState::Support,
            _ => ConversationState::Closing,
        }
    }

    fn from_support(&self, intent: IntentKind) -> ConversationState {
        if intent.is_inquiry() || intent.is_feature_need() {
            return ConversationState::Support;
        }
        if matches!(intent, IntentKind::ReadyToStart | IntentKind::QuoteRequest) {
            return ConversationState::Closing;
        }
        ConversationState::Support
    }

    /// Ready to recommend: business type is a hard requirement, plus at
    /// least one needs signal and a minimum of exchange.
    pub fn should_recommend(&self, memory: &ConversationMemory) -> bool {
        memory.profile.business_type.is_some()
            && memory.profile.has_needs_signal()
            && memory.message_count >= 3
    }

    /// Ready to surface the quote form: a recommendation exists, the lead
    /// is warm enough, enough has been exchanged, and there is recent
    /// buying intent (or the dialog has reached closing).
    pub fn should_show_form_cta(&self, memory: &ConversationMemory) -> bool {
        if memory.recommendation.is_none() {
            return false;
        }
        if memory.message_count < self.session.cta_min_messages {
            return false;
        }
        if memory.lead_score.score < self.session.cta_min_lead_score {
            return false;
        }
        memory
            .recent_intents()
            .iter()
            .any(|r| r.kind.is_buying_signal())
            || memory.current_state == ConversationState::Closing
    }

    /// Which single fact to solicit next, in priority order, each gated by
    /// its "already asked" flag
    pub fn next_question(&self, memory: &ConversationMemory) -> Option<NextQuestion> {
        let profile = &memory.profile;
        let flags = &memory.flags;

        if profile.business_type.is_none() && !flags.asked_business_type {
            return Some(NextQuestion::BusinessType);
        }
        if profile.business_type.is_some()
            && profile.features_needed.is_empty()
            && profile.pain_points.is_empty()
            && !flags.asked_features
        {
            return Some(NextQuestion::Features);
        }
        if profile.budget_range.is_none() && !flags.asked_budget && memory.message_count >= 3 {
            return Some(NextQuestion::Budget);
        }
        if profile.timeline_urgency.is_none()
            && !flags.asked_timeline
            && memory.message_count >= 4
        {
            return Some(NextQuestion::Timeline);
        }
        if profile.decision_maker.is_none() && memory.message_count >= 6 {
            return Some(NextQuestion::DecisionMaker);
        }
        None
    }

    /// True when the last four recorded states are identical.
    ///
    /// Coarse by design: a state legitimately collecting several distinct
    /// sub-topics (e.g. needs assessment gathering multiple features) can
    /// be flagged even though the conversation is progressing. Callers
    /// decide whether to force-advance.
    pub fn is_conversation_stuck(&self, history: &[ConversationState]) -> bool {
        if history.len() < 4 {
            return false;
        }
        let tail = &history[history.len() - 4..];
        tail.iter().all(|s| *s == tail[0])
    }

    /// Force progression out of a stuck state via the fixed funnel order
    pub fn unstick(&self, current: ConversationState) -> ConversationState {
        current.forced_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::{
        BudgetRange, BusinessType, LeadLevel, LeadScore, Recommendation, RecordedIntent,
        RoiEstimate, ScoreBreakdown, TimelineUrgency,
    };

    fn memory_in(state: ConversationState) -> ConversationMemory {
        let mut memory = ConversationMemory::new();
        memory.update_state(state);
        memory
    }

    fn dummy_recommendation() -> Recommendation {
        Recommendation {
            package: chatbot_core::Package::Professional,
            confidence: 0.8,
            reasoning: "fits".to_string(),
            roi: RoiEstimate {
                package_price: 5000,
                monthly_revenue: 4500,
                first_year_revenue: 54000,
                payback_months: 2,
                first_year_roi_percent: 980,
                roi_multiple: 10.8,
                metric: "m".to_string(),
                metric_value: "v".to_string(),
                description: "d".to_string(),
            },
        }
    }

    #[test]
    fn test_exit_is_terminal_for_any_intent() {
        let flow = ConversationFlow::default();
        let memory = memory_in(ConversationState::Exit);
        for intent in [
            IntentKind::Greeting,
            IntentKind::ReadyToStart,
            IntentKind::SupportInquiry,
            IntentKind::Unknown,
        ] {
            assert_eq!(flow.next_state(intent, &memory), ConversationState::Exit);
        }
    }

    #[test]
    fn test_not_interested_exits_from_any_state() {
        let flow = ConversationFlow::default();
        for state in ConversationState::ALL {
            let memory = memory_in(state);
            assert_eq!(
                flow.next_state(IntentKind::NotInterested, &memory),
                ConversationState::Exit,
                "{state}"
            );
            assert_eq!(
                flow.next_state(IntentKind::Goodbye, &memory),
                ConversationState::Exit,
                "{state}"
            );
        }
    }

    #[test]
    fn test_ready_to_start_needs_recommendation_to_close() {
        let flow = ConversationFlow::default();

        // Without a recommendation the welcome handler decides.
        let memory = memory_in(ConversationState::Welcome);
        assert_ne!(
            flow.next_state(IntentKind::ReadyToStart, &memory),
            ConversationState::Closing
        );

        let mut memory = memory_in(ConversationState::NeedsAssessment);
        memory.recommendation = Some(dummy_recommendation());
        assert_eq!(
            flow.next_state(IntentKind::ReadyToStart, &memory),
            ConversationState::Closing
        );
    }

    #[test]
    fn test_budget_objection_overrides() {
        let flow = ConversationFlow::default();
        let memory = memory_in(ConversationState::Recommendation);
        assert_eq!(
            flow.next_state(IntentKind::BudgetConcern, &memory),
            ConversationState::ObjectionHandling
        );
    }

    #[test]
    fn test_package_details_override() {
        let flow = ConversationFlow::default();
        let memory = memory_in(ConversationState::Discovery);
        assert_eq!(
            flow.next_state(IntentKind::PremiumDetails, &memory),
            ConversationState::PackageDetails
        );
    }

    #[test]
    fn test_welcome_routes() {
        let flow = ConversationFlow::default();
        let memory = memory_in(ConversationState::Welcome);
        assert_eq!(
            flow.next_state(IntentKind::Greeting, &memory),
            ConversationState::Discovery
        );
        assert_eq!(
            flow.next_state(IntentKind::GetStarted, &memory),
            ConversationState::BusinessProfiling
        );
        assert_eq!(
            flow.next_state(IntentKind::SalonMention, &memory),
            ConversationState::NeedsAssessment
        );
        assert_eq!(
            flow.next_state(IntentKind::PricingInquiry, &memory),
            ConversationState::Discovery
        );
    }

    #[test]
    fn test_needs_assessment_message_floor() {
        let flow = ConversationFlow::default();

        // No context, few messages: stay put.
        let mut memory = memory_in(ConversationState::NeedsAssessment);
        memory.message_count = 2;
        assert_eq!(
            flow.next_state(IntentKind::Unknown, &memory),
            ConversationState::NeedsAssessment
        );

        // Crossing the floor advances even without signals.
        memory.message_count = 4;
        assert_eq!(
            flow.next_state(IntentKind::Unknown, &memory),
            ConversationState::BudgetDiscussion
        );

        // Concrete signals advance without the floor.
        let mut memory = memory_in(ConversationState::NeedsAssessment);
        memory.message_count = 2;
        memory.profile.business_type = Some(BusinessType::Restaurant);
        memory.profile.budget_range = Some(BudgetRange::Professional);
        assert_eq!(
            flow.next_state(IntentKind::Greeting, &memory),
            ConversationState::BudgetDiscussion
        );
    }

    #[test]
    fn test_budget_discussion_advances_on_known_budget() {
        let flow = ConversationFlow::default();
        let mut memory = memory_in(ConversationState::BudgetDiscussion);
        memory.profile.budget_range = Some(BudgetRange::Tight);
        assert_eq!(
            flow.next_state(IntentKind::Unknown, &memory),
            ConversationState::TimelineAssessment
        );
    }

    #[test]
    fn test_timeline_advances_to_recommendation() {
        let flow = ConversationFlow::default();
        let mut memory = memory_in(ConversationState::TimelineAssessment);
        memory.profile.timeline_urgency = Some(TimelineUrgency::Soon);
        assert_eq!(
            flow.next_state(IntentKind::Gratitude, &memory),
            ConversationState::Recommendation
        );
    }

    #[test]
    fn test_closing_not_ready_goes_to_support() {
        let flow = ConversationFlow::default();
        let memory = memory_in(ConversationState::Closing);
        assert_eq!(
            flow.next_state(IntentKind::NotReady, &memory),
            ConversationState::Support
        );
    }

    #[test]
    fn test_totality_over_reachable_pairs() {
        // Every (state, intent) pair yields a valid state; the compiler
        // guarantees a ConversationState comes back, so this exercises
        // the handlers for panics and checks terminality.
        let flow = ConversationFlow::default();
        let intents = [
            IntentKind::Greeting,
            IntentKind::GetStarted,
            IntentKind::PricingInquiry,
            IntentKind::PackageComparison,
            IntentKind::EssentialDetails,
            IntentKind::UrgentTimeline,
            IntentKind::RestaurantMention,
            IntentKind::OnlineOrderingNeed,
            IntentKind::BudgetTight,
            IntentKind::NotReady,
            IntentKind::NeedApproval,
            IntentKind::ReadyToStart,
            IntentKind::QuoteRequest,
            IntentKind::SeeExamples,
            IntentKind::SupportInquiry,
            IntentKind::Gratitude,
            IntentKind::Clarification,
            IntentKind::NotInterested,
            IntentKind::Goodbye,
            IntentKind::InvalidInput,
            IntentKind::Unknown,
        ];
        for state in ConversationState::ALL {
            for intent in intents {
                let memory = memory_in(state);
                let next = flow.next_state(intent, &memory);
                if state.is_terminal() {
                    assert_eq!(next, ConversationState::Exit);
                }
            }
        }
    }

    #[test]
    fn test_should_recommend_requires_business_type() {
        let flow = ConversationFlow::default();
        let mut memory = ConversationMemory::new();
        memory.message_count = 3;
        memory.profile.budget_range = Some(BudgetRange::Professional);
        assert!(!flow.should_recommend(&memory));

        memory.profile.business_type = Some(BusinessType::Cafe);
        assert!(flow.should_recommend(&memory));

        // Message floor applies too.
        memory.message_count = 2;
        assert!(!flow.should_recommend(&memory));
    }

    #[test]
    fn test_should_show_form_cta_gates() {
        let flow = ConversationFlow::default();
        let mut memory = ConversationMemory::new();
        assert!(!flow.should_show_form_cta(&memory));

        memory.recommendation = Some(dummy_recommendation());
        memory.message_count = 5;
        memory.lead_score = LeadScore {
            score: 45,
            level: LeadLevel::Warm,
            breakdown: ScoreBreakdown::default(),
        };
        // No buying intent and not in closing yet.
        assert!(!flow.should_show_form_cta(&memory));

        memory.push_intent(RecordedIntent::new(IntentKind::QuoteRequest, 0.9));
        assert!(flow.should_show_form_cta(&memory));

        // Closing state counts as buying evidence on its own.
        let mut closing = ConversationMemory::new();
        closing.recommendation = Some(dummy_recommendation());
        closing.message_count = 6;
        closing.lead_score = memory.lead_score;
        closing.update_state(ConversationState::Closing);
        assert!(flow.should_show_form_cta(&closing));
    }

    #[test]
    fn test_next_question_priority() {
        let flow = ConversationFlow::default();
        let mut memory = ConversationMemory::new();
        assert_eq!(flow.next_question(&memory), Some(NextQuestion::BusinessType));

        memory.profile.business_type = Some(BusinessType::Salon);
        assert_eq!(flow.next_question(&memory), Some(NextQuestion::Features));

        memory.flags.asked_features = true;
        memory.message_count = 3;
        assert_eq!(flow.next_question(&memory), Some(NextQuestion::Budget));

        memory.profile.budget_range = Some(BudgetRange::Essential);
        memory.message_count = 4;
        assert_eq!(flow.next_question(&memory), Some(NextQuestion::Timeline));

        memory.profile.timeline_urgency = Some(TimelineUrgency::Flexible);
        memory.message_count = 6;
        assert_eq!(
            flow.next_question(&memory),
            Some(NextQuestion::DecisionMaker)
        );

        memory.profile.decision_maker = Some(chatbot_core::DecisionMaker::Owner);
        assert_eq!(flow.next_question(&memory), None);
    }

    #[test]
    fn test_stagnation_detection() {
        let flow = ConversationFlow::default();
        let s = ConversationState::NeedsAssessment;

        assert!(!flow.is_conversation_stuck(&[s, s, s]));
        assert!(flow.is_conversation_stuck(&[s, s, s, s]));
        assert!(flow.is_conversation_stuck(&[ConversationState::Discovery, s, s, s, s]));
        assert!(!flow.is_conversation_stuck(&[s, s, ConversationState::Discovery, s]));
    }

    #[test]
    fn test_unstick_progression() {
        let flow = ConversationFlow::default();
        assert_eq!(
            flow.unstick(ConversationState::Welcome),
            ConversationState::Discovery
        );
        assert_eq!(
            flow.unstick(ConversationState::NeedsAssessment),
            ConversationState::BudgetDiscussion
        );
        assert_eq!(
            flow.unstick(ConversationState::Support),
            ConversationState::Closing
        );
    }
}

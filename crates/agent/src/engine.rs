//! Per-turn orchestrator
//!
//! One utterance in, one updated memory out: classify, merge entities,
//! rescore, maybe recommend, transition state, and surface the auxiliary
//! decisions the host needs to pick a response.

use chatbot_config::EngineConfig;
use chatbot_core::{
    ConversationState, Intent, IntentKind, LeadScore, Message, Recommendation, RecordedIntent,
};
use chatbot_nlp::NlpEngine;
use serde::{Deserialize, Serialize};

use crate::flow::{ConversationFlow, NextQuestion};
use crate::memory::ConversationMemory;
use crate::qualifier::LeadQualifier;
use crate::recommend::RecommendationEngine;
use crate::AgentError;

/// Everything the shell needs after one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub intent: Intent,
    pub previous_state: ConversationState,
    pub state: ConversationState,
    pub lead_score: LeadScore,
    /// Current recommendation, if one has been made
    pub recommendation: Option<Recommendation>,
    /// The single fact worth soliciting next, if any
    pub next_question: Option<NextQuestion>,
    /// Whether the quote-form CTA should be surfaced now
    pub show_form_cta: bool,
    /// Advisory: the lead currently matches a disqualification rule
    pub disqualified: bool,
}

/// The conversation engine: NLP, state machine, scorer, and recommender
/// behind one `process_turn` call. Owns no session state; every call takes
/// the session memory in and mutates it in place.
pub struct ChatEngine {
    nlp: NlpEngine,
    flow: ConversationFlow,
    qualifier: LeadQualifier,
    recommender: RecommendationEngine,
    config: EngineConfig,
}

impl ChatEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            nlp: NlpEngine::with_config(config.nlp.clone()),
            flow: ConversationFlow::new(config.session),
            qualifier: LeadQualifier::new(config.scoring.clone()),
            recommender: RecommendationEngine::new(config.packages.clone(), config.roi.clone()),
            config,
        }
    }

    /// Build an engine from a validated YAML config file
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self, AgentError> {
        let config = EngineConfig::from_yaml_file(path)?;
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Fresh session memory with this engine's session limits
    pub fn new_session(&self) -> ConversationMemory {
        ConversationMemory::with_config(self.config.session)
    }

    /// Process one user utterance against a session.
    ///
    /// Invalid input (too short to classify) records the message and the
    /// reserved intent but merges no entities and performs no state
    /// transition.
    pub fn process_turn(&self, memory: &mut ConversationMemory, input: &str) -> TurnOutcome {
        let previous_state = memory.current_state;
        let outcome = self.nlp.process(input, Some(previous_state));

        memory.record_message(
            Message::user(input)
                .with_intent(outcome.intent.kind)
                .with_state(previous_state),
        );
        memory.push_intent(RecordedIntent::new(
            outcome.intent.kind,
            outcome.intent.confidence,
        ));

        if outcome.intent.kind == IntentKind::InvalidInput {
            return TurnOutcome {
                intent: outcome.intent,
                previous_state,
                state: previous_state,
                lead_score: memory.lead_score,
                recommendation: memory.recommendation.clone(),
                next_question: self.flow.next_question(memory),
                show_form_cta: false,
                disqualified: false,
            };
        }

        memory.merge_entities(&outcome.entities);
        if outcome.intent.kind == IntentKind::NotInterested {
            memory.profile.explicitly_declined = true;
        }

        let lead_score = self.qualifier.calculate(
            &memory.profile,
            memory.message_count,
            memory.recent_intents(),
        );
        memory.lead_score = lead_score;

        if self.flow.should_recommend(memory) {
            let recommendation = self
                .recommender
                .recommend(&memory.profile, lead_score.score);
            memory.recommendation = Some(recommendation);
            memory.flags.showed_recommendation = true;
        }

        let next_state = self.flow.next_state(outcome.intent.kind, memory);
        memory.update_state(next_state);

        if next_state == ConversationState::ObjectionHandling {
            memory.flags.has_objections = true;
        }

        let show_form_cta = self.flow.should_show_form_cta(memory);
        if show_form_cta {
            memory.flags.showed_form_cta = true;
        }

        let disqualified = self
            .qualifier
            .should_disqualify(&memory.lead_score, &memory.profile);

        tracing::debug!(
            intent = %outcome.intent.kind,
            from = %previous_state,
            to = %next_state,
            score = memory.lead_score.score,
            words = chatbot_text::words(input).len(),
            "turn processed"
        );

        TurnOutcome {
            intent: outcome.intent,
            previous_state,
            state: next_state,
            lead_score: memory.lead_score,
            recommendation: memory.recommendation.clone(),
            next_question: self.flow.next_question(memory),
            show_form_cta,
            disqualified,
        }
    }

    /// Record the reply the host chose to send, keeping the transcript and
    /// message count honest
    pub fn record_bot_reply(&self, memory: &mut ConversationMemory, text: &str) {
        memory.record_message(Message::bot(text).with_state(memory.current_state));
    }

    /// True when the last four recorded states are identical
    pub fn is_stuck(&self, memory: &ConversationMemory) -> bool {
        self.flow.is_conversation_stuck(memory.state_history())
    }

    /// Force the conversation out of a stuck state along the fixed funnel
    pub fn unstick(&self, memory: &mut ConversationMemory) -> ConversationState {
        let next = self.flow.unstick(memory.current_state);
        memory.update_state(next);
        next
    }

    pub fn nlp(&self) -> &NlpEngine {
        &self.nlp
    }

    pub fn flow(&self) -> &ConversationFlow {
        &self.flow
    }

    pub fn qualifier(&self) -> &LeadQualifier {
        &self.qualifier
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ChatEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_updates_memory() {
        let engine = ChatEngine::new();
        let mut memory = engine.new_session();

        let outcome = engine.process_turn(&mut memory, "hello");
        assert_eq!(outcome.intent.kind, IntentKind::Greeting);
        assert_eq!(outcome.previous_state, ConversationState::Welcome);
        assert_eq!(outcome.state, ConversationState::Discovery);
        assert_eq!(memory.current_state, ConversationState::Discovery);
        assert_eq!(memory.message_count, 1);
        assert_eq!(memory.intent_history().len(), 1);
    }

    #[test]
    fn test_invalid_input_is_inert() {
        let engine = ChatEngine::new();
        let mut memory = engine.new_session();

        let outcome = engine.process_turn(&mut memory, "");
        assert_eq!(outcome.intent.kind, IntentKind::InvalidInput);
        assert_eq!(outcome.state, ConversationState::Welcome);
        assert_eq!(memory.current_state, ConversationState::Welcome);
        assert_eq!(memory.profile, chatbot_core::ConversationProfile::default());
    }

    #[test]
    fn test_bot_reply_counts_toward_messages() {
        let engine = ChatEngine::new();
        let mut memory = engine.new_session();

        engine.process_turn(&mut memory, "hello");
        engine.record_bot_reply(&mut memory, "Hi! What kind of business do you run?");
        assert_eq!(memory.message_count, 2);
    }

    #[test]
    fn test_not_interested_marks_decline_and_exits() {
        let engine = ChatEngine::new();
        let mut memory = engine.new_session();

        let outcome = engine.process_turn(&mut memory, "not interested");
        assert_eq!(outcome.state, ConversationState::Exit);
        assert!(memory.profile.explicitly_declined);
    }

    #[test]
    fn test_stuck_detection_and_recovery() {
        let engine = ChatEngine::new();
        let mut memory = engine.new_session();

        // Four unknown turns in a row leave the state put each time.
        engine.process_turn(&mut memory, "zxcv qwerty");
        memory.update_state(ConversationState::BusinessProfiling);
        for _ in 0..4 {
            engine.process_turn(&mut memory, "zxcv qwerty");
        }
        assert!(engine.is_stuck(&memory));

        let next = engine.unstick(&mut memory);
        assert_eq!(next, ConversationState::NeedsAssessment);
        assert_eq!(memory.current_state, ConversationState::NeedsAssessment);
    }
}

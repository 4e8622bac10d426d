//! Layered intent classifier
//!
//! Five layers, each consulted only when the previous produced nothing
//! confident: exact phrase match, keyword scoring, n-gram overlap, a
//! sentiment nudge, and state-aware disambiguation.

use chatbot_config::NlpConfig;
use chatbot_core::{ConversationProfile, ConversationState, Intent, IntentKind, MatchLayer};
use chatbot_text::{ngrams, sanitize, similarity_ratio, tokenize};
use serde::{Deserialize, Serialize};

use crate::extractor::{EntityExtractor, ExtractorTables};
use crate::library::IntentLibrary;
use crate::sentiment::{self, Sentiment};

/// Result of processing one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpOutcome {
    pub intent: Intent,
    pub entities: ConversationProfile,
    pub tokens: Vec<String>,
}

/// Best fuzzy match of an input against a phrase list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub pattern: String,
    pub similarity: f32,
}

/// The NLP engine: pattern library + entity extractor + thresholds
pub struct NlpEngine {
    config: NlpConfig,
    library: IntentLibrary,
    extractor: EntityExtractor,
}

impl NlpEngine {
    pub fn new() -> Self {
        Self::with_config(NlpConfig::default())
    }

    pub fn with_config(config: NlpConfig) -> Self {
        Self {
            config,
            library: IntentLibrary::default(),
            extractor: EntityExtractor::new(),
        }
    }

    /// Replace the built-in pattern library (e.g. one loaded from a file)
    pub fn with_library(mut self, library: IntentLibrary) -> Self {
        self.library = library;
        self
    }

    /// Replace the built-in extractor tables
    pub fn with_extractor_tables(mut self, tables: ExtractorTables) -> Self {
        self.extractor = EntityExtractor::with_tables(tables);
        self
    }

    /// Classify one utterance and extract its entities.
    ///
    /// Inputs shorter than the configured minimum yield the reserved
    /// `invalid_input` intent without running any matching layer.
    pub fn process(&self, input: &str, state: Option<ConversationState>) -> NlpOutcome {
        let sanitized = sanitize(input, self.config.max_input_length);

        if sanitized.chars().count() < self.config.min_input_length {
            return NlpOutcome {
                intent: Intent::invalid_input(),
                entities: ConversationProfile::default(),
                tokens: Vec::new(),
            };
        }

        let tokens = tokenize(&sanitized);
        let entities = self.extractor.extract_all(&sanitized);
        let intent = self.recognize_intent(&sanitized, &tokens, state);

        tracing::debug!(
            intent = %intent.kind,
            confidence = intent.confidence,
            layer = ?intent.layer,
            "classified utterance"
        );

        NlpOutcome {
            intent,
            entities,
            tokens,
        }
    }

    fn recognize_intent(
        &self,
        text: &str,
        tokens: &[String],
        state: Option<ConversationState>,
    ) -> Intent {
        // Layer 1: exact match short-circuits everything else.
        if let Some(exact) = self.exact_match(text) {
            return exact;
        }

        let mut candidates = Vec::new();
        if let Some(keyword) = self.keyword_scoring(tokens) {
            candidates.push(keyword);
        }
        if let Some(ngram) = self.ngram_analysis(tokens) {
            candidates.push(ngram);
        }

        // Layer 4: sentiment nudges confidence of a few intents.
        let tally = sentiment::analyze(tokens);
        for candidate in &mut candidates {
            let boosted = match tally.sentiment {
                Sentiment::Positive => candidate.kind.is_buying_signal(),
                Sentiment::Negative => matches!(
                    candidate.kind,
                    IntentKind::BudgetConcern | IntentKind::NotInterested
                ),
                Sentiment::Neutral => false,
            };
            if boosted {
                candidate.confidence =
                    (candidate.confidence * self.config.sentiment_boost).min(1.0);
            }
        }

        candidates.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());

        if candidates.is_empty() {
            return Intent::unknown();
        }

        self.disambiguate(candidates, state)
    }

    fn exact_match(&self, text: &str) -> Option<Intent> {
        let trimmed = text.trim().to_lowercase();
        self.library
            .iter()
            .find(|entry| entry.pattern.exact.iter().any(|p| *p == trimmed))
            .map(|entry| Intent::new(entry.kind, 1.0, MatchLayer::Exact))
    }

    fn keyword_scoring(&self, tokens: &[String]) -> Option<Intent> {
        let mut best: Option<(IntentKind, i32)> = None;

        for entry in self.library.iter() {
            let score = self.keyword_score(&entry.pattern, tokens);
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((entry.kind, score));
            }
        }

        best.map(|(kind, score)| {
            let confidence = (score as f32 / self.config.keyword_norm as f32).min(1.0);
            Intent::new(kind, confidence, MatchLayer::Keyword)
        })
    }

    fn keyword_score(&self, pattern: &crate::library::IntentPattern, tokens: &[String]) -> i32 {
        let has = |keyword: &String| tokens.iter().any(|t| t == keyword);

        let mut score = 0;
        for keyword in &pattern.primary {
            if has(keyword) {
                score += self.config.primary_weight;
            }
        }
        for keyword in &pattern.secondary {
            if has(keyword) {
                score += self.config.secondary_weight;
            }
        }
        for keyword in &pattern.negative {
            if has(keyword) {
                score -= self.config.negative_weight;
            }
        }
        score
    }

    fn ngram_analysis(&self, tokens: &[String]) -> Option<Intent> {
        let bigrams = ngrams(tokens, 2);
        let trigrams = ngrams(tokens, 3);

        let mut best: Option<(IntentKind, u32)> = None;

        for entry in self.library.iter() {
            if entry.pattern.exact.is_empty() {
                continue;
            }
            let mut matches = 0u32;
            for bigram in &bigrams {
                for phrase in &entry.pattern.exact {
                    if phrase.contains(bigram.as_str()) {
                        matches += self.config.bigram_weight;
                    }
                }
            }
            for trigram in &trigrams {
                for phrase in &entry.pattern.exact {
                    if phrase.contains(trigram.as_str()) {
                        matches += self.config.trigram_weight;
                    }
                }
            }
            if matches > 0 && best.map_or(true, |(_, m)| matches > m) {
                best = Some((entry.kind, matches));
            }
        }

        best.filter(|(_, matches)| *matches >= self.config.ngram_floor)
            .map(|(kind, matches)| {
                let confidence = (matches as f32 / self.config.ngram_norm as f32).min(1.0);
                Intent::new(kind, confidence, MatchLayer::Ngram)
            })
    }

    /// Layer 5: when the current state designates priority intents, the
    /// first candidate in that set wins with boosted confidence.
    fn disambiguate(&self, candidates: Vec<Intent>, state: Option<ConversationState>) -> Intent {
        if let Some(priorities) = state.and_then(priority_intents) {
            for candidate in &candidates {
                if priorities.contains(&candidate.kind) {
                    let mut chosen = candidate.clone();
                    chosen.confidence = (chosen.confidence * self.config.context_boost).min(1.0);
                    return chosen;
                }
            }
        }
        candidates.into_iter().next().unwrap_or_else(Intent::unknown)
    }

    /// Best fuzzy match of the input against a phrase list, if any clears
    /// the similarity threshold. Tolerates spelling errors.
    pub fn fuzzy_match(&self, input: &str, patterns: &[String]) -> Option<FuzzyMatch> {
        let lower = input.to_lowercase();
        patterns
            .iter()
            .map(|pattern| FuzzyMatch {
                similarity: similarity_ratio(&lower, &pattern.to_lowercase()),
                pattern: pattern.clone(),
            })
            .filter(|m| m.similarity >= self.config.fuzzy_threshold)
            .max_by(|a, b| a.similarity.partial_cmp(&b.similarity).unwrap())
    }

    /// Every intent clearing the keyword floor, for compound utterances.
    /// Sorted by confidence descending.
    pub fn detect_multiple_intents(&self, input: &str) -> Vec<Intent> {
        let sanitized = sanitize(input, self.config.max_input_length);
        let tokens = tokenize(&sanitized);

        let mut intents: Vec<Intent> = self
            .library
            .iter()
            .filter_map(|entry| {
                // Negative keywords are deliberately excluded here: a
                // compound message may carry both a need and an objection.
                let has = |keyword: &String| tokens.iter().any(|t| t == keyword);
                let mut score = 0;
                for keyword in &entry.pattern.primary {
                    if has(keyword) {
                        score += self.config.primary_weight;
                    }
                }
                for keyword in &entry.pattern.secondary {
                    if has(keyword) {
                        score += self.config.secondary_weight;
                    }
                }
                (score >= self.config.multi_intent_floor).then(|| {
                    let confidence = (score as f32 / self.config.keyword_norm as f32).min(1.0);
                    Intent::new(entry.kind, confidence, MatchLayer::Keyword)
                })
            })
            .collect();

        intents.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
        intents
    }

    pub fn config(&self) -> &NlpConfig {
        &self.config
    }
}

impl Default for NlpEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn priority_intents(state: ConversationState) -> Option<&'static [IntentKind]> {
    match state {
        ConversationState::BudgetDiscussion => Some(&[
            IntentKind::BudgetConcern,
            IntentKind::BudgetTight,
            IntentKind::BudgetFlexible,
            IntentKind::PaymentPlanInquiry,
        ]),
        ConversationState::TimelineAssessment => Some(&[
            IntentKind::TimelineInquiry,
            IntentKind::UrgentTimeline,
        ]),
        ConversationState::Closing => Some(&[
            IntentKind::ReadyToStart,
            IntentKind::QuoteRequest,
            IntentKind::NotReady,
            IntentKind::NeedApproval,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_short_circuits() {
        let engine = NlpEngine::new();
        let outcome = engine.process("hello", None);
        assert_eq!(outcome.intent.kind, IntentKind::Greeting);
        assert_eq!(outcome.intent.confidence, 1.0);
        assert_eq!(outcome.intent.layer, MatchLayer::Exact);
    }

    #[test]
    fn test_invalid_input() {
        let engine = NlpEngine::new();
        for input in ["", "a", "  "] {
            let outcome = engine.process(input, None);
            assert_eq!(outcome.intent.kind, IntentKind::InvalidInput, "{input:?}");
            assert_eq!(outcome.intent.confidence, 1.0);
            assert!(outcome.tokens.is_empty());
            assert_eq!(outcome.entities, ConversationProfile::default());
        }
    }

    #[test]
    fn test_keyword_layer() {
        let engine = NlpEngine::new();
        let outcome = engine.process("what would a new site cost me", None);
        assert_eq!(outcome.intent.kind, IntentKind::PricingInquiry);
        assert!(outcome.intent.confidence > 0.0);
    }

    #[test]
    fn test_unknown_fallback() {
        let engine = NlpEngine::new();
        let outcome = engine.process("zebra quantum flux", None);
        assert_eq!(outcome.intent.kind, IntentKind::Unknown);
        assert_eq!(outcome.intent.confidence, 0.0);
        assert_eq!(outcome.intent.layer, MatchLayer::Fallback);
    }

    #[test]
    fn test_context_boost_in_budget_state() {
        let engine = NlpEngine::new();
        let neutral = engine.process("that's too expensive for me", None);
        let in_budget = engine.process(
            "that's too expensive for me",
            Some(ConversationState::BudgetDiscussion),
        );
        assert_eq!(in_budget.intent.kind, IntentKind::BudgetConcern);
        assert!(in_budget.intent.confidence >= neutral.intent.confidence);
    }

    #[test]
    fn test_entities_extracted_alongside_intent() {
        let engine = NlpEngine::new();
        let outcome = engine.process("I own a restaurant and need online ordering ASAP", None);
        assert_eq!(
            outcome.entities.business_type,
            Some(chatbot_core::BusinessType::Restaurant)
        );
        assert!(outcome
            .entities
            .features_needed
            .contains(&chatbot_core::FeatureTag::Ordering));
        assert_eq!(
            outcome.entities.timeline_urgency,
            Some(chatbot_core::TimelineUrgency::Urgent)
        );
    }

    #[test]
    fn test_fuzzy_match() {
        let engine = NlpEngine::new();
        let patterns = vec!["pricing".to_string(), "portfolio".to_string()];
        let hit = engine.fuzzy_match("pricng", &patterns).unwrap();
        assert_eq!(hit.pattern, "pricing");
        assert!(hit.similarity >= 0.7);

        assert!(engine.fuzzy_match("zzzzzz", &patterns).is_none());
    }

    #[test]
    fn test_detect_multiple_intents() {
        let engine = NlpEngine::new();
        let intents =
            engine.detect_multiple_intents("i need a website with online ordering for my restaurant");
        let kinds: Vec<IntentKind> = intents.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IntentKind::GetStarted));
        assert!(kinds.contains(&IntentKind::OnlineOrderingNeed));
        assert!(kinds.contains(&IntentKind::RestaurantMention));
        // Sorted descending.
        for pair in intents.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_goodbye_patterns_exist() {
        let engine = NlpEngine::new();
        let outcome = engine.process("goodbye", None);
        assert_eq!(outcome.intent.kind, IntentKind::Goodbye);
    }
}

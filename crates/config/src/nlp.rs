//! Thresholds and weights for the intent classifier

use serde::{Deserialize, Serialize};

/// NLP pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Inputs shorter than this classify as `invalid_input`
    #[serde(default = "default_min_input_length")]
    pub min_input_length: usize,
    /// Inputs are truncated to this length during sanitization
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,

    /// Confidence at or above this responds directly
    #[serde(default = "default_high_confidence")]
    pub high_confidence: f32,
    /// Confidence at or above this asks for clarification
    #[serde(default = "default_medium_confidence")]
    pub medium_confidence: f32,

    /// Keyword layer: points per primary keyword hit
    #[serde(default = "default_primary_weight")]
    pub primary_weight: i32,
    /// Keyword layer: points per secondary keyword hit
    #[serde(default = "default_secondary_weight")]
    pub secondary_weight: i32,
    /// Keyword layer: points subtracted per negative keyword hit
    #[serde(default = "default_negative_weight")]
    pub negative_weight: i32,
    /// Keyword layer: score at which confidence reaches 1.0
    #[serde(default = "default_keyword_norm")]
    pub keyword_norm: i32,

    /// N-gram layer: points per bigram contained in an exact phrase
    #[serde(default = "default_bigram_weight")]
    pub bigram_weight: u32,
    /// N-gram layer: points per trigram contained in an exact phrase
    #[serde(default = "default_trigram_weight")]
    pub trigram_weight: u32,
    /// N-gram layer: minimum cumulative match count to qualify
    #[serde(default = "default_ngram_floor")]
    pub ngram_floor: u32,
    /// N-gram layer: match count at which confidence reaches 1.0
    #[serde(default = "default_ngram_norm")]
    pub ngram_norm: u32,

    /// Multiplier applied by the sentiment nudge
    #[serde(default = "default_sentiment_boost")]
    pub sentiment_boost: f32,
    /// Multiplier applied by state-priority disambiguation
    #[serde(default = "default_context_boost")]
    pub context_boost: f32,

    /// Minimum similarity ratio for a fuzzy phrase match
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f32,
    /// Keyword score floor for inclusion in multi-intent detection
    #[serde(default = "default_multi_intent_floor")]
    pub multi_intent_floor: i32,
}

fn default_min_input_length() -> usize {
    2
}
fn default_max_input_length() -> usize {
    500
}
fn default_high_confidence() -> f32 {
    0.85
}
fn default_medium_confidence() -> f32 {
    0.60
}
fn default_primary_weight() -> i32 {
    10
}
fn default_secondary_weight() -> i32 {
    5
}
fn default_negative_weight() -> i32 {
    15
}
fn default_keyword_norm() -> i32 {
    30
}
fn default_bigram_weight() -> u32 {
    2
}
fn default_trigram_weight() -> u32 {
    3
}
fn default_ngram_floor() -> u32 {
    2
}
fn default_ngram_norm() -> u32 {
    10
}
fn default_sentiment_boost() -> f32 {
    1.1
}
fn default_context_boost() -> f32 {
    1.2
}
fn default_fuzzy_threshold() -> f32 {
    0.7
}
fn default_multi_intent_floor() -> i32 {
    10
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            min_input_length: default_min_input_length(),
            max_input_length: default_max_input_length(),
            high_confidence: default_high_confidence(),
            medium_confidence: default_medium_confidence(),
            primary_weight: default_primary_weight(),
            secondary_weight: default_secondary_weight(),
            negative_weight: default_negative_weight(),
            keyword_norm: default_keyword_norm(),
            bigram_weight: default_bigram_weight(),
            trigram_weight: default_trigram_weight(),
            ngram_floor: default_ngram_floor(),
            ngram_norm: default_ngram_norm(),
            sentiment_boost: default_sentiment_boost(),
            context_boost: default_context_boost(),
            fuzzy_threshold: default_fuzzy_threshold(),
            multi_intent_floor: default_multi_intent_floor(),
        }
    }
}

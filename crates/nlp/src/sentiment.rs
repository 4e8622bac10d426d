//! Coarse sentiment tally
//!
//! Token-level word counting. Only used to nudge the confidence of a few
//! intents, never to set one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Tally result: the dominant polarity and its word count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub sentiment: Sentiment,
    pub score: u32,
}

const POSITIVE: &[&str] = &[
    "love", "great", "awesome", "perfect", "excellent", "fantastic", "wonderful", "amazing",
    "good", "nice", "yes", "absolutely", "definitely",
];

const NEGATIVE: &[&str] = &[
    "hate", "bad", "terrible", "awful", "horrible", "worried", "concerned", "expensive",
    "complicated", "difficult", "no", "never", "don't",
];

const NEUTRAL: &[&str] = &[
    "okay", "fine", "maybe", "perhaps", "thinking", "considering", "exploring",
];

/// Count polarity words and return the dominant sentiment.
/// Ties resolve to neutral.
pub fn analyze(tokens: &[String]) -> SentimentTally {
    let mut positive = 0u32;
    let mut negative = 0u32;
    let mut neutral = 0u32;

    for token in tokens {
        let token = token.as_str();
        if POSITIVE.iter().any(|w| *w == token) {
            positive += 1;
        }
        if NEGATIVE.iter().any(|w| *w == token) {
            negative += 1;
        }
        if NEUTRAL.iter().any(|w| *w == token) {
            neutral += 1;
        }
    }

    if positive > negative && positive > neutral {
        SentimentTally {
            sentiment: Sentiment::Positive,
            score: positive,
        }
    } else if negative > positive && negative > neutral {
        SentimentTally {
            sentiment: Sentiment::Negative,
            score: negative,
        }
    } else {
        SentimentTally {
            sentiment: Sentiment::Neutral,
            score: neutral,
        }
    }
}

//! Intent classification and entity extraction
//!
//! Deterministic, table-driven NLP: a layered matcher assigns one intent
//! per utterance while nine sub-extractors pull structured facts out of the
//! same text. No learned models; the tables are the behavior.

pub mod engine;
pub mod extractor;
pub mod library;
pub mod sentiment;

pub use engine::{FuzzyMatch, NlpEngine, NlpOutcome};
pub use extractor::{BudgetBuckets, EntityExtractor, ExtractorTables};
pub use library::{IntentEntry, IntentLibrary, IntentPattern};
pub use sentiment::{Sentiment, SentimentTally};

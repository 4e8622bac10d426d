//! Tokenization, sanitization, stopwords, n-grams

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Default cap applied by [`sanitize`]
pub const DEFAULT_MAX_INPUT_LEN: usize = 500;

static SCRIPT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "this", "that", "these", "those", "of", "to", "in",
        "on", "at", "by", "for", "with", "from", "as", "into", "about", "and", "or", "but", "if",
        "then",
    ]
    .into_iter()
    .collect()
});

/// Trim, strip HTML/script tags, and cap the input length.
///
/// Runs before any matching so pattern tables never see markup.
pub fn sanitize(input: &str, max_len: usize) -> String {
    let trimmed = input.trim();
    let no_scripts = SCRIPT_TAG_RE.replace_all(trimmed, "");
    let no_tags = HTML_TAG_RE.replace_all(&no_scripts, "");
    no_tags.chars().take(max_len).collect()
}

/// Lowercase, replace anything but word characters, apostrophes, and hyphens
/// with spaces, and split on whitespace. Empty tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '\'' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Unicode words of the input, lowercased. Splits on hyphens and punctuation
/// per UAX #29, unlike [`tokenize`] which keeps hyphenated tokens whole.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Filter a fixed closed set of English stopwords
pub fn remove_stopwords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !STOPWORDS.contains(t.as_str()))
        .cloned()
        .collect()
}

/// Every contiguous window of `n` tokens joined with spaces.
/// Empty when there are fewer than `n` tokens.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

//! Sentiment classifier - coarse emotional tone and conversational need.
//!
//! Keyword-set membership over the lower-cased message. The three sets
//! are tested in order positive, negative, anxious with last-match-wins,
//! so a message containing both "happy" and "worried" classifies as
//! anxious. Consulted by the dispatcher as an annotation; it is only a
//! terminal branch for the support template.

use lumen_common::Message;
use serde::{Deserialize, Serialize};

/// Turns of history kept in view (reserved for future context use)
const HISTORY_WINDOW: usize = 5;

const POSITIVE_WORDS: &[&str] = &[
    "happy", "excited", "great", "awesome", "love", "amazing", "wonderful", "good", "nice",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "frustrated", "hate", "terrible", "awful", "upset", "bad", "worried",
];

const ANXIOUS_WORDS: &[&str] = &[
    "anxious", "nervous", "scared", "afraid", "worried", "stress", "pressure",
];

/// Emotional tone label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Neutral,
    Positive,
    Negative,
    Anxious,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Anxious => "anxious",
        };
        write!(f, "{}", s)
    }
}

/// What the sender most likely wants from the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Need {
    Information,
    Support,
    Conversation,
}

/// Classification of a single message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Message contains at least one question mark
    pub is_inquisitive: bool,
    /// Message exceeds 50 characters (code points, not display width)
    pub is_detailed: bool,
    /// Message ends with '!' or contains an emotional keyword
    pub is_emotional: bool,
    pub need: Need,
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Classify a message's tone and need.
///
/// `history` is accepted for interface stability; only the current
/// message is inspected today, bounded to the last few turns.
pub fn analyze(message: &str, history: &[Message]) -> AnalysisResult {
    let lower = message.to_lowercase();
    let _recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

    // Later sets override earlier ones
    let mut sentiment = Sentiment::Neutral;
    if contains_any(&lower, POSITIVE_WORDS) {
        sentiment = Sentiment::Positive;
    }
    if contains_any(&lower, NEGATIVE_WORDS) {
        sentiment = Sentiment::Negative;
    }
    if contains_any(&lower, ANXIOUS_WORDS) {
        sentiment = Sentiment::Anxious;
    }

    let is_inquisitive = message.contains('?');
    let is_detailed = message.chars().count() > 50;
    let is_emotional = message.trim_end().ends_with('!')
        || contains_any(&lower, POSITIVE_WORDS)
        || contains_any(&lower, NEGATIVE_WORDS);

    // Fixed priority, not independent flags
    let need = if is_inquisitive {
        Need::Information
    } else if is_emotional {
        Need::Support
    } else {
        Need::Conversation
    };

    AnalysisResult {
        sentiment,
        is_inquisitive,
        is_detailed,
        is_emotional,
        need,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_one(message: &str) -> AnalysisResult {
        analyze(message, &[])
    }

    #[test]
    fn neutral_by_default() {
        let r = analyze_one("tell me about rust");
        assert_eq!(r.sentiment, Sentiment::Neutral);
        assert_eq!(r.need, Need::Conversation);
    }

    #[test]
    fn positive_keywords() {
        assert_eq!(analyze_one("this is great").sentiment, Sentiment::Positive);
    }

    #[test]
    fn negative_keywords() {
        assert_eq!(analyze_one("that was terrible").sentiment, Sentiment::Negative);
    }

    // Later-listed sets win: both "happy" (positive) and "worried"
    // (negative AND anxious) are present.
    #[test]
    fn anxious_overrides_positive() {
        assert_eq!(
            analyze_one("I am happy but worried").sentiment,
            Sentiment::Anxious
        );
    }

    #[test]
    fn negative_overrides_positive() {
        assert_eq!(
            analyze_one("good but also terrible").sentiment,
            Sentiment::Negative
        );
    }

    #[test]
    fn inquisitive_wins_need_priority() {
        let r = analyze_one("are you happy?");
        assert!(r.is_inquisitive);
        assert!(r.is_emotional);
        assert_eq!(r.need, Need::Information);
    }

    #[test]
    fn emotional_from_trailing_bang() {
        let r = analyze_one("wow!");
        assert!(r.is_emotional);
        assert_eq!(r.need, Need::Support);
    }

    #[test]
    fn emotional_from_keyword_without_bang() {
        assert!(analyze_one("I love this").is_emotional);
    }

    #[test]
    fn detailed_boundary_is_exclusive() {
        assert!(!analyze_one(&"x".repeat(50)).is_detailed);
        assert!(analyze_one(&"x".repeat(51)).is_detailed);
    }

    #[test]
    fn detailed_counts_code_points() {
        // 51 multi-byte characters
        assert!(analyze_one(&"é".repeat(51)).is_detailed);
        assert!(!analyze_one(&"é".repeat(50)).is_detailed);
    }

    #[test]
    fn history_is_accepted_but_not_required() {
        let history = vec![Message::user("earlier turn")];
        let r = analyze("fine", &history);
        assert_eq!(r.sentiment, Sentiment::Neutral);
    }
}

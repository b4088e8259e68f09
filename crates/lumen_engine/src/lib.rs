//! Lumen reply engine - deterministic response generation for the chat client.
//!
//! Given a user message, recent history, a wall-clock reading, and a random
//! source, the engine classifies intent and produces exactly one reply by
//! trying specialized generators in fixed priority order: expression
//! evaluator, knowledge matcher, prediction generator, intent templates,
//! generic fallback. Time and randomness are explicit inputs, so identical
//! inputs produce byte-identical replies.

pub mod calculator;
pub mod dispatcher;
pub mod knowledge;
pub mod prediction;
pub mod sentiment;

pub use dispatcher::{Reply, ReplyEngine};
pub use sentiment::{AnalysisResult, Need, Sentiment};

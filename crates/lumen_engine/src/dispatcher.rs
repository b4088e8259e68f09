//! Response dispatcher - ordered, mutually exclusive reply branches.
//!
//! Branch priority: expression evaluator, knowledge matcher, prediction
//! trigger, intent templates, generic fallback. Exactly one branch
//! produces the body; every reply gets the date footer. Failures inside
//! a branch are recovered locally as "no match" and the next branch is
//! tried, so the engine never fails outward.

use std::time::Duration;

use chrono::{DateTime, Datelike, Timelike, Utc};
use lumen_common::{EngineConfig, EngineError, Message};
use rand::Rng;
use tracing::debug;

use crate::calculator::{self, Calculation};
use crate::knowledge;
use crate::prediction;
use crate::sentiment::{self, AnalysisResult, Sentiment};

/// Phrases that route a message to the prediction generator
const PREDICT_TRIGGERS: &[&str] = &["predict", "future", "will happen"];

/// Topic used when trigger stripping leaves nothing behind
const DEFAULT_TOPIC: &str = "technology";

/// Minimum message length for the fallback prediction flourish
const FLOURISH_MIN_CHARS: usize = 10;

/// The chosen reply branch, before rendering
#[derive(Debug, Clone)]
pub enum Reply {
    Calculator(Calculation),
    Knowledge { text: String, sentiment: Sentiment },
    Prediction(String),
    Template(String),
    Fallback(String),
}

impl Reply {
    /// Branch label for logging and tests
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Calculator(_) => "calculator",
            Reply::Knowledge { .. } => "knowledge",
            Reply::Prediction(_) => "prediction",
            Reply::Template(_) => "template",
            Reply::Fallback(_) => "fallback",
        }
    }
}

/// The response-generation engine.
///
/// Pure given fixed inputs: wall clock and randomness are parameters,
/// never ambient reads.
pub struct ReplyEngine {
    config: EngineConfig,
}

impl ReplyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a reply after the simulated thinking delay.
    ///
    /// Always resolves with text; dropping the future cancels the
    /// pending reply without blocking other work.
    pub async fn generate_reply<R: Rng>(
        &self,
        message: &str,
        history: &[Message],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> String {
        tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        self.respond(message, history, now, rng)
    }

    /// Synchronous reply generation: select a branch, render it, append
    /// the footer.
    pub fn respond<R: Rng>(
        &self,
        message: &str,
        history: &[Message],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> String {
        let reply = self.select(message, history, now, rng);
        debug!("Dispatch: branch={}", reply.kind());
        self.render(&reply, now)
    }

    /// Run the ordered branch matcher. Exposed so branch precedence is
    /// testable without rendering.
    pub fn select<R: Rng>(
        &self,
        message: &str,
        history: &[Message],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Reply {
        let window = history.len().saturating_sub(self.config.history_window);
        let analysis = sentiment::analyze(message, &history[window..]);
        let lower = message.to_lowercase();

        // 1. Expression evaluator; errors mean "not arithmetic"
        if let Ok(calc) = calculator::evaluate(message) {
            return Reply::Calculator(calc);
        }

        // 2. Knowledge matcher, annotated with sentiment
        if let Some(text) = knowledge::lookup(message, now) {
            return Reply::Knowledge {
                text,
                sentiment: analysis.sentiment,
            };
        }

        // 3. Prediction trigger
        if PREDICT_TRIGGERS.iter().any(|t| lower.contains(t)) {
            let topic = match strip_trigger_words(&lower) {
                Ok(topic) => topic,
                Err(EngineError::EmptyTopic) => DEFAULT_TOPIC.to_string(),
                Err(_) => DEFAULT_TOPIC.to_string(),
            };
            return Reply::Prediction(prediction::predict(&topic, now.year(), rng));
        }

        // 4. Intent templates, first matching condition wins
        if let Some(rule) = INTENT_RULES.iter().find(|r| (r.matches)(&lower, &analysis)) {
            debug!("Dispatch: intent={}", rule.name);
            let ctx = TemplateContext {
                assistant_name: &self.config.assistant_name,
                analysis: &analysis,
                now,
            };
            return Reply::Template((rule.render)(&ctx));
        }

        // 5. Generic contextual fallback
        let year = now.year();
        let templates = fallback_templates(message, year);
        let mut text = templates[rng.gen_range(0..templates.len())].clone();

        if self.config.fallback_prediction
            && message.chars().count() > FLOURISH_MIN_CHARS
            && rng.gen_bool(self.config.effective_prediction_probability())
        {
            let related = prediction::predict(message, year, rng);
            text.push_str(&format!("\n\n**Related Prediction**: {}", related));
        }

        Reply::Fallback(text)
    }

    /// Render a reply body and append the date footer
    pub fn render(&self, reply: &Reply, now: DateTime<Utc>) -> String {
        let name = &self.config.assistant_name;
        let body = match reply {
            Reply::Calculator(calc) => format!(
                "**{} Calculator**\n\n**Result**: {}\n*Calculated: {} = {}*",
                name, calc.value, calc.expression, calc.value
            ),
            Reply::Knowledge { text, sentiment } => {
                if *sentiment == Sentiment::Neutral {
                    text.clone()
                } else {
                    format!(
                        "{}\n\n*I notice you're feeling {}. I'm here to help.*",
                        text, sentiment
                    )
                }
            }
            Reply::Prediction(text) => format!(
                "**{} Prediction**:\n\n{}\n\n*Predictions based on current trends and data analysis*",
                name, text
            ),
            Reply::Template(text) | Reply::Fallback(text) => text.clone(),
        };

        format!(
            "{}\n\n---\n*{} • {}*",
            body,
            name,
            now.format("%Y-%m-%d")
        )
    }
}

/// Remove prediction trigger words (and "what") to recover the topic
fn strip_trigger_words(lower: &str) -> Result<String, EngineError> {
    let mut topic = lower.to_string();
    for word in PREDICT_TRIGGERS.iter().chain(std::iter::once(&"what")) {
        topic = topic.replace(word, "");
    }
    let topic = topic
        .trim_matches(|c: char| c.is_whitespace() || c == '?' || c == '.' || c == ',')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if topic.is_empty() {
        Err(EngineError::EmptyTopic)
    } else {
        Ok(topic)
    }
}

/// True when `word` appears as a whole word in `text`
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric()).any(|w| w == word)
}

struct TemplateContext<'a> {
    assistant_name: &'a str,
    analysis: &'a AnalysisResult,
    now: DateTime<Utc>,
}

/// One intent template; conditions see the lower-cased message and the
/// sentiment analysis
struct IntentRule {
    name: &'static str,
    matches: fn(&str, &AnalysisResult) -> bool,
    render: fn(&TemplateContext) -> String,
}

/// Intent table in priority order
static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        name: "self_identification",
        matches: |m, _| m.contains("who are you") || m.contains("what are you"),
        render: render_self_identification,
    },
    IntentRule {
        name: "greeting",
        matches: |m, _| {
            contains_word(m, "hello") || contains_word(m, "hi") || contains_word(m, "hey")
        },
        render: render_greeting,
    },
    IntentRule {
        name: "time_date",
        matches: |m, _| contains_word(m, "time") || contains_word(m, "date"),
        render: render_time_date,
    },
    IntentRule {
        name: "support",
        matches: |_, a| matches!(a.sentiment, Sentiment::Negative | Sentiment::Anxious),
        render: render_support,
    },
    IntentRule {
        name: "meaning_of_life",
        matches: |m, _| m.contains("meaning of life") || m.contains("purpose"),
        render: render_meaning_of_life,
    },
    IntentRule {
        name: "ai_trends",
        matches: |m, _| contains_word(m, "ai") || m.contains("artificial intelligence"),
        render: render_ai_trends,
    },
];

fn render_self_identification(ctx: &TemplateContext) -> String {
    format!(
        "**I am {}** - a deterministic conversation engine\n\n\
         • **Capabilities**: real-time clock answers, mathematical computation, \
         sentiment-aware replies, predictive statements\n\
         • **Knowledge**: recent events, scientific discoveries, entertainment highlights\n\n\
         Ask me anything to get started!",
        ctx.assistant_name
    )
}

fn render_greeting(ctx: &TemplateContext) -> String {
    let hour = ctx.now.hour();
    let greeting = if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!(
        "{}! I'm **{}**. We're in {}, and it's {}. How can I help you today?",
        greeting,
        ctx.assistant_name,
        ctx.now.year(),
        ctx.now.format("%H:%M:%S")
    )
}

fn render_time_date(ctx: &TemplateContext) -> String {
    format!(
        "**Current Time**: {}\n**Today's Date**: {}\n**Year**: {}",
        ctx.now.format("%H:%M:%S"),
        ctx.now.format("%Y-%m-%d"),
        ctx.now.year()
    )
}

fn render_support(ctx: &TemplateContext) -> String {
    let insight = if ctx.analysis.sentiment == Sentiment::Anxious {
        "Anxiety often comes from uncertainty about what lies ahead. Focusing on the present moment can help."
    } else {
        "Negative emotions are natural and often pass with time and perspective."
    };
    format!(
        "I sense you might be feeling {}. Remember that challenges are opportunities for growth.\n\n\
         **Insight**: {}\n\n\
         How can I support you right now?",
        ctx.analysis.sentiment, insight
    )
}

fn render_meaning_of_life(_ctx: &TemplateContext) -> String {
    "**Philosophical Perspective**: The meaning of life is a profound question explored \
     through philosophy, science, and spirituality. Many find meaning in:\n\n\
     • **Connection**: relationships and community\n\
     • **Growth**: personal development and learning\n\
     • **Contribution**: making a positive impact\n\
     • **Experience**: appreciating existence itself\n\n\
     What gives your life meaning?"
        .to_string()
}

fn render_ai_trends(ctx: &TemplateContext) -> String {
    format!(
        "**AI in {}**: Artificial intelligence is transforming every industry. Current \
         trends include:\n\n\
         • Multimodal systems understanding text, images, and audio\n\
         • AI ethics and regulation becoming crucial\n\
         • AI-assisted scientific discovery accelerating\n\
         • Personalized assistants becoming ubiquitous",
        ctx.now.year()
    )
}

/// The four generic contextual templates, parameterized by message and year
fn fallback_templates(message: &str, year: i32) -> [String; 4] {
    [
        format!(
            "**Analysis**: \"{}\" - this relates to broader patterns in our current \
             technological and social landscape. In {}, we're seeing significant shifts in \
             how we process information and interact with technology.",
            message, year
        ),
        format!(
            "**Contextual Understanding**: your message about \"{}\" connects to several \
             important developments this year. The intersection of technology, society, and \
             individual experience creates fascinating dynamics worth exploring.",
            message
        ),
        format!(
            "**Comprehensive View**: regarding \"{}\" - this topic has relevance across \
             multiple domains, from technological implications to psychological impacts.",
            message
        ),
        format!(
            "**Integrated Perspective**: \"{}\" is an interesting case study in how current \
             trends ({}) are shaping our understanding of complex systems and human experience.",
            message, year
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> ReplyEngine {
        ReplyEngine::with_defaults()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 28, hour, 15, 0).unwrap()
    }

    fn select(message: &str) -> Reply {
        let mut rng = StdRng::seed_from_u64(42);
        engine().select(message, &[], at(10), &mut rng)
    }

    #[test]
    fn calculator_branch_wins_first() {
        assert_eq!(select("12 + 7").kind(), "calculator");
        // "what is 5% of current trends"-style overlap: arithmetic beats knowledge
        assert_eq!(select("what is 25% of 80").kind(), "calculator");
    }

    #[test]
    fn knowledge_branch_is_second() {
        assert_eq!(select("what time is it").kind(), "knowledge");
        assert_eq!(select("popular movies").kind(), "knowledge");
    }

    #[test]
    fn prediction_trigger_is_third() {
        assert_eq!(select("predict the evolution of space travel").kind(), "prediction");
        assert_eq!(select("tell me what will happen with health").kind(), "prediction");
    }

    #[test]
    fn empty_topic_defaults_to_technology() {
        // Nothing left after trigger stripping
        let reply = select("predict");
        assert_eq!(reply.kind(), "prediction");
    }

    #[test]
    fn intent_templates_are_fourth() {
        assert_eq!(select("who are you").kind(), "template");
        assert_eq!(select("hello").kind(), "template");
        assert_eq!(select("I feel so worried about everything").kind(), "template");
        assert_eq!(select("the meaning of life").kind(), "template");
    }

    #[test]
    fn fallback_is_last() {
        assert_eq!(select("bananas are yellow").kind(), "fallback");
    }

    #[test]
    fn greeting_branches_on_hour() {
        let e = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let morning = e.respond("hello", &[], at(9), &mut rng);
        assert!(morning.contains("Good morning"));
        let afternoon = e.respond("hello", &[], at(14), &mut rng);
        assert!(afternoon.contains("Good afternoon"));
        let evening = e.respond("hello", &[], at(21), &mut rng);
        assert!(evening.contains("Good evening"));
    }

    #[test]
    fn greeting_requires_whole_word() {
        // "this" and "something" contain "hi" but are not greetings
        assert_eq!(select("something about this").kind(), "fallback");
    }

    #[test]
    fn knowledge_reply_carries_sentiment_postscript() {
        let e = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let text = e.respond("I'm worried about current trends", &[], at(10), &mut rng);
        assert!(text.contains("Major Trends"));
        assert!(text.contains("I notice you're feeling anxious"));

        let neutral = e.respond("current trends", &[], at(10), &mut rng);
        assert!(!neutral.contains("I notice you're feeling"));
    }

    #[test]
    fn strip_trigger_words_recovers_topic() {
        assert_eq!(
            strip_trigger_words("predict the evolution of space").unwrap(),
            "the evolution of space"
        );
        assert_eq!(
            strip_trigger_words("predict?").unwrap_err(),
            EngineError::EmptyTopic
        );
    }

    #[test]
    fn footer_is_always_appended() {
        let e = engine();
        for message in ["12 + 7", "what time is it", "predict space", "hello", "xyzzy"] {
            let mut rng = StdRng::seed_from_u64(9);
            let text = e.respond(message, &[], at(10), &mut rng);
            assert!(
                text.ends_with("*Lumen • 2026-08-28*"),
                "footer missing for {:?}: {}",
                message,
                text
            );
        }
    }

    #[test]
    fn fallback_flourish_respects_toggle() {
        let config = lumen_common::EngineConfig {
            fallback_prediction: false,
            ..Default::default()
        };
        let e = ReplyEngine::new(config);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = e.respond("an unclassifiable but long message", &[], at(10), &mut rng);
            assert!(!text.contains("Related Prediction"));
        }
    }

    #[test]
    fn fallback_flourish_needs_long_message() {
        let e = engine();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            // 5 chars: under the threshold, flourish never fires
            let text = e.respond("xyzzy", &[], at(10), &mut rng);
            assert!(!text.contains("Related Prediction"));
        }
    }
}

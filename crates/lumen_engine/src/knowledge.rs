//! Knowledge matcher - canned informational blocks keyed by topic words.
//!
//! An ordered table of topic bindings is tried against the lower-cased
//! message; the first binding with any contained keyword wins, so
//! declaration order is a contract ("historical trends" resolves to the
//! history block because it is declared before trends). Renderers are
//! pure functions of the supplied wall clock and are never cached, since
//! the year can change between calls.

use chrono::{DateTime, Datelike, Utc};

const HISTORICAL_EVENTS: &[&str] = &[
    "2020: COVID-19 pandemic begins",
    "2022: Russia invades Ukraine",
    "2023: AI revolution with ChatGPT and similar models",
    "2024: Major global elections and geopolitical shifts",
];

const MAJOR_EVENTS: &[&str] = &[
    "AI technology continues rapid advancement with new multimodal models",
    "Space exploration sees renewed interest with lunar missions",
    "Climate change initiatives gain global momentum",
    "Quantum computing makes significant practical progress",
    "Renewable energy adoption reaches new records worldwide",
];

const MOVIES: &[&str] = &[
    "Dune: Part Two",
    "Deadpool & Wolverine",
    "Joker: Folie à Deux",
    "Avatar 3",
    "Gladiator 2",
    "Moana 2",
    "Mufasa: The Lion King",
];

const WEB_SERIES: &[&str] = &[
    "Stranger Things Season 5",
    "The Last of Us Season 2",
    "House of the Dragon Season 2",
    "The Lord of the Rings: The Rings of Power Season 2",
    "The Witcher Season 4",
];

const GAMES: &[&str] = &[
    "GTA VI",
    "Elden Ring: Shadow of the Erdtree",
    "Star Wars Outlaws",
    "Assassin's Creed Shadows",
    "Call of Duty: Black Ops 6",
];

const DISCOVERIES: &[&str] = &[
    "Advances in nuclear fusion energy production",
    "Breakthroughs in Alzheimer's treatment research",
    "Exoplanet discovery with potential habitable conditions",
    "AI-driven drug discovery acceleration",
    "Quantum supremacy demonstrations",
];

type Render = fn(DateTime<Utc>) -> String;

/// One topic binding; matching is substring containment on keywords
struct KnowledgeTopic {
    keywords: &'static [&'static str],
    render: Render,
}

/// Topic table in declaration order; first binding with a contained
/// keyword wins.
static TOPICS: &[KnowledgeTopic] = &[
    KnowledgeTopic {
        keywords: &["time", "hour", "clock"],
        render: render_time,
    },
    KnowledgeTopic {
        keywords: &["year"],
        render: render_year,
    },
    KnowledgeTopic {
        keywords: &["history", "historical"],
        render: render_history,
    },
    KnowledgeTopic {
        keywords: &["trend", "current", "news"],
        render: render_trends,
    },
    KnowledgeTopic {
        keywords: &["movie", "film"],
        render: render_movies,
    },
    KnowledgeTopic {
        keywords: &["series", "show", "netflix"],
        render: render_series,
    },
    KnowledgeTopic {
        keywords: &["game", "gaming"],
        render: render_games,
    },
    KnowledgeTopic {
        keywords: &["science", "discovery", "research"],
        render: render_science,
    },
    KnowledgeTopic {
        keywords: &["psychology", "mental", "mind"],
        render: render_psychology,
    },
];

/// Find the first topic block triggered by the text, rendered against
/// the supplied wall clock. `None` when no keyword is contained.
pub fn lookup(topic: &str, now: DateTime<Utc>) -> Option<String> {
    let lower = topic.to_lowercase();
    TOPICS
        .iter()
        .find(|t| t.keywords.iter().any(|k| lower.contains(k)))
        .map(|t| (t.render)(now))
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_time(now: DateTime<Utc>) -> String {
    format!(
        "**Current Time**: {}\n**Date**: {}\n**Timezone**: UTC",
        now.format("%H:%M:%S"),
        now.format("%Y-%m-%d")
    )
}

fn render_year(now: DateTime<Utc>) -> String {
    let year = now.year();
    format!(
        "We are currently in the year **{}**. This is year {} of the 2020s decade.",
        year,
        year - 2020
    )
}

fn render_history(_now: DateTime<Utc>) -> String {
    format!(
        "**Major Historical Events (Recent):**\n\n{}\n\n*History provides valuable lessons for our future decisions.*",
        bullets(HISTORICAL_EVENTS)
    )
}

fn render_trends(now: DateTime<Utc>) -> String {
    format!(
        "**{} Major Trends & Events:**\n\n{}\n\n*Staying informed helps us understand our rapidly changing world.*",
        now.year(),
        bullets(MAJOR_EVENTS)
    )
}

fn render_movies(now: DateTime<Utc>) -> String {
    format!(
        "**Popular Movies ({}):**\n\n{}\n\n*Entertainment continues to evolve with new storytelling technologies.*",
        now.year(),
        bullets(MOVIES)
    )
}

fn render_series(now: DateTime<Utc>) -> String {
    format!(
        "**Trending Web Series ({}):**\n\n{}\n\n*Streaming platforms are revolutionizing content consumption.*",
        now.year(),
        bullets(WEB_SERIES)
    )
}

fn render_games(now: DateTime<Utc>) -> String {
    format!(
        "**Upcoming Games ({}):**\n\n{}\n\n*Gaming continues to push boundaries of interactive entertainment.*",
        now.year(),
        bullets(GAMES)
    )
}

fn render_science(_now: DateTime<Utc>) -> String {
    format!(
        "**Recent Scientific Discoveries:**\n\n{}\n\n*Scientific progress accelerates our understanding of the universe.*",
        bullets(DISCOVERIES)
    )
}

fn render_psychology(_now: DateTime<Utc>) -> String {
    "**Psychological Insight**: Human psychology involves complex interactions between \
     cognition, emotion, and behavior. Understanding these patterns helps improve mental \
     wellbeing, relationships, and personal growth. Key areas include cognitive biases, \
     emotional intelligence, and behavioral psychology."
        .to_string()
}

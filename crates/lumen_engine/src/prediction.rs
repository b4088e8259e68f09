//! Prediction generator - forward-looking statements by topic category.
//!
//! Categories are tried in fixed order with substring matching; within a
//! category one template is chosen through the caller-supplied random
//! source, which is the engine's one acknowledged non-determinism
//! boundary. Templates embed the current year plus a per-template offset.

use rand::Rng;

/// A template parameterized by `current_year + offset`
struct PredictionTemplate {
    offset: i32,
    /// `{year}` is replaced with the offset year
    text: &'static str,
}

struct PredictionCategory {
    name: &'static str,
    templates: &'static [PredictionTemplate],
}

/// Category table in match order
static CATEGORIES: &[PredictionCategory] = &[
    PredictionCategory {
        name: "technology",
        templates: &[
            PredictionTemplate {
                offset: 2,
                text: "By {year}, AI will be integrated into 80% of enterprise software",
            },
            PredictionTemplate {
                offset: 5,
                text: "Quantum computers will solve practical problems by {year}",
            },
            PredictionTemplate {
                offset: 3,
                text: "AR/VR adoption will revolutionize education and remote work by {year}",
            },
        ],
    },
    PredictionCategory {
        name: "environment",
        templates: &[
            PredictionTemplate {
                offset: 8,
                text: "Renewable energy will surpass 50% of global energy production by {year}",
            },
            PredictionTemplate {
                offset: 10,
                text: "Electric vehicles will dominate new car sales by {year}",
            },
            PredictionTemplate {
                offset: 5,
                text: "Carbon capture technology will become commercially viable by {year}",
            },
        ],
    },
    PredictionCategory {
        name: "space",
        templates: &[
            PredictionTemplate {
                offset: 15,
                text: "Human mission to Mars is likely by {year}",
            },
            PredictionTemplate {
                offset: 8,
                text: "Lunar base establishment expected by {year}",
            },
            PredictionTemplate {
                offset: 12,
                text: "Space tourism will become accessible to middle-class by {year}",
            },
        ],
    },
    PredictionCategory {
        name: "health",
        templates: &[
            PredictionTemplate {
                offset: 5,
                text: "AI-assisted diagnosis will reduce medical errors by 40% by {year}",
            },
            PredictionTemplate {
                offset: 10,
                text: "Gene editing will cure genetic diseases by {year}",
            },
            PredictionTemplate {
                offset: 20,
                text: "Average human lifespan will reach 90 years by {year}",
            },
        ],
    },
];

/// Produce a prediction for the topic. Unknown topics get a generic
/// advancement statement embedding the literal topic text.
pub fn predict(topic: &str, current_year: i32, rng: &mut impl Rng) -> String {
    let lower = topic.to_lowercase();

    for category in CATEGORIES {
        if lower.contains(category.name) {
            let template = &category.templates[rng.gen_range(0..category.templates.len())];
            let year = current_year + template.offset;
            return template.text.replace("{year}", &year.to_string());
        }
    }

    format!(
        "Based on current trends, {} will see significant advancement in the coming years \
         through technological innovation and global collaboration.",
        topic
    )
}

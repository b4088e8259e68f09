//! Engine configuration.
//!
//! Loaded from a TOML file when one is present, otherwise defaults.
//! Every field has a serde default so partial files work.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Tunable settings for the reply engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name the assistant uses for itself in replies
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Simulated thinking delay before each reply (milliseconds)
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// How many trailing history turns the engine inspects
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Whether the fallback branch may append a related prediction
    #[serde(default = "default_fallback_prediction")]
    pub fallback_prediction: bool,

    /// Probability of appending that prediction (valid: 0.0-1.0)
    #[serde(default = "default_fallback_prediction_probability")]
    pub fallback_prediction_probability: f64,
}

fn default_assistant_name() -> String {
    "Lumen".to_string()
}

fn default_latency_ms() -> u64 {
    700
}

fn default_history_window() -> usize {
    5
}

fn default_fallback_prediction() -> bool {
    true
}

fn default_fallback_prediction_probability() -> f64 {
    0.3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            latency_ms: default_latency_ms(),
            history_window: default_history_window(),
            fallback_prediction: default_fallback_prediction(),
            fallback_prediction_probability: default_fallback_prediction_probability(),
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Probability clamped to the valid range (0.0-1.0)
    pub fn effective_prediction_probability(&self) -> f64 {
        self.fallback_prediction_probability.clamp(0.0, 1.0)
    }
}

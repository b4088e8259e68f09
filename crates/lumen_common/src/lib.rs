//! Shared types for the Lumen chat engine.
//!
//! Data model (messages, roles), engine configuration, and the engine
//! error type. No reply logic lives here.

pub mod config;
pub mod error;
pub mod message;

pub use config::EngineConfig;
pub use error::EngineError;
pub use message::{Message, Role};

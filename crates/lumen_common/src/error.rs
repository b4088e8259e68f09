//! Engine error type.
//!
//! These errors never reach the caller of the engine: each one signals
//! "this branch has nothing to say, try the next one" inside the
//! dispatcher. The engine as a whole always produces a reply.

/// Recoverable failures inside a reply branch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Text matches no supported grammar; fall through to the next branch
    #[error("input matches no supported expression grammar")]
    ParseFailure,

    /// Operands were recognized but the operation is undefined on them
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// Topic string was empty after stripping trigger words
    #[error("topic is empty after stripping trigger words")]
    EmptyTopic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EngineError::InvalidOperand("division by zero".into()).to_string(),
            "invalid operand: division by zero"
        );
        assert!(EngineError::ParseFailure.to_string().contains("grammar"));
    }
}

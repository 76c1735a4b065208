//! Error handling for the capital gains calculator
//!
//! Defines the domain error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for tax processing
#[derive(Error, Debug)]
pub enum CapitalGainsError {
    #[error("parse error: {0}")]
    ParseError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("oversell: selling {requested} units but only {held} held")]
    Oversell { requested: u64, held: u64 },

    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("encode error: {0}")]
    EncodeError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = CapitalGainsError::ParseError("expected `[`".to_string());
        assert_eq!(err.to_string(), "parse error: expected `[`");
    }

    #[test]
    fn test_oversell_message_names_quantities() {
        let err = CapitalGainsError::Oversell {
            requested: 20,
            held: 10,
        };
        assert_eq!(err.to_string(), "oversell: selling 20 units but only 10 held");
    }

    #[test]
    fn test_overflow_message_names_quantity() {
        let err = CapitalGainsError::Overflow("sale total value");
        assert_eq!(err.to_string(), "arithmetic overflow: sale total value");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> = Err(CapitalGainsError::ValidationError("rate".to_string()))
            .context("failed to build tax policy");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to build tax policy"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("validation error"));
                assert!(e.downcast_ref::<CapitalGainsError>().is_some());
            }
            Ok(_) => panic!("expected error"),
        }
    }
}

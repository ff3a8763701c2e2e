//! Error types for the arena.
//!
//! The tick loop itself never fails; errors surface only from spawning,
//! configuration setters and pure vector queries.

use thiserror::Error;

use crate::sim::BodyId;

/// Result alias used across the crate
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A numeric input was non-finite or outside its accepted range
    #[error("invalid {what}: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    /// A math query is undefined for its inputs (e.g. angle to a zero vector)
    #[error("domain error: {0}")]
    DomainError(String),

    /// No body with this id is registered
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// Settings could not be parsed
    #[error("config error: {0}")]
    Config(String),
}

impl SimError {
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

/// Reject NaN and infinities
pub(crate) fn require_finite(what: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(what, format!("expected a finite number, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("radius", 3.5), Ok(3.5));
        assert!(matches!(
            require_finite("radius", f64::NAN),
            Err(SimError::InvalidArgument { what: "radius", .. })
        ));
        assert!(require_finite("velocity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let e = SimError::invalid("frame rate", "must be at least 1");
        assert_eq!(e.to_string(), "invalid frame rate: must be at least 1");
        assert_eq!(SimError::UnknownBody(BodyId(7)).to_string(), "unknown body #7");
    }
}

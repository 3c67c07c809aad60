use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;

/// What made a bend or a straight run impossible to fabricate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DegenerateReason {
    /// Two consecutive waypoints coincide.
    CoincidentPoints,
    /// The vertex is a straight pass-through.
    Collinear,
    /// The path doubles back on itself at the vertex.
    Reversal,
    /// A straight run vanishes or inverts once trimmed to its tangent points.
    DegenerateTrim,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CoincidentPoints => "coincident points",
            Self::Collinear => "collinear points",
            Self::Reversal => "reversed direction",
            Self::DegenerateTrim => "degenerate trim",
        };
        f.write_str(s)
    }
}

/// Domain failure: the requested pipe cannot be built from the given geometry.
///
/// Meant to be shown to an operator, who can move a waypoint or pick a
/// smaller radius and try again.
#[derive(Debug, Clone, Error)]
#[error("Degenerate geometry ({reason}): {message}")]
pub struct GeometryError {
    reason: DegenerateReason,
    message: String,
    timestamp: OffsetDateTime,
}

impl GeometryError {
    pub fn new(reason: DegenerateReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn reason(&self) -> DegenerateReason {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// UTC time at which the failure was detected.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Prefix the message with the location of the failure, keeping the
    /// detection timestamp.
    pub fn context(mut self, location: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", location, self.message);
        self
    }
}

#[derive(Debug, Error)]
pub enum PipeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PipeError {
    pub fn degenerate(reason: DegenerateReason, message: impl Into<String>) -> Self {
        Self::Geometry(GeometryError::new(reason, message))
    }

    /// Whether the failure is a domain condition a host may report and
    /// recover from, as opposed to a caller bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    pub fn as_geometry(&self) -> Option<&GeometryError> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }

    pub fn context(self, location: impl fmt::Display) -> Self {
        match self {
            Self::Geometry(e) => Self::Geometry(e.context(location)),
            Self::InvalidInput(msg) => Self::InvalidInput(format!("{}: {}", location, msg)),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = PipeError::degenerate(DegenerateReason::Collinear, "vertex is a pass-through");
        assert_eq!(
            err.to_string(),
            "Degenerate geometry (collinear points): vertex is a pass-through"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_input_is_not_recoverable() {
        let err = PipeError::InvalidInput("need at least 3 points".into());
        assert!(!err.is_recoverable());
        assert!(err.as_geometry().is_none());
    }

    #[test]
    fn test_context_keeps_reason_and_timestamp() {
        let err = GeometryError::new(DegenerateReason::CoincidentPoints, "points too close");
        let stamp = err.timestamp();
        let err = err.context("bend 3");
        assert_eq!(err.reason(), DegenerateReason::CoincidentPoints);
        assert_eq!(err.message(), "bend 3: points too close");
        assert_eq!(err.timestamp(), stamp);
    }
}

//! Goal kinds and target validation.
//!
//! # Responsibility
//! - Name the closed set of goal kinds that progress tracking understands.
//! - Validate goal targets before they enter an athlete's goal map.
//!
//! # Invariants
//! - Goal keys stay free-form strings in storage; only `calories` and
//!   `duration` are tracked.
//! - Accepted targets are finite and strictly positive.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Goal kind recognized by progress tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GoalKind {
    /// Total estimated calories burned.
    Calories,
    /// Total logged minutes.
    Duration,
}

impl GoalKind {
    pub const ALL: [GoalKind; 2] = [GoalKind::Calories, GoalKind::Duration];

    /// Storage key used in the persisted goal map.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Duration => "duration",
        }
    }

    /// Maps a stored goal key to a recognized kind.
    ///
    /// Matching is exact; unknown keys return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl Display for GoalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal input error.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalError {
    /// Target is zero, negative, NaN or infinite.
    NonPositiveTarget { kind: String, target: f64 },
}

impl Display for GoalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveTarget { kind, target } => write!(
                f,
                "goal `{kind}` target must be a positive number, got {target}"
            ),
        }
    }
}

impl Error for GoalError {}

/// Checks that a goal target can be used as a progress denominator.
pub fn validate_target(kind: &str, target: f64) -> Result<(), GoalError> {
    if target.is_finite() && target > 0.0 {
        return Ok(());
    }
    Err(GoalError::NonPositiveTarget {
        kind: kind.to_string(),
        target,
    })
}

//! Exercise record domain model.
//!
//! # Responsibility
//! - Define one logged activity entry and its display projection.
//! - Capture the wall-clock moment an entry is created.
//!
//! # Invariants
//! - Fields are private and never mutated after construction.
//! - `timestamp` is always rendered with `TIMESTAMP_FORMAT`.
//! - No range validation is applied to duration or intensity.

use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt::{Display, Formatter};

/// Capture-time layout used for display and persistence.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One immutable logged exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecord {
    name: String,
    category: String,
    duration_min: i64,
    intensity: i64,
    timestamp: NaiveDateTime,
}

impl ExerciseRecord {
    /// Creates a record stamped with the current local time.
    ///
    /// `category` is free text; `Cardio`, `Strength` and `Flexibility` are
    /// conventional but not enforced. Intensity is conventionally `1..=10`.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        duration_min: i64,
        intensity: i64,
    ) -> Self {
        Self::with_timestamp(name, category, duration_min, intensity, local_now())
    }

    /// Creates a record with a caller-provided capture time.
    ///
    /// Sub-second precision is dropped so the value matches its rendered form.
    pub fn with_timestamp(
        name: impl Into<String>,
        category: impl Into<String>,
        duration_min: i64,
        intensity: i64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            duration_min,
            intensity,
            timestamp: truncate_to_seconds(timestamp),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn duration_min(&self) -> i64 {
        self.duration_min
    }

    pub fn intensity(&self) -> i64 {
        self.intensity
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Capture time formatted as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Human-readable one-line summary, used for display only.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for ExerciseRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({}) - {} min, Intensity: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.name,
            self.category,
            self.duration_min,
            self.intensity
        )
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    // Stored precision must match the rendered layout.
    value.with_nanosecond(0).unwrap_or(value)
}

//! Derived exercise metrics and goal progress.
//!
//! # Responsibility
//! - Estimate calories burned and total logged minutes.
//! - Convert goal targets into progress percentages.
//!
//! # Invariants
//! - Empty input yields zero for every aggregate.
//! - Aggregates never panic on unvalidated record values.
//! - Only recognized goal kinds appear in progress output.
//! - A target that cannot be a denominator never yields an entry.

use crate::model::exercise::ExerciseRecord;
use crate::model::goal::GoalKind;
use std::collections::BTreeMap;

/// Empirical calories per (minute * intensity * kg).
pub const CALORIE_FACTOR: f64 = 0.0175;

/// Progress percentage per recognized goal kind.
pub type ProgressReport = BTreeMap<GoalKind, f64>;

/// Sums `duration * intensity * weight * CALORIE_FACTOR` over all records.
pub fn calories_burned<'a, I>(weight_kg: f64, records: I) -> f64
where
    I: IntoIterator<Item = &'a ExerciseRecord>,
{
    records
        .into_iter()
        .map(|record| {
            record.duration_min() as f64 * record.intensity() as f64 * weight_kg * CALORIE_FACTOR
        })
        .sum()
}

/// Sums logged minutes over all records.
///
/// Durations are unvalidated; the sum saturates at the `i64` bounds.
pub fn total_duration<'a, I>(records: I) -> i64
where
    I: IntoIterator<Item = &'a ExerciseRecord>,
{
    records
        .into_iter()
        .map(ExerciseRecord::duration_min)
        .fold(0_i64, i64::saturating_add)
}

/// `(current / target) * 100`.
pub fn progress_percentage(current: f64, target: f64) -> Option<f64> {
    if !target.is_finite() || target <= 0.0 {
        return None;
    }
    Some(current / target * 100.0)
}

/// Builds a progress report from a goal map and current metric values.
///
/// `current` is queried lazily, once per recognized kind present in `goals`.
/// Unrecognized keys are skipped without error.
pub fn track_progress<F>(goals: &BTreeMap<String, f64>, mut current: F) -> ProgressReport
where
    F: FnMut(GoalKind) -> f64,
{
    let mut report = ProgressReport::new();
    for (key, target) in goals {
        let Some(kind) = GoalKind::from_key(key) else {
            continue;
        };
        if let Some(percent) = progress_percentage(current(kind), *target) {
            report.insert(kind, percent);
        }
    }
    report
}

//! Athlete aggregate root.
//!
//! # Responsibility
//! - Own one user's exercise log and goal map.
//! - Expose logging, deletion, metric, goal and persistence operations.
//!
//! # Invariants
//! - `exercises` is append-only except for `delete_last_exercise` and a
//!   full `load_progress` replacement.
//! - Goal keys are unique; setting an existing key overwrites its target.
//! - A failed load leaves every field untouched.

use crate::metrics::{self, ProgressReport};
use crate::model::exercise::ExerciseRecord;
use crate::model::goal::{validate_target, GoalError, GoalKind};
use crate::repo::progress_repo::{
    ExerciseSnapshot, JsonFileProgressRepository, PersistenceResult, ProgressRepository,
    ProgressSnapshot,
};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::iter::Enumerate;
use std::path::Path;
use std::slice::Iter;

/// One user's exercise log, goals and body metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Athlete {
    username: String,
    age: u32,
    weight_kg: f64,
    exercises: Vec<ExerciseRecord>,
    goals: BTreeMap<String, f64>,
}

impl Athlete {
    /// Creates an athlete with an empty log and no goals.
    pub fn new(username: impl Into<String>, age: u32, weight_kg: f64) -> Self {
        Self {
            username: username.into(),
            age,
            weight_kg,
            exercises: Vec::new(),
            goals: BTreeMap::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Logged records in chronological log order.
    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn goals(&self) -> &BTreeMap<String, f64> {
        &self.goals
    }

    pub fn goal_target(&self, kind: &str) -> Option<f64> {
        self.goals.get(kind).copied()
    }

    /// Appends one record to the end of the log.
    pub fn log_exercise(&mut self, record: ExerciseRecord) {
        self.exercises.push(record);
        debug!(
            "event=exercise_log module=athlete status=ok count={}",
            self.exercises.len()
        );
    }

    /// Removes and returns the most recently logged record.
    ///
    /// Returns `None` when the log is empty.
    pub fn delete_last_exercise(&mut self) -> Option<ExerciseRecord> {
        let removed = self.exercises.pop();
        debug!(
            "event=exercise_delete_last module=athlete status={} count={}",
            if removed.is_some() { "ok" } else { "empty" },
            self.exercises.len()
        );
        removed
    }

    /// Estimated calories burned across the whole log.
    pub fn calculate_calories_burned(&self) -> f64 {
        metrics::calories_burned(self.weight_kg, &self.exercises)
    }

    /// Total logged minutes across the whole log.
    pub fn calculate_total_duration(&self) -> i64 {
        metrics::total_duration(&self.exercises)
    }

    /// Inserts or overwrites the target for `kind`.
    ///
    /// Any kind string is stored; only recognized kinds are tracked.
    ///
    /// # Errors
    /// - Returns `GoalError::NonPositiveTarget` for zero, negative or
    ///   non-finite targets. The goal map is unchanged in that case.
    pub fn set_goal(&mut self, kind: impl Into<String>, target: f64) -> Result<(), GoalError> {
        let kind = kind.into();
        validate_target(&kind, target)?;
        debug!(
            "event=goal_set module=athlete status=ok tracked={}",
            GoalKind::from_key(&kind).is_some()
        );
        self.goals.insert(kind, target);
        Ok(())
    }

    /// Percentage progress for every recognized goal that is set.
    ///
    /// Unrecognized goal kinds are omitted. Empty when no goals apply.
    pub fn track_progress(&self) -> ProgressReport {
        metrics::track_progress(&self.goals, |kind| match kind {
            GoalKind::Calories => self.calculate_calories_burned(),
            GoalKind::Duration => self.calculate_total_duration() as f64,
        })
    }

    /// Indexed view of the log for display.
    pub fn exercise_history(&self) -> ExerciseHistory<'_> {
        if self.exercises.is_empty() {
            ExerciseHistory::NoExercises
        } else {
            ExerciseHistory::Entries(HistoryEntries {
                records: &self.exercises,
            })
        }
    }

    /// Captures the full persisted state.
    pub fn to_snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            username: self.username.clone(),
            age: self.age,
            weight: self.weight_kg,
            exercises: self
                .exercises
                .iter()
                .map(|record| ExerciseSnapshot {
                    name: record.name().to_string(),
                    category: record.category().to_string(),
                    duration_min: record.duration_min(),
                    intensity: record.intensity(),
                    timestamp: record.timestamp_text(),
                })
                .collect(),
            goals: self.goals.clone(),
        }
    }

    /// Builds an athlete from a snapshot.
    ///
    /// Records are reconstructed with a fresh capture time; persisted
    /// timestamps are not restored.
    pub fn from_snapshot(snapshot: ProgressSnapshot) -> Self {
        Self {
            username: snapshot.username,
            age: snapshot.age,
            weight_kg: snapshot.weight,
            exercises: snapshot
                .exercises
                .into_iter()
                .map(|entry| {
                    ExerciseRecord::new(
                        entry.name,
                        entry.category,
                        entry.duration_min,
                        entry.intensity,
                    )
                })
                .collect(),
            goals: snapshot.goals,
        }
    }

    /// Writes the full state to `repo`.
    pub fn save_to<R: ProgressRepository>(&self, repo: &R) -> PersistenceResult<()> {
        repo.save(&self.to_snapshot())
    }

    /// Replaces the full state with the snapshot stored in `repo`.
    ///
    /// # Errors
    /// - `NotFound`, `Read` or `Malformed` from the repository; state is left
    ///   untouched on every error path.
    pub fn load_from<R: ProgressRepository>(&mut self, repo: &R) -> PersistenceResult<()> {
        let snapshot = repo.load()?;
        *self = Self::from_snapshot(snapshot);
        info!(
            "event=progress_apply module=athlete status=ok exercises={} goals={}",
            self.exercises.len(),
            self.goals.len()
        );
        Ok(())
    }

    /// Saves the full state as JSON at `path`, overwriting existing content.
    pub fn save_progress(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        self.save_to(&JsonFileProgressRepository::new(path))
    }

    /// Loads the full state from the JSON document at `path`.
    pub fn load_progress(&mut self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        self.load_from(&JsonFileProgressRepository::new(path))
    }
}

/// Display view of an athlete's log.
///
/// An empty log is reported as `NoExercises` rather than an empty listing.
#[derive(Debug, Clone, Copy)]
pub enum ExerciseHistory<'a> {
    NoExercises,
    Entries(HistoryEntries<'a>),
}

impl<'a> ExerciseHistory<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoExercises)
    }

    /// Entries when the log is non-empty.
    pub fn entries(&self) -> Option<HistoryEntries<'a>> {
        match self {
            Self::NoExercises => None,
            Self::Entries(entries) => Some(*entries),
        }
    }
}

impl Display for ExerciseHistory<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoExercises => f.write_str("No exercises logged yet."),
            Self::Entries(entries) => {
                f.write_str("Exercise History:")?;
                for (index, record) in entries.iter() {
                    write!(f, "\n{index}. {record}")?;
                }
                Ok(())
            }
        }
    }
}

/// Restartable, 1-based indexed listing of a non-empty log.
#[derive(Debug, Clone, Copy)]
pub struct HistoryEntries<'a> {
    records: &'a [ExerciseRecord],
}

impl<'a> HistoryEntries<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Yields `(index, record)` pairs in log order, starting at 1.
    pub fn iter(&self) -> HistoryIter<'a> {
        HistoryIter {
            inner: self.records.iter().enumerate(),
        }
    }
}

impl<'a> IntoIterator for HistoryEntries<'a> {
    type Item = (usize, &'a ExerciseRecord);
    type IntoIter = HistoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(1-based index, record)` pairs.
#[derive(Debug, Clone)]
pub struct HistoryIter<'a> {
    inner: Enumerate<Iter<'a, ExerciseRecord>>,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = (usize, &'a ExerciseRecord);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, record)| (index + 1, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for HistoryIter<'_> {}

#[cfg(test)]
mod tests {
    use super::{Athlete, ExerciseHistory};
    use crate::model::exercise::ExerciseRecord;

    #[test]
    fn history_display_lists_one_based_entries() {
        let mut athlete = Athlete::new("ana", 28, 55.0);
        athlete.log_exercise(ExerciseRecord::new("Squat", "Strength", 15, 8));
        athlete.log_exercise(ExerciseRecord::new("Stretch", "Flexibility", 10, 2));

        let rendered = athlete.exercise_history().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Exercise History:");
        assert!(lines[1].starts_with("1. "));
        assert!(lines[1].ends_with("Squat (Strength) - 15 min, Intensity: 8"));
        assert!(lines[2].starts_with("2. "));
    }

    #[test]
    fn history_entries_can_be_iterated_twice() {
        let mut athlete = Athlete::new("ana", 28, 55.0);
        athlete.log_exercise(ExerciseRecord::new("Bike", "Cardio", 40, 6));

        let entries = athlete
            .exercise_history()
            .entries()
            .expect("non-empty log should have entries");
        let first: Vec<usize> = entries.iter().map(|(index, _)| index).collect();
        let second: Vec<usize> = entries.into_iter().map(|(index, _)| index).collect();

        assert_eq!(first, vec![1]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_history_renders_explicit_message() {
        let athlete = Athlete::new("ana", 28, 55.0);
        let history = athlete.exercise_history();

        assert!(matches!(history, ExerciseHistory::NoExercises));
        assert_eq!(history.to_string(), "No exercises logged yet.");
    }
}

//! Progress snapshot contracts and JSON file implementation.
//!
//! # Responsibility
//! - Define the persisted athlete document shape and its exact field names.
//! - Read and write whole snapshots against a storage target.
//!
//! # Invariants
//! - A missing target is reported as `NotFound`, never as a parse failure.
//! - Load either returns a complete snapshot or an error; nothing partial.
//! - Save replaces any existing content at the target.
//! - Save never writes a document that load would reject.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Conventional save/load target used when the caller names none.
pub const DEFAULT_PROGRESS_FILE: &str = "progress.json";

const JSON_INDENT: &[u8] = b"    ";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence failure for progress save/load.
#[derive(Debug)]
pub enum PersistenceError {
    /// Load target does not exist.
    NotFound(PathBuf),
    /// Load target exists but is not a valid progress document.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Load target exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Save target could not be written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot could not be encoded.
    Encode(serde_json::Error),
    /// A numeric field has no JSON representation (NaN or infinite).
    NonFinite { field: String, value: f64 },
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no saved progress found at `{}`", path.display()),
            Self::Malformed { path, source } => write!(
                f,
                "saved progress at `{}` is malformed: {source}",
                path.display()
            ),
            Self::Read { path, source } => write!(
                f,
                "failed to read saved progress at `{}`: {source}",
                path.display()
            ),
            Self::Write { path, source } => write!(
                f,
                "failed to write progress to `{}`: {source}",
                path.display()
            ),
            Self::Encode(source) => write!(f, "failed to encode progress: {source}"),
            Self::NonFinite { field, value } => write!(
                f,
                "cannot save `{field}` = {value}; only finite numbers are stored"
            ),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Malformed { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::Encode(source) => Some(source),
            Self::NonFinite { .. } => None,
        }
    }
}

/// Persisted athlete document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub username: String,
    pub age: u32,
    /// Body weight in kilograms.
    pub weight: f64,
    /// Log order is preserved.
    pub exercises: Vec<ExerciseSnapshot>,
    /// Keys are free-form; `calories` and `duration` are the tracked kinds.
    pub goals: BTreeMap<String, f64>,
}

/// Persisted form of one exercise record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSnapshot {
    pub name: String,
    pub category: String,
    pub duration_min: i64,
    pub intensity: i64,
    /// `YYYY-MM-DD HH:MM:SS`. Written on save, not restored on load.
    #[serde(default)]
    pub timestamp: String,
}

/// Storage interface for whole progress snapshots.
pub trait ProgressRepository {
    fn save(&self, snapshot: &ProgressSnapshot) -> PersistenceResult<()>;
    fn load(&self) -> PersistenceResult<ProgressSnapshot>;
}

/// JSON file backed progress repository.
#[derive(Debug, Clone)]
pub struct JsonFileProgressRepository {
    path: PathBuf,
}

impl JsonFileProgressRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileProgressRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_FILE)
    }
}

impl ProgressRepository for JsonFileProgressRepository {
    fn save(&self, snapshot: &ProgressSnapshot) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let encoded = encode_snapshot(snapshot)?;

        if let Err(err) = std::fs::write(&self.path, encoded) {
            error!(
                "event=progress_save module=repo status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(PersistenceError::Write {
                path: self.path.clone(),
                source: err,
            });
        }

        info!(
            "event=progress_save module=repo status=ok duration_ms={} exercises={} goals={}",
            started_at.elapsed().as_millis(),
            snapshot.exercises.len(),
            snapshot.goals.len()
        );
        Ok(())
    }

    fn load(&self) -> PersistenceResult<ProgressSnapshot> {
        let started_at = Instant::now();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("event=progress_load module=repo status=not_found");
                return Err(PersistenceError::NotFound(self.path.clone()));
            }
            Err(err) => {
                error!(
                    "event=progress_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let snapshot = serde_json::from_str::<ProgressSnapshot>(&raw).map_err(|err| {
            error!(
                "event=progress_load module=repo status=error error_code=malformed line={} column={}",
                err.line(),
                err.column()
            );
            PersistenceError::Malformed {
                path: self.path.clone(),
                source: err,
            }
        })?;

        info!(
            "event=progress_load module=repo status=ok duration_ms={} exercises={} goals={}",
            started_at.elapsed().as_millis(),
            snapshot.exercises.len(),
            snapshot.goals.len()
        );
        Ok(snapshot)
    }
}

/// Encodes a snapshot as 4-space indented JSON.
///
/// Non-finite numbers are rejected; JSON would store them as `null`, which
/// no later load accepts.
fn encode_snapshot(snapshot: &ProgressSnapshot) -> PersistenceResult<Vec<u8>> {
    ensure_finite("weight", snapshot.weight)?;
    for (kind, target) in &snapshot.goals {
        ensure_finite(&format!("goals.{kind}"), *target)?;
    }

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    snapshot
        .serialize(&mut serializer)
        .map_err(PersistenceError::Encode)?;
    Ok(buffer)
}

fn ensure_finite(field: &str, value: f64) -> PersistenceResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    error!("event=progress_save module=repo status=error error_code=non_finite_number");
    Err(PersistenceError::NonFinite {
        field: field.to_string(),
        value,
    })
}

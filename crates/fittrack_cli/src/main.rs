//! Command-line front end for the fitness journal.
//!
//! # Responsibility
//! - Parse raw arguments into core operation inputs.
//! - Load the progress file, run one core operation, save when it mutated.
//! - Format core results for the terminal.
//!
//! # Invariants
//! - No domain logic lives here; every rule is enforced by `fittrack_core`.
//! - Usage and input errors exit with code 2, core failures with code 1.

mod command;

use command::{parse_command, CliError, Command};
use fittrack_core::{
    core_version, default_log_level, init_logging, Athlete, ExerciseHistory, ExerciseRecord,
    GoalKind, PersistenceError, DEFAULT_PROGRESS_FILE,
};
use log::warn;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const PROGRESS_FILE_ENV: &str = "FITTRACK_PROGRESS_FILE";
const LOG_DIR_ENV: &str = "FITTRACK_LOG_DIR";
const LOG_LEVEL_ENV: &str = "FITTRACK_LOG_LEVEL";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level =
            std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let progress_file = std::env::var_os(PROGRESS_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRESS_FILE));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&args, &progress_file, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_usage() {
                eprintln!("{}", command::USAGE);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Executes one command against the progress file at `progress_file`.
fn run(args: &[String], progress_file: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let command = parse_command(args)?;

    match command {
        Command::Version => {
            writeln!(out, "fittrack {}", core_version())?;
        }
        Command::Init {
            username,
            age,
            weight_kg,
        } => {
            let athlete = Athlete::new(username, age, weight_kg);
            athlete.save_progress(progress_file)?;
            writeln!(out, "Profile created for {}.", athlete.username())?;
        }
        Command::Log {
            name,
            category,
            duration_min,
            intensity,
        } => {
            let mut athlete = load_athlete(progress_file)?;
            athlete.log_exercise(ExerciseRecord::new(name, category, duration_min, intensity));
            athlete.save_progress(progress_file)?;
            writeln!(out, "Exercise logged successfully!")?;
        }
        Command::History => {
            let athlete = load_athlete(progress_file)?;
            writeln!(out, "{}", athlete.exercise_history())?;
        }
        Command::DeleteLast => {
            let mut athlete = load_athlete(progress_file)?;
            match athlete.delete_last_exercise() {
                Some(removed) => {
                    athlete.save_progress(progress_file)?;
                    writeln!(out, "Deleted last exercise: {removed}")?;
                }
                None => writeln!(out, "No exercises to delete.")?,
            }
        }
        Command::Goal { kind, target } => {
            let mut athlete = load_athlete(progress_file)?;
            athlete.set_goal(kind.as_str(), target)?;
            athlete.save_progress(progress_file)?;
            writeln!(out, "Goal set successfully!")?;
            if GoalKind::from_key(&kind).is_none() {
                warn!("event=goal_set module=cli status=untracked");
                writeln!(
                    out,
                    "Note: `{kind}` is not tracked; progress covers calories and duration."
                )?;
            }
        }
        Command::Progress => {
            let athlete = load_athlete(progress_file)?;
            let progress = athlete.track_progress();
            if progress.is_empty() {
                writeln!(out, "No goals set yet.")?;
            }
            for (kind, percent) in &progress {
                writeln!(out, "Progress towards {kind} goal: {percent:.2}%")?;
            }
        }
        Command::Stats => {
            let athlete = load_athlete(progress_file)?;
            let history = athlete.exercise_history();
            writeln!(
                out,
                "{} (age {}, {} kg)",
                athlete.username(),
                athlete.age(),
                athlete.weight_kg()
            )?;
            match history {
                ExerciseHistory::NoExercises => writeln!(out, "Exercises logged: 0")?,
                ExerciseHistory::Entries(entries) => {
                    writeln!(out, "Exercises logged: {}", entries.len())?
                }
            }
            writeln!(
                out,
                "Total duration: {} min",
                athlete.calculate_total_duration()
            )?;
            writeln!(
                out,
                "Calories burned: {:.2}",
                athlete.calculate_calories_burned()
            )?;
        }
    }

    Ok(())
}

fn load_athlete(progress_file: &Path) -> Result<Athlete, CliError> {
    let mut athlete = Athlete::new(String::new(), 0, 0.0);
    match athlete.load_progress(progress_file) {
        Ok(()) => Ok(athlete),
        Err(PersistenceError::NotFound(path)) => Err(CliError::NoProfile(path)),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::command::CliError;
    use std::path::Path;

    fn run_ok(args: &[&str], progress_file: &Path) -> String {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        let mut out = Vec::new();
        run(&args, progress_file, &mut out).expect("command should succeed");
        String::from_utf8(out).expect("output should be UTF-8")
    }

    fn run_err(args: &[&str], progress_file: &Path) -> CliError {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        run(&args, progress_file, &mut Vec::new()).expect_err("command should fail")
    }

    #[test]
    fn commands_share_state_through_progress_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");

        run_ok(&["init", "sam", "30", "70"], &file);
        run_ok(&["log", "Run", "Cardio", "30", "5"], &file);
        run_ok(&["goal", "calories", "367.5"], &file);

        assert_eq!(
            run_ok(&["progress"], &file),
            "Progress towards calories goal: 50.00%\n"
        );
        let stats = run_ok(&["stats"], &file);
        assert!(stats.contains("Exercises logged: 1"));
        assert!(stats.contains("Total duration: 30 min"));
        assert!(stats.contains("Calories burned: 183.75"));
    }

    #[test]
    fn empty_log_messages_are_reported() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");
        run_ok(&["init", "sam", "30", "70"], &file);

        assert_eq!(run_ok(&["history"], &file), "No exercises logged yet.\n");
        assert_eq!(run_ok(&["delete-last"], &file), "No exercises to delete.\n");
        assert_eq!(run_ok(&["progress"], &file), "No goals set yet.\n");
    }

    #[test]
    fn delete_last_persists_removal() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");
        run_ok(&["init", "sam", "30", "70"], &file);
        run_ok(&["log", "Run", "Cardio", "30", "5"], &file);

        let output = run_ok(&["delete-last"], &file);
        assert!(output.starts_with("Deleted last exercise: "));
        assert!(output.ends_with("Run (Cardio) - 30 min, Intensity: 5\n"));
        assert_eq!(run_ok(&["history"], &file), "No exercises logged yet.\n");
    }

    #[test]
    fn untracked_goal_kind_is_saved_with_note() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");
        run_ok(&["init", "sam", "30", "70"], &file);

        let output = run_ok(&["goal", "steps", "8000"], &file);
        assert!(output.contains("not tracked"));
        assert_eq!(run_ok(&["progress"], &file), "No goals set yet.\n");
    }

    #[test]
    fn commands_without_profile_report_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");

        let err = run_err(&["history"], &file);
        assert!(matches!(err, CliError::NoProfile(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn rejected_goal_target_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");
        run_ok(&["init", "sam", "30", "70"], &file);
        let before = std::fs::read_to_string(&file).expect("profile should exist");

        let err = run_err(&["goal", "calories", "0"], &file);
        assert!(matches!(err, CliError::Goal(_)));
        assert_eq!(
            std::fs::read_to_string(&file).expect("profile should still exist"),
            before
        );
    }

    #[test]
    fn init_with_non_finite_weight_creates_no_profile() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let file = dir.path().join("progress.json");

        let err = run_err(&["init", "sam", "30", "nan"], &file);
        assert!(matches!(err, CliError::InvalidInput { field: "weight", .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!file.exists());
    }
}

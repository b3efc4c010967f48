//! Argument parsing and CLI error taxonomy.

use fittrack_core::{GoalError, PersistenceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "usage: fittrack <command> [args]

commands:
  init <username> <age> <weight_kg>                  create or reset the profile
  log <name> <category> <duration_min> <intensity>   log one exercise
  history                                            list logged exercises
  delete-last                                        remove the last exercise
  goal <calories|duration> <target>                  set or overwrite a goal
  progress                                           show goal progress
  stats                                              show totals
  version                                            print the core version

environment:
  FITTRACK_PROGRESS_FILE   progress file (default: progress.json)
  FITTRACK_LOG_DIR         absolute directory for rolling log files
  FITTRACK_LOG_LEVEL       trace|debug|info|warn|error";

/// One parsed CLI invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init {
        username: String,
        age: u32,
        weight_kg: f64,
    },
    Log {
        name: String,
        category: String,
        duration_min: i64,
        intensity: i64,
    },
    History,
    DeleteLast,
    Goal {
        kind: String,
        target: f64,
    },
    Progress,
    Stats,
    Version,
}

#[derive(Debug)]
pub enum CliError {
    /// Unknown command or wrong argument count.
    Usage(String),
    /// Argument present but not parseable as the expected type.
    InvalidInput { field: &'static str, value: String },
    /// No progress file exists yet.
    NoProfile(PathBuf),
    Goal(GoalError),
    Persistence(PersistenceError),
    Output(std::io::Error),
}

impl CliError {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::InvalidInput { .. } | Self::Goal(_) => 2,
            Self::NoProfile(_) | Self::Persistence(_) | Self::Output(_) => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => f.write_str(message),
            Self::InvalidInput { field, value } => write!(f, "invalid {field}: `{value}`"),
            Self::NoProfile(path) => write!(
                f,
                "no saved progress found at `{}`; run `fittrack init` first",
                path.display()
            ),
            Self::Goal(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Goal(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GoalError> for CliError {
    fn from(value: GoalError) -> Self {
        Self::Goal(value)
    }
}

impl From<PersistenceError> for CliError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

/// Parses `args` (without the program name) into a command.
pub fn parse_command(args: &[String]) -> Result<Command, CliError> {
    let Some((name, rest)) = args.split_first() else {
        return Err(CliError::Usage("missing command".to_string()));
    };

    match name.as_str() {
        "init" => {
            let [username, age, weight] = expect_args::<3>(name, rest)?;
            Ok(Command::Init {
                username: username.clone(),
                age: parse_field("age", age)?,
                weight_kg: parse_finite("weight", weight)?,
            })
        }
        "log" => {
            let [exercise, category, duration, intensity] = expect_args::<4>(name, rest)?;
            Ok(Command::Log {
                name: exercise.clone(),
                category: category.clone(),
                duration_min: parse_field("duration", duration)?,
                intensity: parse_field("intensity", intensity)?,
            })
        }
        "goal" => {
            let [kind, target] = expect_args::<2>(name, rest)?;
            Ok(Command::Goal {
                kind: kind.trim().to_string(),
                target: parse_field("target value", target)?,
            })
        }
        "history" => expect_args::<0>(name, rest).map(|_| Command::History),
        "delete-last" => expect_args::<0>(name, rest).map(|_| Command::DeleteLast),
        "progress" => expect_args::<0>(name, rest).map(|_| Command::Progress),
        "stats" => expect_args::<0>(name, rest).map(|_| Command::Stats),
        "version" | "--version" => expect_args::<0>(name, rest).map(|_| Command::Version),
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

fn expect_args<'a, const N: usize>(
    command: &str,
    rest: &'a [String],
) -> Result<&'a [String; N], CliError> {
    rest.try_into().map_err(|_| {
        CliError::Usage(format!(
            "`{command}` expects {N} argument(s), got {}",
            rest.len()
        ))
    })
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::InvalidInput {
        field,
        value: value.to_string(),
    })
}

// `f64::from_str` accepts `nan` and `inf`, which a progress file cannot store.
fn parse_finite(field: &'static str, value: &str) -> Result<f64, CliError> {
    let parsed: f64 = parse_field(field, value)?;
    if !parsed.is_finite() {
        return Err(CliError::InvalidInput {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

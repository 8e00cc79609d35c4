use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

pub const DEFAULT_FILE: &str = "training_data.csv";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug)]
pub enum ArgsError {
    MissingCommand,
    UnknownCommand(String),
    MissingValue { flag: &'static str },
    MissingFlag { flag: &'static str },
    UnknownArg(String),
    InvalidDate { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    InvalidFile { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingCommand => write!(f, "missing command"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDate { raw } => {
                write!(f, "invalid --date value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidFile { raw } => write!(f, "invalid --file value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  workout-log <command> [--file <csv>] [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  show            [--date D]                 entries on a date");
    eprintln!("  programs        [--date D]                 programs on a date");
    eprintln!("  create-program  --program P [--date D]     add an empty program");
    eprintln!("  add             --program P --exercise E --weight KG --reps N [--date D]");
    eprintln!("  delete          --program P [--exercise E] [--nth K] [--date D]");
    eprintln!("                  remove the K-th (default 1) set of E, or the empty program");
    eprintln!("  volume                                     total volume per date");
    eprintln!("  history         --exercise E               all sets of an exercise");
    eprintln!("  recent          [--limit N]                latest sets (default {DEFAULT_RECENT_LIMIT})");
    eprintln!("  exercises                                  known exercise names");
    eprintln!();
    eprintln!("Dates default to today.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WORKOUT_LOG_FILE   record file (default {DEFAULT_FILE})");
    eprintln!("  WORKOUT_LOG_LEVEL  log level: error, warn, info, debug, trace (default info)");
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show { date: Option<NaiveDate> },
    Programs { date: Option<NaiveDate> },
    CreateProgram { date: Option<NaiveDate>, program: String },
    Add {
        date: Option<NaiveDate>,
        program: String,
        exercise: String,
        weight: f64,
        reps: i64,
    },
    Delete {
        date: Option<NaiveDate>,
        program: String,
        exercise: Option<String>,
        occurrence: u32,
    },
    Volume,
    History { exercise: String },
    Recent { limit: usize },
    Exercises,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub file: PathBuf,
    pub command: Command,
}

#[derive(Default)]
struct Flags {
    file: Option<String>,
    date: Option<String>,
    program: Option<String>,
    exercise: Option<String>,
    weight: Option<String>,
    reps: Option<String>,
    nth: Option<String>,
    limit: Option<String>,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn required(value: Option<String>, flag: &'static str) -> Result<String, ArgsError> {
    value.ok_or(ArgsError::MissingFlag { flag })
}

fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, ArgsError> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ArgsError::InvalidDate { raw })
    })
    .transpose()
}

impl Args {
    /// Parse command-line arguments (without the program name).
    ///
    /// `env_file` is the value of `WORKOUT_LOG_FILE`, if set; `--file` wins over it.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env_file: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let name = args.next().ok_or(ArgsError::MissingCommand)?;
        if matches!(name.as_str(), "--help" | "-h" | "help") {
            return Ok(Self {
                file: PathBuf::from(DEFAULT_FILE),
                command: Command::Help,
            });
        }

        let mut flags = Flags::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => flags.file = Some(require_value(&mut args, "--file")?),
                "--date" => flags.date = Some(require_value(&mut args, "--date")?),
                "--program" => flags.program = Some(require_value(&mut args, "--program")?),
                "--exercise" => flags.exercise = Some(require_value(&mut args, "--exercise")?),
                "--weight" => flags.weight = Some(require_value(&mut args, "--weight")?),
                "--reps" => flags.reps = Some(require_value(&mut args, "--reps")?),
                "--nth" => flags.nth = Some(require_value(&mut args, "--nth")?),
                "--limit" => flags.limit = Some(require_value(&mut args, "--limit")?),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let file = match flags.file.or(env_file) {
            Some(raw) if raw.trim().is_empty() => return Err(ArgsError::InvalidFile { raw }),
            Some(raw) => PathBuf::from(raw.trim()),
            None => PathBuf::from(DEFAULT_FILE),
        };

        let command = match name.as_str() {
            "show" => Command::Show {
                date: parse_date(flags.date)?,
            },
            "programs" => Command::Programs {
                date: parse_date(flags.date)?,
            },
            "create-program" => Command::CreateProgram {
                date: parse_date(flags.date)?,
                program: required(flags.program, "--program")?,
            },
            "add" => {
                let weight = required(flags.weight, "--weight")?;
                let reps = required(flags.reps, "--reps")?;
                Command::Add {
                    date: parse_date(flags.date)?,
                    program: required(flags.program, "--program")?,
                    exercise: required(flags.exercise, "--exercise")?,
                    weight: weight.trim().parse::<f64>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--weight",
                        raw: weight.clone(),
                    })?,
                    reps: reps.trim().parse::<i64>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--reps",
                        raw: reps.clone(),
                    })?,
                }
            }
            "delete" => {
                let occurrence = match flags.nth {
                    Some(raw) => match raw.trim().parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(ArgsError::InvalidNumber { flag: "--nth", raw }),
                    },
                    None => 1,
                };
                Command::Delete {
                    date: parse_date(flags.date)?,
                    program: required(flags.program, "--program")?,
                    exercise: flags.exercise,
                    occurrence,
                }
            }
            "volume" => Command::Volume,
            "history" => Command::History {
                exercise: required(flags.exercise, "--exercise")?,
            },
            "recent" => {
                let limit = match flags.limit {
                    Some(raw) => raw.trim().parse::<usize>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--limit",
                        raw,
                    })?,
                    None => DEFAULT_RECENT_LIMIT,
                };
                Command::Recent { limit }
            }
            "exercises" => Command::Exercises,
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        Ok(Self { file, command })
    }
}

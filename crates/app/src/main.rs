mod args;

use std::path::Path;

use services::{LogErrorKind, WorkoutLog};
use storage::Storage;
use tracing::{Level, debug, error};
use workout_core::Clock;
use workout_core::model::{Entry, EntryKey, ExerciseDraft, ExerciseName, LoggedEntry, ProgramName};

use crate::args::{Args, Command, print_usage};

fn init_tracing() {
    let level = std::env::var("WORKOUT_LOG_LEVEL")
        .ok()
        .and_then(|raw| raw.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Make sure the directory that will hold the record file exists.
fn prepare_record_dir(file: &Path) -> std::io::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// One line per entry. The `#k` counter is what `delete --nth` takes.
fn format_entry(log: &WorkoutLog, logged: &LoggedEntry) -> String {
    let nth = log.key_of(logged.id()).map_or(1, |key| key.occurrence());
    match logged.entry() {
        Entry::Placeholder { date, program } => {
            format!("{date}  {program}  (no exercises yet)")
        }
        Entry::Exercise {
            date,
            program,
            exercise,
            weight,
            reps,
        } => format!("{date}  {program}  {exercise} #{nth}  {weight} kg x {reps}"),
    }
}

fn print_entries(log: &WorkoutLog, entries: &[&LoggedEntry], empty: &str) {
    if entries.is_empty() {
        println!("{empty}");
    }
    for entry in entries {
        println!("{}", format_entry(log, entry));
    }
}

fn execute(command: Command, log: &mut WorkoutLog, clock: &Clock) -> Result<(), services::LogError> {
    let today = clock.today();
    match command {
        Command::Show { date } => {
            let date = date.unwrap_or(today);
            print_entries(log, &log.entries_for(date), &format!("no entries on {date}"));
        }
        Command::Programs { date } => {
            let date = date.unwrap_or(today);
            for program in log.programs_for(date) {
                let count = log.exercises_for(date, program.as_str()).len();
                println!("{program}  ({count} exercises)");
            }
        }
        Command::CreateProgram { date, program } => {
            let date = date.unwrap_or(today);
            log.create_program(date, program.as_str())?;
            println!("created {program} on {date}");
        }
        Command::Add {
            date,
            program,
            exercise,
            weight,
            reps,
        } => {
            let date = date.unwrap_or(today);
            let id = log.add_exercise(date, program, ExerciseDraft::new(exercise, weight, reps))?;
            if let Some(key) = log.key_of(id) {
                println!("saved {key}");
            }
        }
        Command::Delete {
            date,
            program,
            exercise,
            occurrence,
        } => {
            let key = EntryKey::new(
                date.unwrap_or(today),
                ProgramName::new(program)?,
                exercise.map(ExerciseName::new).transpose()?,
                occurrence,
            );
            log.delete_by_key(&key)?;
            println!("deleted {key}");
        }
        Command::Volume => {
            let rows = log.daily_volume();
            if rows.is_empty() {
                println!("no exercises logged yet");
            }
            for row in rows {
                println!("{}  {:.1}", row.date, row.volume);
            }
        }
        Command::History { exercise } => {
            print_entries(log, &log.history_for(&exercise), &format!("no sets of {exercise}"));
        }
        Command::Recent { limit } => {
            print_entries(log, &log.recent(limit), "no exercises logged yet");
        }
        Command::Exercises => {
            for name in log.exercise_names() {
                println!("{name}");
            }
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(
        std::env::args().skip(1),
        std::env::var("WORKOUT_LOG_FILE").ok(),
    )
    .inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;
    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    debug!(file = %parsed.file.display(), "using record file");
    prepare_record_dir(&parsed.file)?;
    let storage = Storage::csv(&parsed.file);
    let mut log = WorkoutLog::from_storage(&storage)?;

    execute(parsed.command, &mut log, &Clock::default_clock()).map_err(|e| {
        if e.kind() == LogErrorKind::Io {
            error!(file = %parsed.file.display(), "could not write the record file");
        }
        e.into()
    })
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

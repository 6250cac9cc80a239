/// Main entry point for the HabitFlow command-line tracker
///
/// This file sets up logging, parses command line arguments, opens the local
/// database and runs one command against it.

use std::path::PathBuf;

use chrono::Datelike;
use clap::{Parser, Subcommand};
use tracing::info;

use habitflow::{date, Clock, FixedClock, HabitId, HabitStore, HabitTracker, SqliteStore, SystemClock};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".habitflow");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("habitflow");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("habitflow");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habitflow");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Only accept a directory we can actually write to
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habitflow");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for HabitFlow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of reading the clock
    #[arg(long)]
    today: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every habit with its streaks (default)
    List,
    /// Create a new habit
    Add { name: String },
    /// Mark a habit done, or undo it, for today or a given date
    Toggle {
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Rename a habit
    Rename { id: String, name: String },
    /// Delete a habit and its history
    Delete { id: String },
    /// Show a month of completions for every habit
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Show how many habits are stored
    Stats,
    /// Remove all habits and completion history
    Reset,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habitflow={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let store = SqliteStore::new(db_path)?;
    let command = args.command.unwrap_or(Command::List);

    match args.today {
        Some(today) => run(HabitTracker::with_parts(store, FixedClock::new(&today)?), command),
        None => run(HabitTracker::with_parts(store, SystemClock), command),
    }
}

fn run<S: HabitStore, C: Clock>(
    tracker: HabitTracker<S, C>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List => {
            let today = tracker.today();
            println!("{}", date::format_friendly(&today)?);

            let overview = tracker.overview();
            if overview.is_empty() {
                println!("No habits yet. Add one with `habitflow add <NAME>`.");
            }
            for entry in overview {
                let item = match entry {
                    Ok(item) => item,
                    Err(e) => {
                        println!("[!] {}", e);
                        continue;
                    }
                };
                let check = if item.completed_today { "x" } else { " " };
                println!(
                    "[{}] {}  current: {}  longest: {}  ({})",
                    check,
                    item.habit.name,
                    item.streaks.current_streak,
                    item.streaks.longest_streak,
                    item.habit.id
                );
            }
        }
        Command::Add { name } => {
            let habit = tracker.add_habit(&name)?;
            println!("Added \"{}\" ({})", habit.name, habit.id);
        }
        Command::Toggle { id, date } => {
            let result = tracker.toggle(&HabitId::from(id.as_str()), date.as_deref())?;
            println!(
                "{}: current streak {}, longest {}. {}",
                result.habit.name,
                result.streaks.current_streak,
                result.streaks.longest_streak,
                result.streaks.motivational_message()
            );
        }
        Command::Rename { id, name } => {
            let habit = tracker.rename_habit(&HabitId::from(id.as_str()), &name)?;
            println!("Renamed to \"{}\"", habit.name);
        }
        Command::Delete { id } => {
            let habit = tracker.delete_habit(&HabitId::from(id.as_str()))?;
            println!("Deleted \"{}\"", habit.name);
        }
        Command::Calendar { year, month } => {
            let today = date::to_naive(&tracker.today())?;
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());

            let grids = tracker.month(year, month)?;
            if grids.is_empty() {
                println!("No habits to display yet.");
            }
            for (habit, grid) in grids {
                println!("{} - {}", habit.name, grid.label());
                println!("{}", grid);
            }
        }
        Command::Stats => {
            println!("Total habits: {}", tracker.habits().len());
            println!("Stored only on this device.");
        }
        Command::Reset => {
            tracker.reset()?;
            println!("All habits and completion history removed.");
        }
    }

    Ok(())
}

//! gymlog - Personal gym tracker

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use gymlog::calendar::{self, WEEKDAY_HEADERS};
use gymlog::dates;
use gymlog::db::Database;
use gymlog::editor::{self, RoutineEditor, WorkoutSession};
use gymlog::export;
use gymlog::model::{Routine, Saved, Workout};
use gymlog::stats::{self, Overview, overview};

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(author, version, about = "Personal gym tracker: routines, workouts, progress")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "GYMLOG_DB", default_value = "gymlog.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage routines
    Routine {
        #[command(subcommand)]
        action: RoutineCommand,
    },

    /// Log a workout from a routine
    Log {
        /// Routine id
        routine: i64,

        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Set as E.S=WxR, e.g. 1.2=80x10 (exercise 1, set 2)
        #[arg(short, long = "set")]
        sets: Vec<String>,
    },

    /// Change a logged workout
    Edit {
        /// Workout id
        workout: i64,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long = "set")]
        sets: Vec<String>,
    },

    /// Delete a logged workout
    Delete {
        workout: i64,
    },

    /// Show recent workouts
    History {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Progress of one exercise over time
    Progress {
        /// Exercise name (exact); lists known exercises when omitted
        exercise: Option<String>,
    },

    /// Month calendar with workout days
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current one
        #[arg(short, long)]
        month: Option<String>,

        /// List the workouts of one day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
    },

    /// Show training statistics
    Stats,

    /// Export data
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file, defaults to gym-backup-DATE.json / gym-workouts-DATE.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import routines and workouts from a JSON backup
    Import {
        file: PathBuf,
    },

    /// Delete ALL routines and workouts
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RoutineCommand {
    /// Create a routine
    New {
        name: String,

        /// Exercise as "Name:SETSxREPS" (repeatable)
        #[arg(short, long = "exercise", required = true)]
        exercises: Vec<String>,
    },

    /// List routines
    List,

    /// Show one routine
    Show {
        id: i64,
    },

    Rename {
        id: i64,
        name: String,
    },

    /// Append an exercise ("Name:SETSxREPS")
    AddExercise {
        id: i64,
        exercise: String,
    },

    /// Remove exercise by number (1-based)
    RemoveExercise {
        id: i64,
        number: usize,
    },

    Delete {
        id: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut db = Database::open(&cli.db)?;

    match cli.command {
        Some(Commands::Routine { action }) => run_routine(&db, action)?,

        Some(Commands::Log { routine, date, sets }) => {
            let routine = load_routine(&db, routine)?;
            let mut session = WorkoutSession::start(&routine, None);
            if let Some(date) = date {
                session.set_date(&date)?;
            }
            apply_sets(&mut session, &sets)?;

            let (id, workout) = session.finish();
            let id = db.save_workout(id, &workout)?;
            println!("Logged: {} on {} (id: {})", workout.routine_name, workout.date, id);
            print_workout(&Saved::new(id, workout));
        }

        Some(Commands::Edit { workout, date, sets }) => {
            let Some(saved) = db.get_workout(workout)? else {
                bail!("Workout {} not found", workout);
            };
            let mut session = WorkoutSession::edit(&saved);
            if let Some(date) = date {
                session.set_date(&date)?;
            }
            apply_sets(&mut session, &sets)?;

            let (id, workout) = session.finish();
            let id = db.save_workout(id, &workout)?;
            println!("Updated workout {}", id);
            print_workout(&Saved::new(id, workout));
        }

        Some(Commands::Delete { workout }) => {
            db.delete_workout(workout)?;
            println!("Deleted workout {}", workout);
        }

        Some(Commands::History { limit }) => show_history(&db, limit)?,

        Some(Commands::Progress { exercise }) => {
            let workouts = db.get_workouts()?;
            match exercise {
                Some(name) => {
                    let series = stats::exercise_series(&name, &workouts);
                    println!("Progress: {}", name);
                    println!("{:-<40}", "");
                    if series.is_empty() {
                        println!("No data for this exercise yet");
                    }
                    for point in series {
                        println!(
                            "{:>8} | max {:>7} kg | volume {:>8}",
                            point.label, point.max_weight, point.total_volume
                        );
                    }
                }
                None => {
                    println!("Exercises:");
                    for name in Overview::from_workouts(&workouts).exercise_names {
                        println!("  {}", name);
                    }
                }
            }
        }

        Some(Commands::Calendar { month, day }) => {
            let workouts = db.get_workouts()?;
            match day {
                Some(day) => {
                    let Some(date) = dates::parse_date_key(&day) else {
                        bail!("Invalid date \"{}\", expected YYYY-MM-DD", day);
                    };
                    let found = calendar::workouts_on_date(date, &workouts);
                    if found.is_empty() {
                        println!("No workouts on {}", day);
                    }
                    for workout in found {
                        print_workout(workout);
                    }
                }
                None => {
                    let reference = match month {
                        Some(month) => dates::parse_month(&month)
                            .with_context(|| format!("Invalid month \"{}\", expected YYYY-MM", month))?,
                        None => dates::today(),
                    };
                    print_calendar(reference, &workouts);
                }
            }
        }

        Some(Commands::Stats) => {
            let workouts = db.get_workouts()?;
            let overview = Overview::from_workouts(&workouts);
            let total: f64 = workouts.iter().map(|w| stats::total_volume(w)).sum();

            println!("Training Statistics");
            println!("{:-<40}", "");
            println!("Workouts:    {}", overview.total_workouts);
            println!("Exercises:   {}", overview.exercise_names.len());
            println!("Active days: {}", overview.active_days);
            println!("Volume:      {} kg", total);
        }

        Some(Commands::Export { format, output }) => {
            let workouts = db.get_workouts()?;
            let (content, default_name) = match format {
                ExportFormat::Json => (
                    export::to_json(&db.get_routines()?, &workouts)?,
                    format!("gym-backup-{}.json", dates::today_key()),
                ),
                ExportFormat::Csv => (
                    export::to_csv(&workouts),
                    format!("gym-workouts-{}.csv", dates::today_key()),
                ),
            };
            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported to {}", path.display());
            println!("Exported to {}", path.display());
        }

        Some(Commands::Import { file }) => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let data = export::parse_import(&json)?;
            let report = export::import_into(&mut db, &data)?;
            println!(
                "Imported {} routines and {} workouts",
                report.routines, report.workouts
            );
        }

        Some(Commands::Clear { yes }) => {
            if !yes {
                bail!("This deletes ALL routines and workouts; pass --yes to confirm");
            }
            db.clear_all()?;
            println!("All data deleted");
        }

        None => show_history(&db, 10)?,
    }

    Ok(())
}

fn run_routine(db: &Database, action: RoutineCommand) -> Result<()> {
    match action {
        RoutineCommand::New { name, exercises } => {
            let mut editor = RoutineEditor::new();
            editor.set_name(name);
            for entry in &exercises {
                let template = editor::parse_template_entry(entry)?;
                editor.routine.exercises.push(template);
            }
            save_routine(db, editor)?;
        }

        RoutineCommand::List => {
            println!("Routines:");
            println!("{:-<60}", "");
            for routine in db.get_routines()? {
                println!(
                    "{:>4} | {:20} | {} exercises",
                    routine.id,
                    routine.name,
                    routine.exercises.len()
                );
            }
        }

        RoutineCommand::Show { id } => {
            let routine = load_routine(db, id)?;
            println!("{} (id: {})", routine.name, id);
            for (i, exercise) in routine.exercises.iter().enumerate() {
                println!(
                    "  {}. {} - {}x{}",
                    i + 1,
                    exercise.name,
                    exercise.target_sets,
                    exercise.target_reps
                );
            }
        }

        RoutineCommand::Rename { id, name } => {
            let mut editor = RoutineEditor::from_saved(&load_saved_routine(db, id)?);
            editor.set_name(name);
            save_routine(db, editor)?;
        }

        RoutineCommand::AddExercise { id, exercise } => {
            let mut editor = RoutineEditor::from_saved(&load_saved_routine(db, id)?);
            let template = editor::parse_template_entry(&exercise)?;
            let index = editor.add_exercise();
            editor.update_exercise(index, editor::ExerciseField::Name(template.name))?;
            editor.update_exercise(index, editor::ExerciseField::Sets(template.target_sets))?;
            editor.update_exercise(index, editor::ExerciseField::Reps(template.target_reps))?;
            save_routine(db, editor)?;
        }

        RoutineCommand::RemoveExercise { id, number } => {
            let mut editor = RoutineEditor::from_saved(&load_saved_routine(db, id)?);
            let removed = editor.remove_exercise(editor::number_to_index(number, "Exercise")?)?;
            save_routine(db, editor)?;
            println!("Removed {}", removed.name);
        }

        RoutineCommand::Delete { id } => {
            let routine = load_routine(db, id)?;
            db.delete_routine(id)?;
            println!("Deleted routine \"{}\"", routine.name);
        }
    }
    Ok(())
}

fn load_saved_routine(db: &Database, id: i64) -> Result<Saved<Routine>> {
    db.get_routine(id)?
        .with_context(|| format!("Routine {} not found", id))
}

fn load_routine(db: &Database, id: i64) -> Result<Routine> {
    load_saved_routine(db, id).map(Saved::into_record)
}

fn save_routine(db: &Database, editor: RoutineEditor) -> Result<()> {
    let (id, routine) = editor.finish()?;
    let id = db.save_routine(id, &routine)?;
    println!("Saved routine \"{}\" (id: {})", routine.name, id);
    Ok(())
}

fn apply_sets(session: &mut WorkoutSession, entries: &[String]) -> Result<()> {
    for entry in entries {
        let (exercise, set, values) = editor::parse_set_entry(entry)?;
        session.log_set(exercise, set, values)?;
    }
    Ok(())
}

fn show_history(db: &Database, limit: usize) -> Result<()> {
    let workouts = db.get_workouts()?;
    println!("Recent workouts:");
    println!("{:-<60}", "");
    if workouts.is_empty() {
        println!("Nothing logged yet. Create a routine and run `gymlog log <id>`.");
    }
    for workout in overview::recent(&workouts, limit) {
        print_workout(workout);
    }
    Ok(())
}

fn print_workout(workout: &Saved<Workout>) {
    println!(
        "#{} {} | {} | volume {} kg",
        workout.id,
        workout.date,
        workout.routine_name,
        stats::total_volume(workout)
    );
    for summary in stats::exercise_summaries(workout) {
        if summary.performed {
            println!(
                "    {:24} {} sets, {} reps, max {} kg, volume {}",
                summary.name, summary.total_sets, summary.total_reps, summary.max_weight, summary.total_volume
            );
        } else {
            println!("    {:24} (not performed)", summary.name);
        }
    }
}

fn print_calendar(reference: chrono::NaiveDate, workouts: &[Saved<Workout>]) {
    println!("{:^35}", format!("{}-{:02}", reference.year(), reference.month()));
    for header in WEEKDAY_HEADERS {
        print!("{:^5}", header);
    }
    println!();

    for week in calendar::calendar_days(reference).chunks(7) {
        for day in week {
            let mark = if calendar::has_workout(day.date, workouts) { "*" } else { " " };
            let cell = if !day.is_current_month {
                format!("({})", day.date.day())
            } else if calendar::is_today(day.date) {
                format!("[{}]", day.date.day())
            } else {
                day.date.day().to_string()
            };
            print!("{:>4}{}", cell, mark);
        }
        println!();
    }
    println!("* workout   [ ] today   ( ) other month");
}

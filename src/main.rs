//! Command-line front end for the Synergy tracker.

use clap::{Parser, Subcommand};
use log::error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use synergy_lib::config::Config;
use synergy_lib::error::AppError;
use synergy_lib::models::{GaugeReading, Goal, Level, Location};
use synergy_lib::platform::{Host, Notifier, Permission};
use synergy_lib::validation::{validate_plan_days, validate_session_minutes};
use synergy_lib::{planner, InitError, Synergy};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "synergy", version, about = "Workout streaks, progress and reminders")]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "SYNERGY_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SYNERGY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Stay logged in across runs
        #[arg(long)]
        remember: bool,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SYNERGY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        remember: bool,
    },
    Logout,
    /// Show the remembered session, if any
    Whoami,
    /// Show the streak, or record today's workout
    Streak {
        #[command(subcommand)]
        action: Option<StreakAction>,
    },
    /// Show or set today's completion percentage
    Daily { value: Option<String> },
    /// Show the weekly insights
    Weekly {
        /// Draw new values for every day
        #[arg(long)]
        randomize: bool,
    },
    /// Gauge angle for a percentage
    Gauge {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Save a daily reminder (HH:MM) and wait for it; without a time, wait for the saved one
    Remind {
        time: Option<String>,
        /// Save and exit without waiting
        #[arg(long)]
        detach: bool,
    },
    /// Generate a push/pull/legs plan
    Plan {
        #[arg(long, default_value = "gym")]
        location: String,
        #[arg(long, default_value = "hypertrophy")]
        goal: String,
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(long, default_value_t = 45)]
        minutes: u32,
        #[arg(long)]
        json: bool,
    },
    /// Suggest routines
    Routines,
}

#[derive(Debug, Subcommand)]
enum StreakAction {
    /// Mark today complete
    Complete,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Could not write output: {0}")]
    Io(#[from] io::Error),
}

/// Shows notifications on the terminal. A terminal can always display them.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn notify(&self, title: &str, body: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "\x07{title}\n  {body}") {
            error!("Failed to show notification: {e}");
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so command output stays clean
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        error!("Logging already initialized: {e}");
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli, &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::App(e)) if e.is_user_facing() => {
            error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = Config { db_path: cli.db };
    let host = Host::system().with_notifier(Arc::new(TerminalNotifier));

    // Commands that never touch storage
    let command = match cli.command {
        Command::Gauge { value } => {
            let reading = GaugeReading::for_percent(value);
            writeln!(out, "{} ({:.1} deg)", reading.label, reading.degrees)?;
            return Ok(());
        }
        Command::Plan {
            location,
            goal,
            level,
            days,
            minutes,
            json,
        } => {
            let location: Location = location.parse()?;
            let goal: Goal = goal.parse()?;
            let level: Level = level.parse()?;
            let days = validate_plan_days(days)?;
            let minutes = validate_session_minutes(minutes)?;
            let plan = planner::generate_plan(location, goal, level, days, minutes);

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&plan).map_err(AppError::from)?)?;
                return Ok(());
            }
            for day in &plan {
                writeln!(out, "Day {} - {}", day.day, day.day_type)?;
                for exercise in &day.exercises {
                    writeln!(out, "  {}: {} sets x {}", exercise.name, exercise.sets, exercise.reps)?;
                }
            }
            return Ok(());
        }
        Command::Routines => {
            for card in planner::recommend_routines(&mut rand::thread_rng()) {
                writeln!(out, "{}: {}", card.goal.title(), card.exercises.join(", "))?;
            }
            return Ok(());
        }
        command @ (Command::Signup { .. }
        | Command::Login { .. }
        | Command::Logout
        | Command::Whoami
        | Command::Streak { .. }
        | Command::Daily { .. }
        | Command::Weekly { .. }
        | Command::Remind { .. }) => command,
    };

    let app = Synergy::open(&config, host)?;
    run_stateful(&app, command, out)
}

fn run_stateful(app: &Synergy, command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Signup {
            name,
            email,
            password,
            phone,
            remember,
        } => {
            let session = app.accounts.register(&name, &email, &password, &phone)?;
            app.accounts.set_remember_me(remember)?;
            writeln!(out, "Welcome, {}!", session.first_name())?;
        }
        Command::Login {
            email,
            password,
            remember,
        } => {
            let session = app.accounts.login(&email, &password)?;
            app.accounts.set_remember_me(remember)?;
            writeln!(out, "Welcome back, {}!", session.first_name())?;
        }
        Command::Logout => {
            app.accounts.logout()?;
            writeln!(out, "Logged out")?;
        }
        Command::Whoami => match app.accounts.restore_session()? {
            Some(session) => writeln!(out, "{} <{}>", session.name, session.email)?,
            None => writeln!(out, "Not logged in")?,
        },
        Command::Streak { action } => {
            let streak = match action {
                Some(StreakAction::Complete) => {
                    let (streak, outcome) = app.progress.mark_day_complete()?;
                    if !outcome.changed() {
                        writeln!(out, "Today is already complete")?;
                    }
                    streak
                }
                None => app.progress.streak()?,
            };
            writeln!(out, "{}", streak.label())?;
        }
        Command::Daily { value } => {
            let daily = match value {
                Some(value) => Some(app.progress.set_daily(&value)?),
                None => app.progress.daily()?,
            };
            match daily {
                Some(percent) => writeln!(out, "Today: {percent}")?,
                None => writeln!(out, "Today: not set")?,
            }
        }
        Command::Weekly { randomize } => {
            let summary = if randomize {
                Some(app.progress.randomize_weekly(&mut rand::thread_rng())?)
            } else {
                app.progress.load_weekly()?
            };
            let Some(summary) = summary else {
                writeln!(out, "No weekly insights yet")?;
                return Ok(());
            };
            if let Some(insights) = &summary.insights {
                for (day, percent) in insights.iter() {
                    writeln!(out, "{:<4}{percent}", day.as_str())?;
                }
            }
            writeln!(out, "Average: {}", summary.average)?;
        }
        Command::Remind { time, detach } => remind(app, time.as_deref(), detach, out)?,
        Command::Gauge { .. } | Command::Plan { .. } | Command::Routines => {}
    }
    Ok(())
}

fn remind(
    app: &Synergy,
    time: Option<&str>,
    detach: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let next = match time {
        Some(time) => {
            let outcome = app.reminders.set_reminder(time)?;
            if !outcome.permission.is_granted() {
                writeln!(out, "Saved {time}; notifications are {}", outcome.permission.as_str())?;
                return Ok(());
            }
            outcome.next_fire
        }
        None => app.reminders.restore()?,
    };
    let Some(next) = next else {
        writeln!(out, "No reminder saved")?;
        return Ok(());
    };
    writeln!(out, "Next reminder at {}", next.format("%Y-%m-%d %H:%M"))?;
    out.flush()?;
    if !detach {
        // The timer thread owns delivery; stay alive until interrupted
        loop {
            thread::park();
        }
    }
    Ok(())
}

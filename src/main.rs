mod render;

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::RwLock;
use scheduler_app::{spawn_clock, IoMessage, Notice, Outcome, Scheduler};
use scheduler_calendar::{parse_date, EventDraft, Intent, NavigationController, ViewMode};
use scheduler_core::{AppError, Config};
use scheduler_storage::JsonFileStore;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use render::Render;

#[derive(Parser)]
#[command(name = "scheduler")]
#[command(about = "Navigate a local calendar and manage dated events")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a calendar period
    Show {
        /// annual, monthly, weekly or daily (defaults to the configured view)
        #[arg(short, long)]
        view: Option<ViewMode>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Periods to move from the reference date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i32,
    },
    /// Create an event, or update one with --id
    Add {
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Free-form time, e.g. "09:30"
        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace the event with this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete an event by id
    Delete { id: String },
    /// Write all events to an export file
    Export {
        /// Target directory, defaults to the current directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace all events with the contents of an export file
    Import { file: PathBuf },
    /// Print the clock a few times
    Clock {
        #[arg(long, default_value_t = 3)]
        ticks: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, validation) = Config::load_validated()?;
    scheduler_core::init_with_filter(&config.logging.filter)?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let today = NavigationController::now();
    let storage = JsonFileStore::new(config.storage_path());
    let mut scheduler = Scheduler::from_config(&config, Box::new(storage), today)?;

    let command = cli.command.unwrap_or(Commands::Show {
        view: None,
        date: None,
        step: 0,
    });

    match command {
        Commands::Show { view, date, step } => {
            if let Some(date) = date {
                let date = parse_date(&date)?;
                let mode = scheduler.navigation().view_mode();
                scheduler.handle(Intent::JumpToDate(date))?;
                scheduler.handle(Intent::SwitchView(mode))?;
            }
            if let Some(view) = view {
                scheduler.handle(Intent::SwitchView(view))?;
            }
            for _ in 0..step.unsigned_abs() {
                let intent = if step > 0 {
                    Intent::StepForward
                } else {
                    Intent::StepBackward
                };
                scheduler.handle(intent)?;
            }
            println!("{}", scheduler.view().render());
        }
        Commands::Add {
            title,
            date,
            time,
            description,
            id,
        } => {
            let draft = EventDraft {
                id,
                title,
                date,
                time,
                description,
            };
            let outcome = report(scheduler.handle(Intent::SubmitEvent(draft)))?;
            if let Outcome::Saved { event, .. } = outcome {
                println!("Saved {}", event.render());
            }
        }
        Commands::Delete { id } => match report(scheduler.handle(Intent::DeleteEvent(id.clone())))? {
            Outcome::Deleted { .. } => println!("Deleted {}", id),
            _ => println!("No event with id {}", id),
        },
        Commands::Export { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to get current directory")?,
            };
            let (tx, rx) = mpsc::channel();
            scheduler.begin_export(&Handle::current(), &tx, dir)?;
            let outcome = report(scheduler.apply_io(wait_for_io(rx).await?))?;
            if let Outcome::Exported { path } = outcome {
                println!("Exported {} events to {}", scheduler.events().len(), path.display());
            }
        }
        Commands::Import { file } => {
            let (tx, rx) = mpsc::channel();
            scheduler.begin_import(&Handle::current(), &tx, file)?;
            let outcome = report(scheduler.apply_io(wait_for_io(rx).await?))?;
            if let Outcome::Imported { count, .. } = outcome {
                println!("Imported {} events", count);
            }
        }
        Commands::Clock { ticks } => run_clock(&config, ticks).await?,
    }

    Ok(())
}

/// Block on the next background result without stalling the runtime.
async fn wait_for_io(rx: mpsc::Receiver<IoMessage>) -> Result<IoMessage> {
    tokio::task::spawn_blocking(move || rx.recv())
        .await
        .context("I/O wait task failed")?
        .context("I/O task ended without a result")
}

/// Print any notice attached to the outcome, or the user message of the error.
fn report(result: Result<Outcome, AppError>) -> Result<Outcome> {
    match result {
        Ok(outcome) => {
            if let Some(notice) = outcome.notice() {
                eprintln!("{}", notice.render());
            }
            Ok(outcome)
        }
        Err(e) => {
            eprintln!("{}", Notice::from_error(&e).render());
            Err(e.into())
        }
    }
}

async fn run_clock(config: &Config, ticks: u32) -> Result<()> {
    let interval = Duration::from_secs(config.clock.refresh_seconds);
    let sink = Arc::new(RwLock::new(String::new()));
    let cancel = CancellationToken::new();
    let handle = spawn_clock(&Handle::current(), interval, sink.clone(), cancel.clone());

    for _ in 0..ticks {
        tokio::time::sleep(interval).await;
        println!("{}", sink.read());
    }

    cancel.cancel();
    handle.await.context("Clock task failed")?;
    Ok(())
}

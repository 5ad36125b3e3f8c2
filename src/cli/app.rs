use super::ui;
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use ephi::calendar::{MonthCursor, MonthView};
use ephi::config::AppConfig;
use ephi::plan::new_testament;
use ephi::reminder::{REMINDER_BODY, REMINDER_TITLE, next_reminder, until_next_reminder};
use ephi::storage::{FileLocalStore, FsBlobStore, HttpRemoteStore, MemoryRemoteStore, RemoteStore};
use ephi::web::{AppState, build_router};
use ephi::{Clock, ProgressSync, ReadingPlan, ReadingTracker, SystemClock};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ephi")]
#[command(about = "55-day New Testament reading plan tracker with cloud sync")]
pub struct Cli {
    /// Skip the sync API and work from local progress only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the progress sync API
    Serve,
    /// Show every day of the plan
    Plan {
        #[arg(long)]
        json: bool,
    },
    /// Show today's reading
    Today,
    /// Mark a day read, or unread if it already is
    Toggle { day: u32 },
    /// Push local progress to the cloud now
    Sync,
    /// Delete the cloud progress record
    ResetRemote,
    /// Show a month of the plan
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Show when the next daily reminder is due
    Reminder,
}

pub struct App {
    config: AppConfig,
    clock: SystemClock,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        let offline = cli.offline;
        match cli.command {
            Command::Serve => self.serve().await,
            Command::Plan { json } => {
                let tracker = self.open_session(offline).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(tracker.plan())?);
                } else {
                    println!("{}", ui::reading_list(tracker.plan()));
                }
                Ok(())
            }
            Command::Today => {
                let tracker = self.open_session(offline).await?;
                let today = self.clock.today();
                println!("{}", ui::today_highlight(today, tracker.today_reading(&self.clock)));
                println!("{}", ui::progress_bar(&tracker.progress()));
                Ok(())
            }
            Command::Toggle { day } => {
                let mut tracker = self.open_session(offline).await?;
                self.toggle(&mut tracker, day).await
            }
            Command::Sync => {
                let tracker = self.open_session(offline).await?;
                if !tracker.sync_now().await {
                    bail!("cloud sync failed");
                }
                println!("Synced!");
                Ok(())
            }
            Command::ResetRemote => {
                let sync = self.progress_sync(offline)?;
                sync.clear_remote()
                    .await
                    .context("failed to clear cloud progress")?;
                println!("Cloud progress cleared");
                Ok(())
            }
            Command::Calendar { year, month } => {
                let tracker = self.open_session(offline).await?;
                let today = self.clock.today();
                let containing = MonthCursor::containing(today);
                let year = year.unwrap_or(containing.year());
                let month = month.unwrap_or(containing.month());
                let cursor = MonthCursor::new(year, month)
                    .ok_or_else(|| anyhow!("invalid month {year}-{month}"))?;

                let view = MonthView::build(cursor, tracker.plan(), today);
                print!("{}", ui::calendar(&view));
                Ok(())
            }
            Command::Reminder => {
                let now = self.clock.now();
                let at = next_reminder(now, self.config.reminder_hour);
                let wait = until_next_reminder(now, self.config.reminder_hour).as_secs() / 60;
                println!("{REMINDER_TITLE}\n{REMINDER_BODY}");
                println!(
                    "Next reminder: {} (in {}h {:02}m)",
                    at.format("%A, %B %-d at %H:%M"),
                    wait / 60,
                    wait % 60
                );
                Ok(())
            }
        }
    }

    async fn toggle(&self, tracker: &mut ReadingTracker, day: u32) -> Result<()> {
        let outcome = tracker.toggle(day)?;
        let state = if outcome.completed { "read" } else { "unread" };
        println!("Day {} marked {}", outcome.day, state);

        // The process exits right after, so a debounced write must go out now.
        if tracker.settle(outcome.remote_save).await {
            println!("Synced to cloud");
        } else {
            println!("Saved locally; cloud sync failed");
        }
        println!("{}", ui::progress_bar(&tracker.progress()));
        Ok(())
    }

    async fn serve(&self) -> Result<()> {
        let blobs = Arc::new(FsBlobStore::new(&self.config.blob_dir));
        let app = build_router(AppState::new(blobs));

        let addr = self.config.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind to {addr}"))?;

        info!(address = %addr, blob_dir = %self.config.blob_dir.display(), "sync API started");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        Ok(())
    }

    fn progress_sync(&self, offline: bool) -> Result<ProgressSync> {
        let remote: Arc<dyn RemoteStore> = if offline {
            let remote = MemoryRemoteStore::new();
            remote.set_available(false);
            Arc::new(remote)
        } else {
            Arc::new(
                HttpRemoteStore::new(&self.config.api_url)
                    .context("failed to build sync API client")?,
            )
        };
        Ok(ProgressSync::new(remote, self.config.sync_debounce))
    }

    /// Builds the plan and loads reconciled progress into it.
    async fn open_session(&self, offline: bool) -> Result<ReadingTracker> {
        let plan = ReadingPlan::new(&new_testament(), self.config.total_days, self.config.start_date)
            .context("failed to build the reading plan")?;
        let local = Arc::new(FileLocalStore::new(&self.config.data_dir));
        let mut tracker = ReadingTracker::new(plan, local, self.progress_sync(offline)?);

        let outcome = tracker.load().await;
        if !outcome.remote_available && !offline {
            warn!("cloud unavailable; using local progress");
        }
        Ok(tracker)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

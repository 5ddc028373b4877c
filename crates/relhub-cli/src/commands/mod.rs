//! CLI command definitions and dispatch.

pub mod config;
pub mod history;
pub mod migrate;
pub mod tag;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::output::OutputFormat;
use relhub_core::config::AppConfig;
use relhub_core::error::AppError;
use relhub_database::{DatabasePool, PgRevisionStore, RevisionStore};
use relhub_service::{DiffEngine, HistoryService, TagService, TimelineService};
use relhub_storage::LocalSnapshotStore;

/// RelHub: revision history and tagging for release candidates
#[derive(Debug, Parser)]
#[command(name = "relhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file; overrides `--env` layering
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay merged over config/default.toml
    #[arg(short, long, env = "RELHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the revision history of a release
    History(history::HistoryArgs),
    /// Set or clear a revision tag
    Tag(tag::TagArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration as selected by `--config` / `--env`.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::History(args) => history::execute(args, &config, self.format).await,
            Commands::Tag(args) => tag::execute(args, &config, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Services wired over the configured database and snapshot root.
pub struct Services {
    pool: DatabasePool,
    pub history: HistoryService,
    pub tags: TagService,
}

impl Services {
    /// Connect to the database and build the revision services.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = DatabasePool::connect(&config.database).await?;
        let store: Arc<dyn RevisionStore> = Arc::new(PgRevisionStore::new(pool.pool().clone()));
        let snapshots = Arc::new(LocalSnapshotStore::from_config(&config.storage));

        let engine = DiffEngine::new(snapshots, &config.diff);
        let timeline = TimelineService::new(store.clone());

        Ok(Self {
            pool,
            history: HistoryService::new(timeline, engine),
            tags: TagService::new(store),
        })
    }

    /// Close the underlying pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Helper: a token cancelled when the user presses Ctrl-C
pub fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            guard.cancel();
        }
    });
    cancel
}

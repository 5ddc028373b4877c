//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use relhub_core::config::AppConfig;
use relhub_core::error::AppError;
use relhub_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check that the configuration loads and passes validation
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            match format {
                OutputFormat::Json => output::print_json(&shown)?,
                OutputFormat::Table => {
                    output::print_kv("database.url", &shown.database.url);
                    output::print_kv(
                        "database.max_connections",
                        &shown.database.max_connections.to_string(),
                    );
                    output::print_kv("storage.state_dir", &shown.storage.state_dir);
                    output::print_kv(
                        "diff.max_concurrent_checks",
                        &shown.diff.max_concurrent_checks.to_string(),
                    );
                    output::print_kv("logging.level", &shown.logging.level);
                    output::print_kv("logging.format", &shown.logging.format);
                }
            }
        }
        ConfigCommand::Validate => {
            output::print_success("Configuration is valid");
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv(
                "Snapshots",
                &config.storage.unfinished_dir().display().to_string(),
            );
        }
    }

    Ok(())
}

//! digest-client: command-line front end for the document viewer core.
//!
//! Wires the re-analysis trigger and the settings store to the configured
//! key-value store and the HTTP analysis service.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use digest_client::adapters::{
    FileKeyValueStore, HttpReanalysisClient, HttpReanalysisConfig, InMemoryKeyValueStore,
    LoggingViewRefresher,
};
use digest_client::application::{
    CompletionCallback, DocumentSettingsStore, ReanalysisTrigger, ReanalysisTriggerConfig,
    SettingsStoreError, TriggerOutcome, TriggerReanalysisCommand,
};
use digest_client::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use digest_client::domain::reanalysis::{ReanalysisError, ReanalysisStatus};
use digest_client::domain::settings::{DocumentKey, DocumentSettings, ResultPayload};
use digest_client::ports::{KeyValueStore, ReanalysisApiError, StoreError};
use digest_client::telemetry;

#[derive(Parser)]
#[command(name = "digest-client")]
#[command(author, version, about = "Re-run document analysis and manage viewer settings")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the bearer token used for re-analysis requests
    Login {
        /// Bearer token issued by the analysis service
        #[arg(short, long)]
        token: String,
    },

    /// Remove the stored bearer token
    Logout,

    /// Re-run analysis for a document
    Reanalyze {
        /// Document to re-analyze
        document_id: String,

        /// Exit as soon as the request finishes instead of waiting for the refresh
        #[arg(long)]
        no_wait: bool,
    },

    /// Manage per-document viewer settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the stored settings for a document
    Show {
        /// Document identifier
        identifier: String,

        /// Result field the identifier came from
        #[arg(long, value_enum, default_value_t = IdentifierField::DocumentId)]
        field: IdentifierField,
    },

    /// Replace the stored settings for a document
    Save {
        /// Document identifier
        identifier: String,

        /// Settings as a JSON object, e.g. '{"cardMode":"risk"}'
        #[arg(long)]
        json: String,
    },

    /// Delete the stored settings for a document
    Clear {
        /// Document identifier
        identifier: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum IdentifierField {
    DocumentId,
    Id,
    Filename,
}

impl IdentifierField {
    fn payload(self, identifier: &str) -> ResultPayload {
        let payload = ResultPayload::default();
        match self {
            IdentifierField::DocumentId => payload.with_document_id(identifier),
            IdentifierField::Id => payload.with_id(identifier),
            IdentifierField::Filename => payload.with_filename(identifier),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),

    #[error("Analysis client error: {0}")]
    Client(#[from] ReanalysisApiError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Settings(#[from] SettingsStoreError),

    #[error("Invalid settings JSON: {0}")]
    InvalidSettings(String),

    #[error("A non-empty {0} is required")]
    MissingArgument(&'static str),

    #[error("{}", .0.user_message())]
    Reanalysis(ReanalysisError),

    #[error("Re-analysis control is busy")]
    Busy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.logging).map_err(|e| CliError::Telemetry(e.to_string()))?;

    let store = build_store(&config);

    match cli.command {
        Commands::Login { token } => cmd_login(&config, store.as_ref(), &token).await,
        Commands::Logout => cmd_logout(&config, store.as_ref()).await,
        Commands::Reanalyze {
            document_id,
            no_wait,
        } => cmd_reanalyze(&config, store, document_id, no_wait).await,
        Commands::Settings { command } => {
            let settings = DocumentSettingsStore::with_prefix(
                store,
                config.storage.settings_prefix.clone(),
            );
            match command {
                SettingsCommands::Show { identifier, field } => {
                    cmd_settings_show(&settings, &identifier, field).await
                }
                SettingsCommands::Save { identifier, json } => {
                    cmd_settings_save(&settings, &identifier, &json).await
                }
                SettingsCommands::Clear { identifier } => {
                    cmd_settings_clear(&settings, &identifier).await
                }
            }
        }
    }
}

fn build_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match config.storage.backend {
        StorageBackend::File => {
            debug!(path = %config.storage.path.display(), "Using file key-value store");
            Arc::new(FileKeyValueStore::new(&config.storage.path))
        }
        StorageBackend::Memory => {
            debug!("Using in-memory key-value store");
            Arc::new(InMemoryKeyValueStore::new())
        }
    }
}

async fn cmd_login(
    config: &AppConfig,
    store: &dyn KeyValueStore,
    token: &str,
) -> Result<(), CliError> {
    if token.trim().is_empty() {
        return Err(CliError::MissingArgument("token"));
    }
    store.set(&config.reanalysis.auth_token_key, token).await?;
    info!(key = %config.reanalysis.auth_token_key, "Stored bearer token");
    println!("Logged in.");
    Ok(())
}

async fn cmd_logout(config: &AppConfig, store: &dyn KeyValueStore) -> Result<(), CliError> {
    store.delete(&config.reanalysis.auth_token_key).await?;
    println!("Logged out.");
    Ok(())
}

async fn cmd_reanalyze(
    config: &AppConfig,
    store: Arc<dyn KeyValueStore>,
    document_id: String,
    no_wait: bool,
) -> Result<(), CliError> {
    let api = HttpReanalysisClient::new(
        HttpReanalysisConfig::new(config.api.base_url.clone()).with_timeout(config.api.timeout()),
    )?;
    let trigger_config = ReanalysisTriggerConfig::default()
        .with_auth_token_key(config.reanalysis.auth_token_key.clone())
        .with_success_refresh_delay(config.reanalysis.success_refresh_delay())
        .with_error_reset_delay(config.reanalysis.error_reset_delay());
    let trigger = ReanalysisTrigger::with_config(
        Arc::new(api),
        store,
        Arc::new(LoggingViewRefresher),
        trigger_config,
    );

    let on_complete: CompletionCallback =
        Box::new(|payload: &Value| match serde_json::to_string_pretty(payload) {
            Ok(text) => println!("{}", text),
            Err(e) => debug!(error = %e, "Could not render result payload"),
        });

    eprintln!("{}", ReanalysisStatus::InProgress.label());

    match trigger
        .trigger(TriggerReanalysisCommand::new(document_id), Some(on_complete))
        .await
    {
        TriggerOutcome::Skipped => Err(CliError::MissingArgument("document id")),
        TriggerOutcome::Busy => Err(CliError::Busy),
        TriggerOutcome::Failed(error) => Err(CliError::Reanalysis(error)),
        TriggerOutcome::Completed(_) => {
            eprintln!("{}", trigger.status().label());
            if !no_wait {
                let mut status = trigger.subscribe();
                // The sender lives in `trigger`, so this only ends once the refresh ran.
                let _ = status.wait_for(|s| *s == ReanalysisStatus::Idle).await;
            }
            trigger.shutdown();
            Ok(())
        }
    }
}

fn settings_key(
    settings: &DocumentSettingsStore,
    identifier: &str,
    field: IdentifierField,
) -> Result<DocumentKey, CliError> {
    settings
        .derive_key(Some(&field.payload(identifier)))
        .ok_or(CliError::MissingArgument("identifier"))
}

async fn cmd_settings_show(
    settings: &DocumentSettingsStore,
    identifier: &str,
    field: IdentifierField,
) -> Result<(), CliError> {
    let key = settings_key(settings, identifier, field)?;

    match settings.load(&key).await {
        Some(stored) => {
            let text = serde_json::to_string_pretty(&stored)
                .map_err(|e| SettingsStoreError::SerializationFailed(e.to_string()))?;
            println!("{}", text);
        }
        None => println!("No settings stored under {}", key),
    }
    Ok(())
}

async fn cmd_settings_save(
    settings: &DocumentSettingsStore,
    identifier: &str,
    json: &str,
) -> Result<(), CliError> {
    let key = settings_key(settings, identifier, IdentifierField::DocumentId)?;
    let parsed: DocumentSettings =
        serde_json::from_str(json).map_err(|e| CliError::InvalidSettings(e.to_string()))?;

    settings.save(&key, &parsed).await?;
    println!("Saved settings under {}", key);
    Ok(())
}

async fn cmd_settings_clear(
    settings: &DocumentSettingsStore,
    identifier: &str,
) -> Result<(), CliError> {
    let key = settings_key(settings, identifier, IdentifierField::DocumentId)?;
    settings.clear(&key).await?;
    println!("Cleared settings under {}", key);
    Ok(())
}

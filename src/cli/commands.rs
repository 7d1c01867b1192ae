//! CLI command implementations
//!
//! `init` creates the data directory layout; `serve` opens the store and
//! runs the HTTP server. Both load the JSON configuration file first.

use std::fs::{self, File};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::store::BookStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure.
///
/// HTTP settings live at the top level next to `data_dir`, all optional:
///
/// ```json
/// {"data_dir": "./bookdb-data", "port": 8000}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    #[serde(flatten)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        Ok(())
    }

    fn log_path(&self) -> std::path::PathBuf {
        Path::new(&self.data_dir).join("data").join("books.log")
    }
}

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
    }
}

/// Create the data directory layout and an empty record log.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let log_path = config.log_path();
    if log_path.exists() {
        return Err(CliError::AlreadyInitialized);
    }

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(&log_path)?;

    Logger::info("INIT_COMPLETE", &[("data_dir", &config.data_dir)]);
    Ok(())
}

/// Open the store and serve the HTTP API until the process exits.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if !config.log_path().exists() {
        return Err(CliError::NotInitialized);
    }

    let store = BookStore::open(Path::new(&config.data_dir))
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let server = HttpServer::new(store, config.http);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("failed to build runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

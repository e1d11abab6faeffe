use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use local_kv::{
    Config, ConfigError, DiskStore, EngineKind, LocalStorage, LogFormat, LoggingConfig,
    StorageConfig,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Lib(#[from] local_kv::Error),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("Operation '{0}' failed")]
    OperationFailed(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Lib(err.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Lib(err.into())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::Lib(err.into())
    }
}

#[derive(Parser)]
#[command(name = "local-kv")]
#[command(about = "JSON key-value storage with an in-memory fallback")]
struct Cli {
    /// Store path
    #[arg(long, global = true, env = "LOCAL_KV_PATH")]
    path: Option<PathBuf>,

    /// Keyspace inside the store
    #[arg(long, global = true)]
    keyspace: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true, env = "LOCAL_KV_CONFIG")]
    config: Option<PathBuf>,

    /// Keep entries in memory only (nothing outlives the command)
    #[arg(long, global = true)]
    volatile: bool,

    /// Log filter, e.g. "warn" or "local_kv=debug"
    #[arg(long, global = true, env = "LOCAL_KV_LOG")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON value stored under a key
    Get {
        /// Key to read
        key: String,

        /// JSON value to print when the key is missing or unreadable
        #[arg(long)]
        default: Option<String>,
    },

    /// Store a JSON value under a key
    Set {
        /// Key to write
        key: String,

        /// JSON-encoded value
        value: String,
    },

    /// Remove a key
    Remove {
        /// Key to remove
        key: String,
    },

    /// Remove every entry
    Clear,

    /// Print the number of entries
    Len,

    /// Print which engine is active and how many entries it holds
    Info,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let mut storage = LocalStorage::open(&config.storage);
    execute(cli.command, &mut storage, &config.storage, &mut io::stdout().lock())
}

/// Run one command against `storage`, writing its output to `out`.
fn execute(
    command: Commands,
    storage: &mut LocalStorage,
    config: &StorageConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Commands::Get { key, default } => {
            let default = default.as_deref().map(parse_json).transpose()?;

            let value = storage
                .get::<serde_json::Value>(&key)
                .or(default)
                .unwrap_or(serde_json::Value::Null);
            writeln!(out, "{}", value)?;
        }

        Commands::Set { key, value } => {
            let value = parse_json(&value)?;
            report(out, "set", storage.set(&key, &value))?;
        }

        Commands::Remove { key } => {
            report(out, "remove", storage.remove(&key))?;
        }

        Commands::Clear => {
            report(out, "clear", storage.clear())?;
        }

        Commands::Len => {
            writeln!(out, "{}", storage.len())?;
        }

        Commands::Info => {
            writeln!(out, "engine: {}", storage.engine_kind())?;
            if let Some(path) = config.host_path() {
                writeln!(out, "path: {}", path.display())?;
            }
            writeln!(out, "keyspace: {}", config.keyspace)?;
            writeln!(out, "entries: {}", storage.len())?;

            if storage.engine_kind() == EngineKind::Volatile {
                if let Err(err) = open_host(config) {
                    writeln!(out, "fallback: {}", err)?;
                }
            }
        }
    }

    Ok(())
}

fn parse_json(text: &str) -> Result<serde_json::Value, AppError> {
    Ok(serde_json::from_str(text)?)
}

/// Open the configured disk store directly, surfacing the error the facade
/// absorbed when it fell back to memory.
fn open_host(config: &StorageConfig) -> local_kv::Result<()> {
    if let Some(path) = config.host_path() {
        DiskStore::open(path, &config.keyspace, config.sync_on_write)?;
    }
    Ok(())
}

/// Print a facade result, turning `false` into a failing exit status.
fn report(out: &mut impl Write, op: &'static str, ok: bool) -> Result<(), AppError> {
    writeln!(out, "{}", ok)?;
    if ok {
        Ok(())
    } else {
        Err(AppError::OperationFailed(op))
    }
}

/// Merge the config file (if any) with command-line overrides.
fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(path) = &cli.path {
        config.storage.path = Some(path.clone());
    }
    if let Some(keyspace) = &cli.keyspace {
        config.storage.keyspace = keyspace.clone();
    }
    if cli.volatile {
        config.storage.path = None;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    Ok(config)
}

/// Install a stderr subscriber; stdout is reserved for command output.
fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_new(&config.level).map_err(|e| AppError::LogFilter(e.to_string()))?;
    let registry = tracing_subscriber::registry().with(filter);
    let ansi = io::stderr().is_terminal();

    match (config.format, config.timestamps) {
        (LogFormat::Text, true) => registry
            .with(fmt::layer().with_ansi(ansi).with_writer(io::stderr))
            .init(),
        (LogFormat::Text, false) => registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(io::stderr)
                    .without_time(),
            )
            .init(),
        (LogFormat::Json, true) => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        (LogFormat::Json, false) => registry
            .with(fmt::layer().json().with_writer(io::stderr).without_time())
            .init(),
    }

    Ok(())
}

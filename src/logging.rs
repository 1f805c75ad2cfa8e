//! Logging System
//!
//! Structured logging using the `tracing` crate. Logs go to stderr by default so
//! that stdout carries only identifiers and manifests.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directives, e.g. `fsmanifest=debug`
pub const ENV_FILTER: &str = "FSMANIFEST_LOG";
pub const ENV_FORMAT: &str = "FSMANIFEST_LOG_FORMAT";
pub const ENV_OUTPUT: &str = "FSMANIFEST_LOG_OUTPUT";
pub const ENV_FILE: &str = "FSMANIFEST_LOG_FILE";
/// Comma-separated `module=level` pairs
pub const ENV_MODULES: &str = "FSMANIFEST_LOG_MODULES";

/// Line format of emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogOutput {
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "stdout")]
    Stdout,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    #[value(name = "file+stderr")]
    FileAndStderr,
}

impl LogOutput {
    fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

impl FromStr for LogOutput {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stderr" => Ok(LogOutput::Stderr),
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            "file+stderr" => Ok(LogOutput::FileAndStderr),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'file+stderr')",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; when false nothing is emitted
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file path when the output includes a file
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored text on terminals; never applied to files
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `fsmanifest::manifest = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Check the level and module directives without installing anything.
    pub fn validate(&self) -> Result<(), ApiError> {
        parse_level(&self.level)?;
        for (module, level) in &self.modules {
            module_directive(module, level)?;
        }
        Ok(())
    }
}

/// Default log file under the platform state (or local data) directory.
pub fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "", "fsmanifest").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directory for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir());
    Ok(dir.join("fsmanifest.log"))
}

/// Install the global subscriber.
///
/// Environment variables win over `config`, which the binary has already
/// merged from config files and CLI flags.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    if !config.enabled {
        Registry::default().with(EnvFilter::new("off")).init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = env_override(ENV_FORMAT)?.unwrap_or(config.format);
    let output = env_override(ENV_OUTPUT)?.unwrap_or(config.output);

    let writer = match output {
        LogOutput::FileAndStderr => {
            BoxMakeWriter::new(open_log_file(config)?.and(std::io::stderr))
        }
        LogOutput::File => BoxMakeWriter::new(open_log_file(config)?),
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = Registry::default().with(filter);
    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    match format {
        LogFormat::Json => registry.with(layer.json()).init(),
        LogFormat::Text => registry
            .with(layer.with_ansi(config.color && !output.writes_file()))
            .init(),
    }

    Ok(())
}

fn env_override<T: FromStr<Err = ApiError>>(name: &str) -> Result<Option<T>, ApiError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, ApiError> {
    let log_file = match (&config.file, std::env::var(ENV_FILE)) {
        (_, Ok(path)) if !path.is_empty() => PathBuf::from(path),
        (Some(path), _) => path.clone(),
        _ => default_log_file_path()?,
    };

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e)))
}

fn parse_level(level: &str) -> Result<LevelFilter, ApiError> {
    level
        .parse()
        .map_err(|_| ApiError::ConfigError(format!("Invalid log level: {}", level)))
}

fn module_directive(module: &str, level: &str) -> Result<Directive, ApiError> {
    format!("{}={}", module.trim(), level.trim())
        .parse()
        .map_err(|e| ApiError::ConfigError(format!("Invalid log directive for {}: {}", module, e)))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }

    let mut filter = EnvFilter::new(parse_level(&config.level)?.to_string());
    for (module, level) in &config.modules {
        filter = filter.add_directive(module_directive(module, level)?);
    }

    if let Ok(pairs) = std::env::var(ENV_MODULES) {
        for pair in pairs.split(',').filter(|p| !p.trim().is_empty()) {
            let (module, level) = pair.split_once('=').ok_or_else(|| {
                ApiError::ConfigError(format!("Invalid {} entry: {}", ENV_MODULES, pair))
            })?;
            filter = filter.add_directive(module_directive(module, level)?);
        }
    }

    Ok(filter)
}

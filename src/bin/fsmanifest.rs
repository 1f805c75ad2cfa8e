//! fsmanifest CLI Binary

use clap::Parser;
use fsmanifest::cli::{exit_code, map_error, Cli, RunContext};
use fsmanifest::config::ConfigLoader;
use fsmanifest::logging::{init_logging, LogOutput, LoggingConfig};
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("fsmanifest starting");

    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(Path::new("."))
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        if config.output == LogOutput::File {
            config.output = LogOutput::FileAndStderr;
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.format = format;
    }
    if let Some(output) = cli.log_output {
        config.output = output;
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::try_parse() --> Config --> Logging --> run_check_command
//!   exit 0    tree verified clean
//!   exit 255  reported failure in the tree
//!   exit 1    usage error / fatal abort
//! ```

use std::process::ExitCode;

use subcheck::cli::{self, global::GlobalOptions};
use subcheck::cmd::{EXIT_FATAL, EXIT_VERIFICATION_FAILED, run_check_command};
use subcheck::config::{Config, DEFAULT_CONFIG_FILE, loader::ConfigLoader};
use subcheck::error::{ConfigError, Result};
use subcheck::logging::{LogConfig, init_logging};
use subcheck::tree::Verdict;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(&err),
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match run_check_command(&cli, &config).await {
        Ok(Verdict::Clean) => ExitCode::SUCCESS,
        Ok(Verdict::Failed) => ExitCode::from(EXIT_VERIFICATION_FAILED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Prints the clap rendering and maps it onto the exit-code contract:
/// help/version exit 0, everything else is a usage error.
fn handle_parse_error(err: &clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => {
            eprintln!("!!FAILED!! subcheck requires a repository path and a target branch");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    let console_level = config.global.output_log_level;
    let file_level = config.global.file_log_level.unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = ConfigLoader::new()
        .add_toml_file_optional(DEFAULT_CONFIG_FILE)
        .with_env_prefix("SUBCHECK");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    for entry in global.to_config_overrides() {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::BadOverride {
                entry: entry.clone(),
            })?;
        loader = loader.set(key, value)?;
    }
    loader.build()
}

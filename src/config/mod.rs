// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. subcheck.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. SUBCHECK_* env vars
//! 5. --set / dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SUBCHECK_CHECK_REMOTE=upstream → check.remote = "upstream"
//! SUBCHECK_TOOLS_GIT=/usr/bin/git → tools.git = "/usr/bin/git"
//! ```

pub mod loader;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

/// Default name of the optional configuration file looked up in the cwd.
pub const DEFAULT_CONFIG_FILE: &str = "subcheck.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub global: GlobalConfig,
    pub check: CheckConfig,
    pub tools: ToolsConfig,
}

/// Global options (logging).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Console log level (0-6).
    pub output_log_level: LogLevel,

    /// Log-file level; falls back to `output_log_level` when unset.
    pub file_log_level: Option<LogLevel>,

    /// Path of an optional log file.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: None,
            log_file: None,
        }
    }
}

/// Options of the submodule check itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Remote name used for `remote get-url` and as the `rev-list` trunk
    /// prefix.
    pub remote: String,

    /// Report indentation unit (spaces per tree level).
    pub indent: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            indent: 2,
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Git executable; a bare name is resolved via PATH.
    pub git: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
        }
    }
}

impl Config {
    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty remote name or a
    /// zero indent unit.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.check.remote.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "check".to_string(),
                key: "remote".to_string(),
                message: "remote name must not be empty".to_string(),
            }
            .into());
        }
        if self.check.indent == 0 {
            return Err(ConfigError::InvalidValue {
                section: "check".to_string(),
                key: "indent".to_string(),
                message: "indent unit must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

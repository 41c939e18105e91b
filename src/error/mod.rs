// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          CheckError (~24 bytes)
//!                 |
//!     +------+---+---+-------+
//!     |      |       |       |
//!     v      v       v       v
//!   Bail    Git    Config  Process  Io/Other
//!           Box     Box     Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, TrunkNotDetected, MalformedRevList,
//!           SubmoduleNotClean, NotARepository
//!   Config  InvalidValue, BadOverride
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit
//!
//! All variants boxed => CheckError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CheckError`].
pub type CheckResult<T> = std::result::Result<T, CheckError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`CheckError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> CheckError {
    CheckError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CheckError {
                fn from(err: $error) -> Self {
                    CheckError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// The path is not inside a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// The remote description did not name a HEAD branch.
    #[error("could not detect the default branch of remote {remote}")]
    TrunkNotDetected { remote: String },

    /// `rev-list --left-right --count` returned fewer than two count fields.
    #[error("bad data from git rev-list: {output:?}")]
    MalformedRevList { output: String },

    /// A submodule pin carries an uninitialized or dirty sentinel.
    #[error(
        "submodule tree is not initialized at {path} - verify that you have \
         recursively cloned and that there are no uncommitted changes in \
         submodules; consider running 'git submodule update --init --recursive'"
    )]
    SubmoduleNotClean { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override that is not of the form `key=value`.
    #[error("config override must look like key=value, got '{entry}'")]
    BadOverride { entry: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

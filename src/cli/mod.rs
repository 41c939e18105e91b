// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! subcheck [global options] <REPO_PATH> <TARGET_BRANCH>
//! ```

pub mod global;


use clap::Parser;
use std::path::PathBuf;

use crate::cli::global::GlobalOptions;

/// Pre-merge consistency checker for nested git submodule trees.
///
/// Walks the repository at `REPO_PATH` and every transitively nested
/// submodule, verifying that the tree is fully initialized and clean, that
/// any two checkouts of the same remote pin the identical commit, and -
/// when `TARGET_BRANCH` is master or main - that no pin lags its own
/// upstream trunk.
#[derive(Debug, Parser)]
#[command(
    name = "subcheck",
    author,
    version,
    about = "Pre-merge consistency checker for nested git submodule trees",
    after_help = "CONFIG:\n\n\
                  subcheck reads an optional subcheck.toml from the current\n\
                  directory, then any --config files in order, then\n\
                  SUBCHECK_* environment variables. --set and the dedicated\n\
                  flags override everything else.\n\n\
                  EXIT STATUS:\n\n\
                  0 on a fully verified tree, 255 when the report contains a\n\
                  failure (divergent pins or a pin behind its trunk), 1 on\n\
                  usage errors and fatal aborts (uninitialized or dirty\n\
                  submodules, failing git invocations)."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Path of the repository checkout to verify.
    #[arg(value_name = "REPO_PATH")]
    pub repo_path: PathBuf,

    /// Branch the pending merge targets; master or main (any case)
    /// activates trunk-distance checking.
    #[arg(value_name = "TARGET_BRANCH")]
    pub target_branch: String,
}

/// Parses command-line arguments, returning the error instead of exiting so
/// `main` controls the usage exit code.
///
/// # Errors
///
/// Returns a `clap::Error` for missing or malformed arguments, and for the
/// help/version short-circuits.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

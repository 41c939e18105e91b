// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handler.
//!
//! ```text
//! run_check_command
//!   validate root path --> GitCli --> check_tree --> report to stdout
//!                                            |
//!                                            v
//!                                        Verdict --> exit code in main
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{GitError, Result, bail_out};
use crate::git::GitCli;
use crate::tree::{Verdict, check_tree, is_trunk_branch, render_tree};

/// Exit code for a tree with reported failures (the byte value of `-1`).
pub const EXIT_VERIFICATION_FAILED: u8 = 255;

/// Exit code for usage errors and fatal aborts.
pub const EXIT_FATAL: u8 = 1;

/// Runs the submodule consistency check and prints the tree report.
///
/// # Errors
///
/// Returns an error (a fatal abort) if the root path is missing or not a
/// git work tree, if any git invocation fails or produces malformed output,
/// or if an uninitialized/dirty submodule is encountered. Reported failures
/// are not errors; they surface in the returned [`Verdict`].
pub async fn run_check_command(cli: &Cli, config: &Config) -> Result<Verdict> {
    if !cli.repo_path.exists() {
        return Err(bail_out(format!(
            "repository path does not exist: {}",
            cli.repo_path.display()
        ))
        .into());
    }
    let root = cli
        .repo_path
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", cli.repo_path.display()))?;

    let git = GitCli::from_config(config)?;
    if !git.is_work_tree(&root).await? {
        return Err(GitError::NotARepository {
            path: root.display().to_string(),
        }
        .into());
    }

    let check_trunk = is_trunk_branch(&cli.target_branch);
    info!(
        path = %root.display(),
        branch = %cli.target_branch,
        check_trunk,
        "checking submodule tree"
    );

    let outcome = check_tree(Arc::new(git), root, check_trunk).await?;

    print!("{}", render_tree(&outcome.tree, config.check.indent));

    if outcome.verdict == Verdict::Failed {
        warn!("submodule tree verification failed");
    }
    Ok(outcome.verdict)
}

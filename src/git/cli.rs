// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subprocess-backed [`RepoQuery`] implementation.
//!
//! ```text
//! GitCli --> git CLI
//!   remote_url          git remote get-url <remote>
//!   submodules          git submodule status
//!   trunk_ahead_count   git remote show <url>      (HEAD branch probe)
//!                       git rev-list --left-right --count <remote>/<trunk>...<commit>
//! ```
//!
//! Every subprocess sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`
//! so a run can never hang on a credential prompt.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use regex::Regex;
use tracing::{debug, trace};

use super::{PinState, RepoQuery, SubmoduleEntry};
use crate::config::Config;
use crate::core::process::{ProcessBuilder, ProcessFlags};
use crate::error::{CheckResult, GitError, ProcessError, Result};

/// Matcher for the `HEAD branch: <name>` line of `git remote show`.
static HEAD_BRANCH_RE: OnceLock<Regex> = OnceLock::new();

fn head_branch_re() -> &'static Regex {
    HEAD_BRANCH_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*HEAD branch:\s*(\S+)\s*$").expect("head branch pattern is valid")
    })
}

/// Git CLI wrapper implementing [`RepoQuery`].
#[derive(Debug, Clone)]
pub struct GitCli {
    git: PathBuf,
    remote_name: String,
}

impl GitCli {
    /// Creates a `GitCli` from the merged configuration.
    ///
    /// A bare executable name in `tools.git` is resolved via PATH once; an
    /// explicit path is taken as-is.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if `tools.git` is a bare
    /// name that cannot be resolved.
    pub fn from_config(config: &Config) -> CheckResult<Self> {
        let configured = &config.tools.git;
        let git = if configured.components().count() > 1 || configured.is_absolute() {
            configured.clone()
        } else {
            let name = configured.to_string_lossy();
            ProcessBuilder::find(&name).ok_or_else(|| ProcessError::ExecutableNotFound {
                name: name.into_owned(),
            })?
        };
        Ok(Self {
            git,
            remote_name: config.check.remote.clone(),
        })
    }

    /// Returns the remote name used for queries.
    #[must_use]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    fn command(&self, args: &[&str]) -> ProcessBuilder {
        ProcessBuilder::new(&self.git)
            .args(args)
            .name("git")
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
    }

    /// Runs a git query and returns its stdout, mapping a non-zero exit to
    /// a fatal [`GitError::CommandFailed`] carrying the stderr text.
    async fn git_output(&self, args: &[&str], cwd: &Path) -> Result<String> {
        let output = self
            .command(args)
            .cwd(cwd)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        if !output.success() {
            let message = if output.stderr().trim().is_empty() {
                format!("exit code {}", output.exit_code())
            } else {
                output.stderr().trim().to_string()
            };
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message,
            }
            .into());
        }
        Ok(output.stdout().to_string())
    }

    /// Checks whether `path` lies inside a git work tree.
    ///
    /// # Errors
    ///
    /// Returns an error only if git itself cannot be spawned.
    pub async fn is_work_tree(&self, path: &Path) -> Result<bool> {
        let output = self
            .command(&["rev-parse", "--is-inside-work-tree"])
            .cwd(path)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        Ok(output.success() && output.stdout().trim() == "true")
    }
}

impl RepoQuery for GitCli {
    fn remote_url<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<String>> {
        async move {
            let out = self
                .git_output(&["remote", "get-url", &self.remote_name], path)
                .await?;
            let url = out.trim().to_string();
            trace!(path = %path.display(), remote = %url, "resolved remote");
            Ok(url)
        }
        .boxed()
    }

    fn submodules<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<Vec<SubmoduleEntry>>> {
        async move {
            let out = self.git_output(&["submodule", "status"], path).await?;
            let entries = parse_submodule_status(path, &out);
            trace!(path = %path.display(), count = entries.len(), "listed submodules");
            Ok(entries)
        }
        .boxed()
    }

    fn trunk_ahead_count<'a>(
        &'a self,
        remote_url: &'a str,
        commit: &'a str,
        cwd: &'a Path,
    ) -> BoxFuture<'a, Result<u64>> {
        async move {
            let show = self.git_output(&["remote", "show", remote_url], cwd).await?;
            let trunk =
                parse_head_branch(&show).ok_or_else(|| GitError::TrunkNotDetected {
                    remote: remote_url.to_string(),
                })?;
            let range = format!("{}/{}...{}", self.remote_name, trunk, commit);
            let counts = self
                .git_output(&["rev-list", "--left-right", "--count", &range], cwd)
                .await?;
            let (trunk_only, _) = parse_rev_list_counts(&counts)?;
            debug!(
                commit,
                trunk = %trunk,
                ahead = trunk_only,
                "computed trunk distance"
            );
            Ok(trunk_only)
        }
        .boxed()
    }
}

/// Parses `git submodule status` output into entries, resolving each path
/// against the parent checkout.
pub(crate) fn parse_submodule_status(parent: &Path, stdout: &str) -> Vec<SubmoduleEntry> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let pin_field = fields.next()?;
            let name = fields.next()?;
            Some(SubmoduleEntry {
                name: name.to_string(),
                path: parent.join(name),
                pin: PinState::parse(pin_field),
            })
        })
        .collect()
}

/// Extracts the default branch name from `git remote show` output.
pub(crate) fn parse_head_branch(stdout: &str) -> Option<String> {
    head_branch_re()
        .captures(stdout)
        .map(|captures| captures[1].to_string())
}

/// Parses the two tab-separated counts of
/// `git rev-list --left-right --count`; fewer than two fields is fatal.
pub(crate) fn parse_rev_list_counts(stdout: &str) -> std::result::Result<(u64, u64), GitError> {
    let malformed = || GitError::MalformedRevList {
        output: stdout.trim().to_string(),
    };
    let mut fields = stdout.split_whitespace();
    let left = fields
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or_else(malformed)?;
    let right = fields
        .next()
        .and_then(|f| f.parse::<u64>().ok())
        .ok_or_else(malformed)?;
    Ok((left, right))
}

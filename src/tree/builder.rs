// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive tree construction with concurrent subtree visits.
//!
//! ```text
//! visit(node)
//!   1. remote_url(node)
//!   2. registry.observe(remote, pin)      conflict => run failed (reported)
//!   3. trunk_ahead_count (non-root,       positive => run failed (reported)
//!      trunk merges only)
//!   4. submodules(node)
//!   5. sentinel pin (- or +)              => fatal abort, whole run
//!   6. spawn visit per child (JoinSet),
//!      join ALL, reassemble in lister order
//! ```
//!
//! Children of independent subtrees complete in arbitrary order; the index
//! slots restore lister order regardless. A fatal error anywhere propagates
//! through the join chain and abandons in-flight sibling work.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::registry::{RegistryOutcome, RemoteRegistry};
use super::{TreeNode, Verdict};
use crate::error::{GitError, Result};
use crate::git::{PinState, RepoQuery};

/// Result of a completed traversal.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Fully populated tree, read-only from here on.
    pub tree: TreeNode,
    /// Run-level pass/fail verdict.
    pub verdict: Verdict,
}

/// Shared run state: the remote registry and the run-level failure flag.
///
/// Visit tasks run on a multi-threaded runtime, so both carry explicit
/// synchronization.
struct RunState {
    registry: Mutex<RemoteRegistry>,
    failed: AtomicBool,
}

impl RunState {
    fn new() -> Self {
        Self {
            registry: Mutex::new(RemoteRegistry::new()),
            failed: AtomicBool::new(false),
        }
    }

    /// Registry decision and failure flagging in one atomic step.
    fn observe(&self, remote: &str, commit: &str, path: &Path) {
        let outcome = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observe(remote, commit, path);
        if let RegistryOutcome::Conflict { canonical } = outcome {
            warn!(
                remote,
                path = %path.display(),
                canonical = %canonical.display(),
                "same remote pinned at different commits"
            );
            self.mark_failed();
        }
    }

    fn mark_failed(&self) {
        self.failed.store(true, Ordering::Relaxed);
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Builds and verifies the submodule tree rooted at `root_path`.
///
/// `check_trunk` activates per-node trunk-distance checking (merges into
/// master/main). The root itself is never distance-checked.
///
/// # Errors
///
/// Returns an error on any collaborator failure, on an uninitialized or
/// dirty submodule pin, or if a visit task panics. Reported failures
/// (divergence, positive ahead counts) do not error; they surface in the
/// returned [`Verdict`].
pub async fn check_tree(
    query: Arc<dyn RepoQuery>,
    root_path: PathBuf,
    check_trunk: bool,
) -> Result<CheckOutcome> {
    let name = root_display_name(&root_path);
    let state = Arc::new(RunState::new());

    let mut tree = visit(
        query,
        Arc::clone(&state),
        name,
        root_path,
        String::new(),
        check_trunk,
    )
    .await?;

    {
        let registry = state
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        stamp_divergence(&mut tree, &registry);
    }

    let verdict = if state.failed() {
        Verdict::Failed
    } else {
        Verdict::Clean
    };
    Ok(CheckOutcome { tree, verdict })
}

/// Root display name: the path's final component without extension.
fn root_display_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

/// Visits one node and, recursively, its whole subtree.
///
/// Boxed because async recursion needs an indirection; `'static` because
/// every child visit runs as its own spawned task.
fn visit(
    query: Arc<dyn RepoQuery>,
    state: Arc<RunState>,
    name: String,
    path: PathBuf,
    commit: String,
    check_trunk: bool,
) -> BoxFuture<'static, Result<TreeNode>> {
    async move {
        let remote = query.remote_url(&path).await?;
        state.observe(&remote, &commit, &path);

        // The root (empty pin) is allowed to be ahead of its own trunk.
        let ahead_of_trunk = if check_trunk && !commit.is_empty() {
            let count = query.trunk_ahead_count(&remote, &commit, &path).await?;
            if count > 0 {
                warn!(
                    path = %path.display(),
                    count,
                    "pinned commit is missing commits present on its trunk"
                );
                state.mark_failed();
            }
            Some(count)
        } else {
            None
        };

        let entries = query.submodules(&path).await?;

        // Sentinel pins make the whole tree unverifiable; abort before any
        // child visit is spawned.
        let mut pending = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.pin {
                PinState::Valid(hash) => pending.push((entry.name, entry.path, hash)),
                PinState::Uninitialized | PinState::Dirty => {
                    return Err(GitError::SubmoduleNotClean {
                        path: entry.path.display().to_string(),
                    }
                    .into());
                }
            }
        }

        let child_count = pending.len();
        let mut join = JoinSet::new();
        for (index, (child_name, child_path, child_commit)) in pending.into_iter().enumerate() {
            let query = Arc::clone(&query);
            let state = Arc::clone(&state);
            join.spawn(async move {
                visit(query, state, child_name, child_path, child_commit, check_trunk)
                    .await
                    .map(|node| (index, node))
            });
        }

        // Countdown join: this node completes only once every child has
        // reported back, in whatever order the subtree checks finish.
        let mut slots: Vec<Option<TreeNode>> = vec![None; child_count];
        while let Some(joined) = join.join_next().await {
            let (index, child) = joined.context("submodule visit task failed")??;
            slots[index] = Some(child);
        }
        let children = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .context("submodule visit completed without a result")?;

        debug!(path = %path.display(), children = child_count, "subtree complete");

        Ok(TreeNode {
            name,
            path,
            commit,
            remote: Some(remote),
            ahead_of_trunk,
            divergent: false,
            children,
        })
    }
    .boxed()
}

/// Post-pass stamping the divergence flag recorded in the registry onto the
/// completed tree.
fn stamp_divergence(node: &mut TreeNode, registry: &RemoteRegistry) {
    node.divergent = registry.is_divergent(&node.path);
    for child in &mut node.children {
        stamp_divergence(child, registry);
    }
}

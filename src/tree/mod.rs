// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule tree verification core.
//!
//! ```text
//! check_tree(query, root, check_trunk)
//!        |
//!        v
//!    visit(node)             one task per child (JoinSet)
//!    • remote_url            parent joins after ALL children
//!    • registry observe      RemoteRegistry: remote -> first-seen pin
//!    • trunk distance        divergence marked on BOTH sides
//!    • submodule list        sentinel pin => fatal abort
//!        |
//!        v
//!    CheckOutcome { tree, verdict } --> report::render_tree
//! ```

pub mod builder;
pub mod registry;
pub mod report;


pub use builder::{CheckOutcome, check_tree};
pub use registry::{RegistryOutcome, RemoteRegistry};
pub use report::render_tree;

use std::path::PathBuf;

/// One repository or submodule checkout in the verified tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Display identifier: the submodule name, or the root path's stem.
    pub name: String,
    /// Resolved filesystem path of the checkout.
    pub path: PathBuf,
    /// Commit pinned by the parent; empty for the root, which has no pin.
    pub commit: String,
    /// Upstream remote URL, resolved during the visit.
    pub remote: Option<String>,
    /// Commits the upstream trunk is ahead of the pin; only computed for
    /// non-root nodes when trunk checking is active.
    pub ahead_of_trunk: Option<u64>,
    /// Set when another node references the same remote at a different pin.
    pub divergent: bool,
    /// Child submodules, in lister order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Whether this is the tree root (the checkout under test).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.commit.is_empty()
    }

    /// Whether this node carries a reported failure.
    #[must_use]
    pub fn has_failure(&self) -> bool {
        self.divergent || self.ahead_of_trunk.is_some_and(|count| count > 0)
    }
}

/// Run-level pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No divergence, no positive ahead count anywhere in the tree.
    Clean,
    /// At least one reported failure; the report carries the detail.
    Failed,
}

/// Whether the merge target activates trunk-distance checking.
///
/// Only merges into master or main (case-insensitive) forbid submodule pins
/// that lag their own trunk.
#[must_use]
pub fn is_trunk_branch(name: &str) -> bool {
    name.eq_ignore_ascii_case("master") || name.eq_ignore_ascii_case("main")
}

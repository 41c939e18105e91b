// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git collaborator interface.
//!
//! ```text
//! RepoQuery (trait)
//!   remote_url(path)
//!   submodules(path)            --> Vec<SubmoduleEntry { name, path, pin }>
//!   trunk_ahead_count(remote, commit, cwd)
//!        |
//!        v
//!    GitCli --> git subprocesses (remote get-url / submodule status /
//!               remote show / rev-list --left-right --count)
//! ```
//!
//! The tree builder only sees [`RepoQuery`]; tests substitute scripted
//! fakes for the subprocess-backed [`GitCli`].

pub mod cli;

#[cfg(test)]
mod tests;

pub use cli::GitCli;

use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Pinned state of a submodule as reported by its parent checkout.
///
/// `git submodule status` prefixes the hash with `-` for an uninitialized
/// checkout and `+` for one whose checked-out commit differs from the
/// recorded pin; both make the tree unverifiable and abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinState {
    /// A plain commit hash.
    Valid(String),
    /// Submodule checkout is missing (`-` sentinel).
    Uninitialized,
    /// Submodule checkout has local modifications (`+` sentinel).
    Dirty,
}

impl PinState {
    /// Parses the hash field of a `git submodule status` line.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        if field.starts_with('-') {
            Self::Uninitialized
        } else if field.starts_with('+') {
            Self::Dirty
        } else {
            Self::Valid(field.to_string())
        }
    }

    /// Returns the commit hash for a valid pin.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        match self {
            Self::Valid(hash) => Some(hash),
            Self::Uninitialized | Self::Dirty => None,
        }
    }
}

/// One immediate child submodule of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    /// Submodule name (its path relative to the parent checkout).
    pub name: String,
    /// Resolved filesystem path of the submodule checkout.
    pub path: PathBuf,
    /// Pinned commit recorded by the parent.
    pub pin: PinState,
}

/// The three read-only repository queries the tree builder consumes.
///
/// All operations are asynchronous and uncoordinated; the builder fires them
/// concurrently across independent subtrees. Any error is fatal for the
/// whole run.
pub trait RepoQuery: Send + Sync {
    /// Returns the configured upstream remote URL of the checkout at `path`.
    fn remote_url<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<String>>;

    /// Lists the immediate child submodules of the checkout at `path`, in
    /// the order git reports them.
    fn submodules<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<Vec<SubmoduleEntry>>>;

    /// Returns how many commits the remote's trunk branch (auto-detected
    /// master/main) is ahead of `commit`: commits reachable from trunk but
    /// not from the pinned commit.
    fn trunk_ahead_count<'a>(
        &'a self,
        remote_url: &'a str,
        commit: &'a str,
        cwd: &'a Path,
    ) -> BoxFuture<'a, Result<u64>>;
}

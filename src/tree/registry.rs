// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-tree remote registry for divergence detection.
//!
//! ```text
//! observe(remote, commit, path)
//!   unseen remote            -> Inserted   (node becomes canonical)
//!   seen, same commit        -> Match
//!   seen, different commit   -> Conflict   (both paths marked divergent)
//! ```
//!
//! The same remote may legitimately appear at several tree positions
//! (diamond dependency); the registry exists to police exactly that case.
//! Write-once-then-read per key, live for one run.

use std::collections::{HashMap, HashSet, hash_map::Entry};
use std::path::{Path, PathBuf};

/// First-seen pin for a remote.
#[derive(Debug, Clone)]
struct CanonicalPin {
    commit: String,
    path: PathBuf,
}

/// Outcome of a registry lookup-or-insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// The remote was unseen; the observing node is now canonical.
    Inserted,
    /// The remote was seen before at the identical commit.
    Match,
    /// The remote was seen before at a different commit; the canonical
    /// node's path is returned and both sides are now marked divergent.
    Conflict { canonical: PathBuf },
}

/// Mapping from remote URL to the first tree node observed with it.
#[derive(Debug, Default)]
pub struct RemoteRegistry {
    canonical: HashMap<String, CanonicalPin>,
    divergent: HashSet<PathBuf>,
}

impl RemoteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a node's remote/pin pair and reports how it relates to the
    /// first-seen entry for that remote.
    ///
    /// On conflict, the first-seen node is retroactively marked divergent
    /// together with the observing one.
    pub fn observe(&mut self, remote: &str, commit: &str, path: &Path) -> RegistryOutcome {
        match self.canonical.entry(remote.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(CanonicalPin {
                    commit: commit.to_string(),
                    path: path.to_path_buf(),
                });
                RegistryOutcome::Inserted
            }
            Entry::Occupied(occupied) => {
                if occupied.get().commit == commit {
                    RegistryOutcome::Match
                } else {
                    let canonical = occupied.get().path.clone();
                    self.divergent.insert(canonical.clone());
                    self.divergent.insert(path.to_path_buf());
                    RegistryOutcome::Conflict { canonical }
                }
            }
        }
    }

    /// Whether the node at `path` was involved in a pin conflict.
    #[must_use]
    pub fn is_divergent(&self, path: &Path) -> bool {
        self.divergent.contains(path)
    }

    /// Whether any conflict was observed during the run.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.divergent.is_empty()
    }

    /// Number of distinct remotes observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

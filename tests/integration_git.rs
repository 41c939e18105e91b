// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `GitCli` collaborator.
//!
//! Drives the three repository queries against real temporary repositories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use subcheck::config::Config;
use subcheck::git::{GitCli, PinState, RepoQuery};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory.
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Helper to run git and capture stdout.
fn git_out(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git should run");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create an initialized git repo with a deterministic `master` branch and
/// an initial commit.
fn init_repo(dir: &Path) {
    assert!(run_git(&["init", "-q", "-b", "master"], dir), "git init");
    assert!(run_git(&["config", "user.email", "test@test.com"], dir));
    assert!(run_git(&["config", "user.name", "Test"], dir));
    fs::write(dir.join("README.md"), "# Test\n").unwrap();
    assert!(run_git(&["add", "."], dir));
    assert!(run_git(&["commit", "-q", "-m", "Initial commit"], dir));
}

fn commit_empty(dir: &Path, message: &str) {
    assert!(run_git(&["commit", "-q", "--allow-empty", "-m", message], dir));
}

fn head_hash(dir: &Path) -> String {
    git_out(&["rev-parse", "HEAD"], dir)
}

/// Adds `source` as a submodule named `name` of `superproject` and commits
/// the pin.
fn add_submodule(superproject: &Path, source: &Path, name: &str) {
    assert!(
        run_git(
            &[
                "-c",
                "protocol.file.allow=always",
                "submodule",
                "add",
                "-q",
                &source.display().to_string(),
                name,
            ],
            superproject,
        ),
        "git submodule add {name}"
    );
    assert!(run_git(&["commit", "-q", "-m", "add submodule"], superproject));
}

fn git_cli() -> GitCli {
    GitCli::from_config(&Config::default()).expect("git must be on PATH")
}

/// A dependency repo plus a superproject pinning it as `dep`.
fn super_with_dep(temp: &TempDir) -> (PathBuf, PathBuf) {
    let dep = temp.path().join("dep");
    fs::create_dir_all(&dep).unwrap();
    init_repo(&dep);

    let superproject = temp.path().join("superproject");
    fs::create_dir_all(&superproject).unwrap();
    init_repo(&superproject);
    add_submodule(&superproject, &dep.canonicalize().unwrap(), "dep");

    (superproject, dep)
}

// =============================================================================
// remote_url
// =============================================================================

#[tokio::test]
async fn git_remote_url_of_clone() {
    let temp = temp_dir();
    let source = temp.path().join("source");
    fs::create_dir_all(&source).unwrap();
    init_repo(&source);
    let source_url = source.canonicalize().unwrap().display().to_string();

    let clone = temp.path().join("clone");
    assert!(run_git(
        &["clone", "-q", &source_url, &clone.display().to_string()],
        temp.path(),
    ));

    let url = git_cli().remote_url(&clone).await.expect("remote url");
    assert_eq!(url, source_url);
}

#[tokio::test]
async fn git_remote_url_fails_without_remote() {
    let temp = temp_dir();
    init_repo(temp.path());
    let result = git_cli().remote_url(temp.path()).await;
    assert!(result.is_err());
}

// =============================================================================
// submodules
// =============================================================================

#[tokio::test]
async fn git_submodules_empty_for_plain_repo() {
    let temp = temp_dir();
    init_repo(temp.path());
    let entries = git_cli().submodules(temp.path()).await.expect("listing");
    assert!(entries.is_empty());
}

#[tokio::test]
async fn git_submodules_lists_clean_entry() {
    let temp = temp_dir();
    let (superproject, dep) = super_with_dep(&temp);

    let entries = git_cli().submodules(&superproject).await.expect("listing");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "dep");
    assert_eq!(entries[0].path, superproject.join("dep"));
    assert_eq!(entries[0].pin, PinState::Valid(head_hash(&dep)));
}

#[tokio::test]
async fn git_submodules_uninitialized_sentinel() {
    let temp = temp_dir();
    let (superproject, _dep) = super_with_dep(&temp);

    // A plain clone leaves the submodule checkout uninitialized.
    let clone = temp.path().join("clone");
    assert!(run_git(
        &[
            "clone",
            "-q",
            &superproject.display().to_string(),
            &clone.display().to_string(),
        ],
        temp.path(),
    ));

    let entries = git_cli().submodules(&clone).await.expect("listing");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].pin, PinState::Uninitialized);
}

#[tokio::test]
async fn git_submodules_dirty_sentinel() {
    let temp = temp_dir();
    let (superproject, _dep) = super_with_dep(&temp);

    // Move the submodule checkout off the recorded pin.
    let checkout = superproject.join("dep");
    commit_empty(&checkout, "local change");

    let entries = git_cli().submodules(&superproject).await.expect("listing");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].pin, PinState::Dirty);
}

// =============================================================================
// trunk_ahead_count
// =============================================================================

#[tokio::test]
async fn git_trunk_ahead_zero_when_synced() {
    let temp = temp_dir();
    let (superproject, dep) = super_with_dep(&temp);
    let checkout = superproject.join("dep");
    let pin = head_hash(&dep);
    let remote_url = git_out(&["remote", "get-url", "origin"], &checkout);

    let ahead = git_cli()
        .trunk_ahead_count(&remote_url, &pin, &checkout)
        .await
        .expect("trunk distance");
    assert_eq!(ahead, 0);
}

#[tokio::test]
async fn git_trunk_ahead_counts_missing_commits() {
    let temp = temp_dir();
    let (superproject, dep) = super_with_dep(&temp);
    let checkout = superproject.join("dep");
    let pin = head_hash(&dep);

    // Trunk moves on; the pin now lags by two commits.
    commit_empty(&dep, "upstream work 1");
    commit_empty(&dep, "upstream work 2");
    assert!(run_git(&["fetch", "-q", "origin"], &checkout));

    let remote_url = git_out(&["remote", "get-url", "origin"], &checkout);
    let ahead = git_cli()
        .trunk_ahead_count(&remote_url, &pin, &checkout)
        .await
        .expect("trunk distance");
    assert_eq!(ahead, 2);
}

#[tokio::test]
async fn git_trunk_ahead_unknown_commit_is_fatal() {
    let temp = temp_dir();
    let (superproject, _dep) = super_with_dep(&temp);
    let checkout = superproject.join("dep");
    let remote_url = git_out(&["remote", "get-url", "origin"], &checkout);

    let result = git_cli()
        .trunk_ahead_count(&remote_url, "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef", &checkout)
        .await;
    assert!(result.is_err());
}

// =============================================================================
// is_work_tree
// =============================================================================

#[tokio::test]
async fn git_is_work_tree() {
    let temp = temp_dir();
    let repo = temp.path().join("repo");
    fs::create_dir_all(&repo).unwrap();
    init_repo(&repo);
    let plain = temp.path().join("plain");
    fs::create_dir_all(&plain).unwrap();

    let git = git_cli();
    assert!(git.is_work_tree(&repo).await.expect("query"));
    assert!(!git.is_work_tree(&plain).await.expect("query"));
}

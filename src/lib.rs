// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                  main.rs
//!                     |
//!          +----------+----------+
//!          v                     v
//!       cli (clap)          cmd (handler)
//!          |                     |
//!          +----------+----------+
//!                     v
//!        ,---------------------------,
//!        |          config           |
//!        |   TOML, layered settings  |
//!        '------------+--------------'
//!                     |
//!                     v
//!        tree                      git
//!   builder/registry/report   RepoQuery / GitCli
//!                     |
//!   +-----------------------------------------+
//!   |  core      process (tokio subprocesses) |
//!   +-----------------------------------------+
//!   |  foundation      error, logging         |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod tree;

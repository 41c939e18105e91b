// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use super::loader::ConfigLoader;
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = ConfigLoader::new().build().expect("defaults should build");
    assert_eq!(config.check.remote, "origin");
    assert_eq!(config.check.indent, 2);
    assert_eq!(config.tools.git, PathBuf::from("git"));
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.global.file_log_level.is_none());
    assert!(config.global.log_file.is_none());
}

#[test]
fn test_toml_string_source() {
    let config = ConfigLoader::new()
        .add_toml_str(
            r#"
            [global]
            output_log_level = 5

            [check]
            remote = "upstream"
            indent = 4

            [tools]
            git = "/usr/local/bin/git"
            "#,
        )
        .build()
        .expect("toml should load");
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(config.check.remote, "upstream");
    assert_eq!(config.check.indent, 4);
    assert_eq!(config.tools.git, PathBuf::from("/usr/local/bin/git"));
}

#[test]
fn test_set_override_wins_over_file() {
    let config = ConfigLoader::new()
        .add_toml_str("[check]\nremote = \"upstream\"\n")
        .set("check.remote", "fork")
        .expect("override should apply")
        .build()
        .expect("config should build");
    assert_eq!(config.check.remote, "fork");
}

#[test]
fn test_missing_required_file_fails() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/subcheck.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_zero_indent_rejected() {
    let result = ConfigLoader::new().add_toml_str("[check]\nindent = 0\n").build();
    let message = result.expect_err("zero indent must fail").to_string();
    assert!(message.contains("indent"), "unexpected error: {message}");
}

#[test]
fn test_empty_remote_rejected() {
    let result = ConfigLoader::new()
        .add_toml_str("[check]\nremote = \"  \"\n")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 9\n")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_mutated_config() {
    let mut config = Config::default();
    config.check.indent = 0;
    assert!(config.resolve_and_validate().is_err());
}

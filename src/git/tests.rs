// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::cli::{parse_head_branch, parse_rev_list_counts, parse_submodule_status};
use super::{PinState, SubmoduleEntry};
use std::path::{Path, PathBuf};

#[test]
fn test_pin_state_parse() {
    assert_eq!(
        PinState::parse("4dd89d5a10a1f4545731ae9291363ef612e7f56a"),
        PinState::Valid("4dd89d5a10a1f4545731ae9291363ef612e7f56a".to_string())
    );
    assert_eq!(
        PinState::parse("-4dd89d5a10a1f4545731ae9291363ef612e7f56a"),
        PinState::Uninitialized
    );
    assert_eq!(
        PinState::parse("+4dd89d5a10a1f4545731ae9291363ef612e7f56a"),
        PinState::Dirty
    );
}

#[test]
fn test_pin_state_commit() {
    assert_eq!(PinState::parse("abc123").commit(), Some("abc123"));
    assert_eq!(PinState::parse("-abc123").commit(), None);
    assert_eq!(PinState::parse("+abc123").commit(), None);
}

#[test]
fn test_parse_submodule_status_clean_entries() {
    let stdout = " 4dd89d5a10a1f4545731ae9291363ef612e7f56a deps/parson (v1.1.0-4-g4dd89d5)\n \
                  83ea15b1ef8e8e8bcbb837301ccf37a0b6b1f452 deps/umock-c (heads/master)\n";
    let entries = parse_submodule_status(Path::new("/work/repo"), stdout);
    assert_eq!(
        entries,
        vec![
            SubmoduleEntry {
                name: "deps/parson".to_string(),
                path: PathBuf::from("/work/repo/deps/parson"),
                pin: PinState::Valid("4dd89d5a10a1f4545731ae9291363ef612e7f56a".to_string()),
            },
            SubmoduleEntry {
                name: "deps/umock-c".to_string(),
                path: PathBuf::from("/work/repo/deps/umock-c"),
                pin: PinState::Valid("83ea15b1ef8e8e8bcbb837301ccf37a0b6b1f452".to_string()),
            },
        ]
    );
}

#[test]
fn test_parse_submodule_status_sentinels() {
    let stdout = "-a94a8fe5ccb19ba61c4c0873d391e987982fbbd3 deps/ctest\n\
                  +de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3 deps/testrunner (heads/main)\n";
    let entries = parse_submodule_status(Path::new("/work/repo"), stdout);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].pin, PinState::Uninitialized);
    assert_eq!(entries[1].pin, PinState::Dirty);
}

#[test]
fn test_parse_submodule_status_empty() {
    assert!(parse_submodule_status(Path::new("/work/repo"), "").is_empty());
    assert!(parse_submodule_status(Path::new("/work/repo"), "\n \n").is_empty());
}

#[test]
fn test_parse_head_branch() {
    let stdout = "* remote https://github.com/example/repo.git\n  \
                  Fetch URL: https://github.com/example/repo.git\n  \
                  Push  URL: https://github.com/example/repo.git\n  \
                  HEAD branch: main\n  \
                  Remote branches:\n    main tracked\n";
    assert_eq!(parse_head_branch(stdout), Some("main".to_string()));
}

#[test]
fn test_parse_head_branch_master() {
    let stdout = "* remote origin\n  HEAD branch: master\n";
    assert_eq!(parse_head_branch(stdout), Some("master".to_string()));
}

#[test]
fn test_parse_head_branch_missing() {
    assert_eq!(parse_head_branch("* remote origin\n  Fetch URL: x\n"), None);
    assert_eq!(parse_head_branch(""), None);
}

#[test]
fn test_parse_rev_list_counts() {
    assert_eq!(parse_rev_list_counts("2\t5\n").expect("two fields"), (2, 5));
    assert_eq!(parse_rev_list_counts("0\t0").expect("two fields"), (0, 0));
}

#[test]
fn test_parse_rev_list_counts_malformed() {
    let err = parse_rev_list_counts("7\n").expect_err("one field must fail");
    insta::assert_snapshot!(err.to_string(), @r#"bad data from git rev-list: "7""#);

    assert!(parse_rev_list_counts("").is_err());
    assert!(parse_rev_list_counts("a\tb").is_err());
}

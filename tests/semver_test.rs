// tests/semver_test.rs
mod common;

use git_plus::cli::semver::{run_semver, SemverOutcome};
use git_plus::domain::VersionIncrement;
use git_plus::git::Git2Repository;
use std::process::Command;
use tempfile::TempDir;

fn semver_bin(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_git-semver"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git-semver")
}

#[test]
fn test_list_against_real_repository() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());
    common::tag_head(&repo, &["v1.2.0", "v1.10.0", "v1.9.0", "nightly"]);

    let git = Git2Repository::open(dir.path()).unwrap();
    let mut out = Vec::new();
    let outcome = run_semver(&git, &VersionIncrement::default(), "", &mut out).unwrap();

    assert_eq!(
        outcome,
        SemverOutcome::Listed {
            last: "v1.10.0".to_string()
        }
    );
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Not a version: nightly"));
    assert!(text.find(" * v1.9.0").unwrap() < text.find(" * v1.10.0").unwrap());
}

#[test]
fn test_create_against_real_repository() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());
    common::tag_head(&repo, &["v1.4.9"]);

    let git = Git2Repository::open(dir.path()).unwrap();
    let outcome = run_semver(
        &git,
        &VersionIncrement::new(true, false, false),
        "",
        &mut std::io::sink(),
    )
    .unwrap();

    assert_eq!(
        outcome,
        SemverOutcome::Created {
            tag: "v2.0.0".to_string()
        }
    );
    assert_eq!(common::tag_names(&repo), vec!["v1.4.9", "v2.0.0"]);
}

#[test]
fn test_binary_help() {
    let dir = TempDir::new().unwrap();
    let output = semver_bin(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--major"));
    assert!(stdout.contains("--suffix"));
}

#[test]
fn test_binary_no_tags_exits_zero() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());

    let output = semver_bin(dir.path(), &["--patch"]);

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("No tags"));
    assert!(common::tag_names(&repo).is_empty());
}

#[test]
fn test_binary_creates_tag_with_suffix() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());
    common::tag_head(&repo, &["v0.3.7"]);

    let output = semver_bin(dir.path(), &["--minor", "--patch", "--suffix", "rc1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Tag v0.4.0-rc1 created"));
    assert_eq!(common::tag_names(&repo), vec!["v0.3.7", "v0.4.0-rc1"]);
}

#[test]
fn test_binary_tag_creation_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());
    common::tag_head(&repo, &["v1.0.0"]);

    // ".." is not allowed in a reference name
    let output = semver_bin(dir.path(), &["--patch", "--suffix", "bad..name"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("Error creating tag"));
    assert_eq!(common::tag_names(&repo), vec!["v1.0.0"]);
}

#[test]
fn test_binary_overflowing_version_exits_one() {
    let dir = TempDir::new().unwrap();
    let repo = common::init_repo(dir.path());
    common::tag_head(&repo, &["v1.2.18446744073709551615"]);

    let output = semver_bin(dir.path(), &["--patch"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("cannot be incremented"));
    assert_eq!(common::tag_names(&repo), vec!["v1.2.18446744073709551615"]);
}

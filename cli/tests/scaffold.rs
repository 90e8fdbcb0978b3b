//! # OpsForge CLI Scaffold Integration Tests
//!
//! File: cli/tests/scaffold.rs
//!
//! ## Overview
//!
//! Integration tests for the `opsforge scaffold` subcommand. Each test runs
//! the binary inside a temporary payload repository (seeded by the common
//! helper) so the default relative configuration paths resolve there.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scaffold_terraform_project() {
    let repo = tempdir().expect("Failed to create temp repo");
    seed_payload_repo(repo.path());
    let target = tempdir().expect("Failed to create target dir");

    opsforge_cmd()
        .current_dir(repo.path())
        .args(["scaffold", "demo", "--type", "terraform", "-d"])
        .arg(target.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("created successfully"));

    let project = target.path().join("demo");
    assert!(project.join("CLAUDE.md").exists());
    assert!(project.join("main.tf").exists());
    assert!(project.join("variables.tf").exists());
    assert!(project.join("modules").is_dir());
    assert!(project.join(".gitignore").exists());

    // The template payload is copied byte for byte.
    let copied = fs::read_to_string(project.join("CLAUDE.md")).unwrap();
    assert_eq!(
        copied,
        "# Assistant conventions for terraform projects\n"
    );
    // The example config subtree is copied alongside.
    assert!(project.join("backend.tf.example").exists());
}

#[test]
fn test_scaffold_python_alias_and_layout() {
    let repo = tempdir().expect("Failed to create temp repo");
    seed_payload_repo(repo.path());
    let target = tempdir().expect("Failed to create target dir");

    opsforge_cmd()
        .current_dir(repo.path())
        .args(["scaffold", "My App", "-t", "python", "-d"])
        .arg(target.path())
        .assert()
        .success();

    let project = target.path().join("My App");
    assert!(project.join("src/my_app/__init__.py").exists());
    assert!(project.join("requirements.txt").exists());
    assert!(project.join("tests").is_dir());
}

#[test]
fn test_scaffold_unknown_type_fails_without_writes() {
    let repo = tempdir().expect("Failed to create temp repo");
    seed_payload_repo(repo.path());
    let target = tempdir().expect("Failed to create target dir");

    opsforge_cmd()
        .current_dir(repo.path())
        .args(["scaffold", "demo", "--type", "ruby", "-d"])
        .arg(target.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!target.path().join("demo").exists());
}

#[test]
fn test_scaffold_existing_target_requires_force() {
    let repo = tempdir().expect("Failed to create temp repo");
    seed_payload_repo(repo.path());
    let target = tempdir().expect("Failed to create target dir");
    let project = target.path().join("demo");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("keep.txt"), "precious\n").unwrap();

    // Without --force the command refuses and leaves the directory alone.
    opsforge_cmd()
        .current_dir(repo.path())
        .args(["scaffold", "demo", "-t", "cicd", "-d"])
        .arg(target.path())
        .assert()
        .failure();
    assert!(!project.join("CLAUDE.md").exists());

    // With --force it proceeds and preserves unrelated files.
    opsforge_cmd()
        .current_dir(repo.path())
        .args(["scaffold", "demo", "-t", "cicd", "--force", "-d"])
        .arg(target.path())
        .assert()
        .success();
    assert!(project.join("CLAUDE.md").exists());
    assert_eq!(
        fs::read_to_string(project.join("keep.txt")).unwrap(),
        "precious\n"
    );
}

//! # OpsForge CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! This module provides shared utility functions used across multiple
//! integration test files (`scaffold.rs`, `review.rs`, `docs.rs`,
//! `main_tests.rs`). This avoids code duplication in the test suite.
//!
//! Integration tests are located in the `cli/tests/` directory and each
//! `.rs` file in that directory (that isn't a module like this one) is
//! compiled as a separate test crate linked against the main `opsforge`
//! binary crate.
//!

// Allow potentially unused code in this common module, as different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// # Get OpsForge Command (`opsforge_cmd`)
///
/// Helper function to create an `assert_cmd::Command` instance pointing to
/// the compiled `opsforge` binary target for the current test run.
///
/// ## Panics
/// Panics if the `opsforge` binary cannot be found via `Command::cargo_bin`.
pub fn opsforge_cmd() -> Command {
    Command::cargo_bin("opsforge").expect("Failed to find opsforge binary for testing")
}

/// # Seed Payload Repository (`seed_payload_repo`)
///
/// Lays out a minimal payload repository (templates/, configs/, prompts/)
/// under `root` so commands run with `root` as their working directory pick
/// it up through the default relative configuration paths.
pub fn seed_payload_repo(root: &Path) {
    for ty in ["terraform", "kubernetes", "python", "cicd"] {
        let dir = root.join("templates").join(ty);
        fs::create_dir_all(&dir).expect("Failed to create template dir");
        fs::write(
            dir.join("CLAUDE.md"),
            format!("# Assistant conventions for {} projects\n", ty),
        )
        .expect("Failed to write template payload");
    }
    fs::create_dir_all(root.join("configs/terraform-project"))
        .expect("Failed to create configs dir");
    fs::write(
        root.join("configs/terraform-project/backend.tf.example"),
        "# backend example\n",
    )
    .expect("Failed to write config payload");
    fs::create_dir_all(root.join("prompts")).expect("Failed to create prompts dir");
    fs::write(
        root.join("prompts/security-review.md"),
        "Check for hardcoded credentials and open ingress rules.\n",
    )
    .expect("Failed to write prompt payload");
}

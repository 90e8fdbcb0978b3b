//! # OpsForge Shared Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module aggregates utilities shared by more than one command group.
//! Anything a single command owns stays in that command's module; only
//! genuinely cross-cutting pieces live here.
//!
//! ## Architecture
//!
//! - `classify`: the single shared file and project-kind classifier used by
//!   both `review` and `docs`
//! - `exec`: optional external tool lookup and execution (git, pandoc)
//! - `fs`: filesystem wrappers (ensure dir, whole-file I/O, recursive copy)
//!

/// Shared file-type and project-kind classification.
pub mod classify;
/// Optional external tool lookup and execution.
pub mod exec;
/// Filesystem helper operations.
pub mod fs;

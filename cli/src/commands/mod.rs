//! # OpsForge Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates all top-level command groups that comprise the
//! OpsForge CLI. It serves as the central point for importing and
//! re-exporting command modules to make them accessible to the main
//! application entry point (`main.rs`).
//!
//! ## Command Groups
//!
//! - `scaffold`: Creates new AI-assistant-ready project directories from
//!   template payloads
//! - `review`: Bulk-review report generation over infrastructure and
//!   application files
//! - `docs`: Documentation skeleton generation (API, architecture, README)
//!
//! Each command group defines its own arguments structure and handler
//! function to process those arguments and implement the command's
//! functionality.
//!

/// Command group for generating documentation skeletons from a source tree.
pub mod docs;
/// Command group for bulk code-review report generation.
pub mod review;
/// Command group for scaffolding new projects from template payloads.
pub mod scaffold;

// Internal helpers of a command group (like `plan` inside `scaffold` or
// `discover` inside `review`) are declared within that group's `mod.rs`,
// not here.

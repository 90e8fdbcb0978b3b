//! # OpsForge Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy used throughout OpsForge. Every
//! failure a command can hit maps onto one of a small set of variants so that
//! callers (and tests) can tell configuration mistakes, unknown type values,
//! and missing files apart without string matching.
//!
//! ## Architecture
//!
//! The error system consists of two parts:
//! - `OpsForgeError`: a custom error enum derived with `thiserror`
//! - `Result<T>`: a type alias for `anyhow::Result<T>`
//!
//! The variants cover:
//! - Configuration errors (missing required argument or config value)
//! - Unknown project/doc/filter type values
//! - Missing source directories, templates, or prompt files
//! - Pre-existing scaffold targets (in place of an interactive confirm)
//! - Filesystem failures
//! - Template rendering failures (tera)
//! - External command failures (git, pandoc)
//!
//! ## Examples
//!
//! Using the error system:
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     return Err(OpsForgeError::NotFound(format!("template '{}'", path.display())))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
//! All variants are terminal for the current invocation; nothing is retried.
//! Optional tooling that is missing (git, pandoc) is handled with a warning
//! at the call site instead of an error from this module.
//!
use thiserror::Error;

/// Custom error type for the OpsForge application.
#[derive(Error, Debug)]
pub enum OpsForgeError {
    /// A required argument or configuration value is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A project type, doc type, filter, or format value was not recognized.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A source directory, template, or prompt file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The scaffold target already exists and --force was not given.
    #[error("Target '{path}' already exists. Use --force to overwrite.")]
    AlreadyExists { path: String },

    /// A filesystem operation failed in a way that is not a plain NotFound.
    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// Rendering an embedded markdown skeleton failed.
    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    /// An external tool (git, pandoc) ran but reported failure.
    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;

//! # OpsForge Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components that provide
//! foundational functionality for OpsForge: configuration, error management,
//! and skeleton templating.
//!
//! ## Architecture
//!
//! - `config`: configuration loading, merging, path resolution, validation
//! - `error`: error types and the shared `Result` alias
//! - `templating`: Tera-backed rendering for report and doc skeletons
//!
//! ## Usage
//!
//! Core infrastructure is imported by command handlers:
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{OpsForgeError, Result}; // For error handling
//! use crate::core::templating; // For skeleton rendering
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;

//! # OpsForge Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module wraps the Tera engine for rendering the markdown skeletons
//! that OpsForge emits: review reports and documentation files. The skeleton
//! sources are embedded template strings owned by the command modules; this
//! module only provides the shared rendering entry point and consistent error
//! mapping.
//!
//! ## Architecture
//!
//! Rendering is stateless: each call goes through `Tera::one_off` with a
//! caller-supplied `tera::Context`. There is no template registry and no
//! template files on disk — payload files (CLAUDE.md templates, prompts) are
//! opaque and copied verbatim, never rendered.
//!
//! Renderers are pure functions of their context. Anything nondeterministic
//! (the generated-at timestamp) is injected by the caller, which is what
//! makes repeated renders byte-identical in tests.
//!
//! ## Examples
//!
//! ```rust
//! let mut ctx = tera::Context::new();
//! ctx.insert("project_name", "demo");
//! let body = templating::render_skeleton(SKELETON, &ctx)?;
//! ```
//!
use crate::core::error::{OpsForgeError, Result};
use anyhow::anyhow;
use serde::Serialize;
use tera::Tera;

/// Renders an embedded skeleton template against the given context.
///
/// Autoescape is disabled: the output is markdown, not HTML, and payload
/// excerpts must pass through untouched.
pub fn render_skeleton(template: &str, context: &tera::Context) -> Result<String> {
    Tera::one_off(template, context, false)
        .map_err(|e| anyhow!(OpsForgeError::Template { source: e }).context("Skeleton rendering failed"))
}

/// Builds a `tera::Context` from any serializable value.
///
/// The command modules keep their view structs (`#[derive(Serialize)]`) next
/// to their skeleton strings and convert them here.
pub fn context_from<T: Serialize>(value: &T) -> Result<tera::Context> {
    tera::Context::from_serialize(value).map_err(|e| {
        anyhow!(OpsForgeError::Template { source: e })
            .context("Failed to build template context")
    })
}

//! # OpsForge External Tool Execution (`common::exec`)
//!
//! File: cli/src/common/exec.rs
//!
//! ## Overview
//!
//! This module wraps the two optional external tools OpsForge can make use
//! of: `git` (repository initialization after scaffolding) and `pandoc`
//! (markdown-to-HTML conversion for generated docs). Both are strictly
//! optional — callers probe for availability with `find_tool` and downgrade
//! a missing binary to a warning plus a skipped step.
//!
//! ## Architecture
//!
//! - **`find_tool`**: PATH lookup via the `which` crate; `None` means the
//!   tool is absent and the dependent step should be skipped.
//! - **`run_tool`**: runs a located binary with arguments and an optional
//!   working directory, capturing output. A non-zero exit status maps to
//!   `OpsForgeError::ExternalCommand` with the captured output attached.
//! - **`git_init` / `markdown_to_html`**: the two concrete operations built
//!   on top of the generic runner.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::exec;
//!
//! if let Some(git) = exec::find_tool("git") {
//!     exec::git_init(&git, &project_dir)?;
//! } else {
//!     warn!("git not found on PATH, skipping repository init");
//! }
//! ```
//!
use crate::core::error::{OpsForgeError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Looks up an external tool on PATH. `None` means unavailable.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => {
            debug!("Found external tool '{}' at {:?}", name, path);
            Some(path)
        }
        Err(_) => {
            debug!("External tool '{}' not found on PATH", name);
            None
        }
    }
}

/// Runs a located tool, capturing stdout/stderr. Non-zero exit becomes
/// `OpsForgeError::ExternalCommand` carrying the combined output.
pub fn run_tool(tool: &Path, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut command = Command::new(tool);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command
        .output()
        .with_context(|| format!("Failed to spawn {:?} {:?}", tool, args))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if output.status.success() {
        Ok(stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(OpsForgeError::ExternalCommand {
            cmd: format!("{:?} {}", tool, args.join(" ")),
            status: output.status.to_string(),
            output: format!("{}{}", stdout, stderr),
        }
        .into())
    }
}

/// Initializes a git repository in `project_dir` unless one is already
/// present. Returns whether an init actually happened.
pub fn git_init(git: &Path, project_dir: &Path) -> Result<bool> {
    if project_dir.join(".git").exists() {
        debug!(
            "Repository already initialized at {}",
            project_dir.display()
        );
        return Ok(false);
    }
    run_tool(git, &["init"], Some(project_dir))?;
    info!("Initialized git repository in {}", project_dir.display());
    Ok(true)
}

/// Converts a markdown file to a sibling `.html` file via pandoc.
/// Returns the path of the written HTML file.
pub fn markdown_to_html(pandoc: &Path, markdown_path: &Path) -> Result<PathBuf> {
    let html_path = markdown_path.with_extension("html");
    run_tool(
        pandoc,
        &[
            "--standalone",
            "--output",
            &html_path.to_string_lossy(),
            &markdown_path.to_string_lossy(),
        ],
        None,
    )?;
    info!("Converted {:?} to {:?}", markdown_path, html_path);
    Ok(html_path)
}

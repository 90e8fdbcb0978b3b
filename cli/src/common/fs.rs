//! # OpsForge Filesystem Utilities
//!
//! File: cli/src/common/fs.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem operations shared by the OpsForge
//! commands: ensuring directories exist, reading and writing whole files,
//! creating empty placeholder files, and recursively copying configuration
//! subtrees. Everything here is a thin, consistently-error-handled wrapper
//! around `std::fs` plus one `fs_extra` call for the recursive copy.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p` semantics, with a check that a
//!   pre-existing path really is a directory.
//! - **`read_file_to_string` / `write_string_to_file`**: whole-file I/O with
//!   context on failure; writes create the parent directory first and
//!   overwrite existing content.
//! - **`create_empty_file`**: writes a zero-byte file only when nothing is
//!   there yet; scaffold skeletons must not clobber user files under --force.
//! - **`copy_dir_recursive`**: copies the *contents* of a source directory
//!   into a target directory via `fs_extra`, overwriting on collision.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs as ofs;
//!
//! ofs::ensure_dir_exists(&project_dir.join("modules"))?;
//! ofs::create_empty_file(&project_dir.join("main.tf"))?;
//! ofs::copy_dir_recursive(&configs_dir.join("terraform-project"), &project_dir)?;
//! ```
//!
use crate::core::error::{OpsForgeError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents. If the path exists but is
/// not a directory, returns `OpsForgeError::FileSystem`.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(OpsForgeError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string, with path context on
/// failure.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, overwriting if it exists. The parent
/// directory is created first when missing.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Creates an empty file at the given path unless something already exists
/// there. Returns whether a file was created.
pub fn create_empty_file(path: &Path) -> Result<bool> {
    if path.exists() {
        debug!("Skipping existing file: {:?}", path);
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, "").with_context(|| format!("Failed to create empty file {:?}", path))?;
    debug!("Created empty file: {:?}", path);
    Ok(true)
}

/// Recursively copies the contents of `source` into `target`.
///
/// `target` is created when missing; colliding files in the target are
/// overwritten. `content_only` makes this behave like `cp -r source/.
/// target/` rather than nesting the source directory name.
pub fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    ensure_dir_exists(target)?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    fs_extra::dir::copy(source, target, &options)
        .map_err(|e| {
            anyhow::anyhow!(e)
                .context(format!("Failed to copy dir {:?} to {:?}", source, target))
        })?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(())
}

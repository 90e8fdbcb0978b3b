//! # OpsForge Scaffold Cleanup Tracker
//!
//! File: cli/src/commands/scaffold/tracker.rs
//!
//! ## Overview
//!
//! Scaffolding performs an ordered sequence of filesystem side effects. If a
//! later step fails, earlier steps must not leave a half-populated project
//! behind. This module tracks every path a scaffold invocation *creates* so
//! the failure path can remove exactly those — and nothing that existed
//! before the invocation started.
//!
//! ## Architecture
//!
//! `CleanupTracker` is an ordered list of created paths. Callers record a
//! path immediately after creating it; `remove_created` deletes the recorded
//! paths in reverse creation order (files before their parent directories).
//! Pre-existing paths are never recorded, so a `--force` run over an
//! existing directory only rolls back its own additions.
//!
//! Cleanup is best-effort: a failed removal logs a warning and moves on,
//! since the original error is the one the user needs to see.
//!
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered record of filesystem paths created by one scaffold invocation.
#[derive(Debug, Default)]
pub struct CleanupTracker {
    created: Vec<PathBuf>,
}

impl CleanupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a path this invocation created.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!("Tracking created path: {:?}", path);
        self.created.push(path);
    }

    /// Number of tracked paths. Used by tests and for logging.
    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// Removes every tracked path in reverse creation order.
    ///
    /// Directories are removed recursively: a tracked directory was created
    /// by this invocation, so everything inside it is ours too.
    pub fn remove_created(self) {
        for path in self.created.into_iter().rev() {
            if let Err(e) = remove_path(&path) {
                warn!("Cleanup could not remove {:?}: {}", path, e);
            }
        }
    }
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        // Already gone (e.g. removed with an earlier-tracked parent).
        Ok(())
    }
}

//! # OpsForge File and Project Classification
//!
//! File: cli/src/common/classify.rs
//!
//! ## Overview
//!
//! This module is the single shared classifier used by both the review and
//! docs commands. It answers two questions:
//!
//! - What kind of file is this? (`classify`) — by extension, with one content
//!   read to tell a Kubernetes manifest apart from plain YAML.
//! - What kind of project is this directory? (`detect_project_kind`) — by
//!   marker files, with a YAML scan fallback for Kubernetes trees.
//!
//! ## Architecture
//!
//! `classify` is a pure function of path plus (for YAML only) file contents
//! at classification time: re-classifying an unchanged file always yields the
//! same answer. An unreadable YAML file classifies as `Other` rather than
//! failing the caller's whole run.
//!
//! `detect_project_kind` follows a priority-based approach:
//! 1. Look for marker files (`main.tf`, `requirements.txt`/`setup.py`,
//!    `package.json`) directly in the directory
//! 2. Fall back to walking the tree for YAML files that carry Kubernetes
//!    markers (`apiVersion:` / `kind:`)
//! 3. Otherwise report `Generic`
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::classify::{self, FileType, ProjectKind};
//!
//! let ty = classify::classify(Path::new("deploy.yaml"));
//! if ty == FileType::Kubernetes { /* ... */ }
//!
//! let kind = classify::detect_project_kind(Path::new("."));
//! println!("Detected: {}", kind);
//! ```
//!
use std::{fmt, fs, path::Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Coarse content-type label for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Terraform,
    Kubernetes,
    Yaml,
    Python,
    Shell,
    Other,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileType::Terraform => "terraform",
            FileType::Kubernetes => "kubernetes",
            FileType::Yaml => "yaml",
            FileType::Python => "python",
            FileType::Shell => "shell",
            FileType::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// Coarse project-type label for a source directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Terraform,
    Python,
    Nodejs,
    Kubernetes,
    Generic,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectKind::Terraform => "terraform",
            ProjectKind::Python => "python",
            ProjectKind::Nodejs => "nodejs",
            ProjectKind::Kubernetes => "kubernetes",
            ProjectKind::Generic => "generic",
        };
        write!(f, "{}", label)
    }
}

/// Substrings that mark a YAML document as a Kubernetes manifest.
const K8S_MARKERS: [&str; 2] = ["apiVersion:", "kind:"];

/// Classifies a single file by extension, with content sniffing for YAML.
///
/// Extension matching is case-insensitive. The only I/O this function
/// performs is one read for `.yaml`/`.yml` files; a failed read downgrades
/// the answer to `Other` instead of propagating the error.
pub fn classify(path: &Path) -> FileType {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "tf" | "tfvars" => FileType::Terraform,
        "py" => FileType::Python,
        "sh" | "bash" => FileType::Shell,
        "yaml" | "yml" => classify_yaml(path),
        _ => FileType::Other,
    }
}

/// Disambiguates plain YAML from a Kubernetes manifest by looking for the
/// literal `apiVersion:` / `kind:` substrings anywhere in the file.
fn classify_yaml(path: &Path) -> FileType {
    match fs::read_to_string(path) {
        Ok(content) => {
            if K8S_MARKERS.iter().any(|marker| content.contains(marker)) {
                FileType::Kubernetes
            } else {
                FileType::Yaml
            }
        }
        Err(e) => {
            // Permissions or a race with deletion; never fatal to the run.
            warn!("Could not read '{}' for classification: {}", path.display(), e);
            FileType::Other
        }
    }
}

/// Checks if a specific file exists directly within the base path.
fn marker_exists(base: &Path, file_name: &str) -> bool {
    base.join(file_name).exists()
}

/// Detects the coarse project kind of a source directory.
///
/// Marker checks are ordered by priority; the first hit wins. Only the
/// Kubernetes fallback walks the tree, and it stops at the first manifest.
pub fn detect_project_kind(dir: &Path) -> ProjectKind {
    debug!("Detecting project kind in: {}", dir.display());

    if marker_exists(dir, "main.tf") {
        return ProjectKind::Terraform;
    }
    if marker_exists(dir, "requirements.txt") || marker_exists(dir, "setup.py") {
        return ProjectKind::Python;
    }
    if marker_exists(dir, "package.json") {
        return ProjectKind::Nodejs;
    }
    if tree_has_k8s_manifest(dir) {
        return ProjectKind::Kubernetes;
    }

    debug!("No project markers found, reporting generic.");
    ProjectKind::Generic
}

/// Walks the tree looking for any YAML file that classifies as a Kubernetes
/// manifest. Unreadable entries are skipped, matching the classifier's
/// never-fatal contract.
fn tree_has_k8s_manifest(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let ext = entry
                .path()
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            ext == "yaml" || ext == "yml"
        })
        .any(|entry| classify_yaml(entry.path()) == FileType::Kubernetes)
}

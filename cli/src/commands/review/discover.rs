//! # OpsForge Review File Discovery
//!
//! File: cli/src/commands/review/discover.rs
//!
//! ## Overview
//!
//! This module turns a target directory or an explicit file list into the
//! ordered set of `FileRecord`s the review report is built from. Each record
//! captures the file's path, byte size, line count, and classified type at
//! discovery time; records are never mutated afterwards.
//!
//! ## Architecture
//!
//! Two discovery modes, mirroring the command's `-f` flag:
//!
//! - **Explicit list**: each entry is resolved as given, then against the
//!   target directory; missing entries are warned about and skipped. The
//!   caller's order is preserved and no type filter applies.
//! - **Tree walk**: a recursive walk restricted to the review extensions
//!   {tf, tfvars, yaml, yml, py, sh}, classified through the shared
//!   `common::classify`, kept when the type filter matches, and dropped when
//!   the path contains the exclude substring. Traversal order is the
//!   walker's order; callers must not depend on it.
//!
//! Individually unreadable files are skipped with a warning — one bad file
//! never fails the run.
//!
use crate::common::classify::{self, FileType};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{OpsForgeError, Result};

/// File extensions considered for review when walking a directory.
const REVIEW_EXTENSIONS: [&str; 6] = ["tf", "tfvars", "yaml", "yml", "py", "sh"];

/// One discovered file, captured at discovery time.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub byte_size: u64,
    pub line_count: usize,
    pub file_type: FileType,
}

/// The review type filter: everything, or one classified type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Terraform,
    Kubernetes,
    Python,
}

impl TypeFilter {
    /// Parses the `-t` flag value; anything unrecognized is `UnknownType`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "terraform" => Ok(TypeFilter::Terraform),
            "kubernetes" => Ok(TypeFilter::Kubernetes),
            "python" => Ok(TypeFilter::Python),
            other => Err(OpsForgeError::UnknownType(format!(
                "type filter '{}' (expected terraform, kubernetes, python, or all)",
                other
            ))
            .into()),
        }
    }

    fn matches(&self, file_type: FileType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Terraform => file_type == FileType::Terraform,
            TypeFilter::Kubernetes => file_type == FileType::Kubernetes,
            TypeFilter::Python => file_type == FileType::Python,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypeFilter::All => "all",
            TypeFilter::Terraform => "terraform",
            TypeFilter::Kubernetes => "kubernetes",
            TypeFilter::Python => "python",
        };
        write!(f, "{}", label)
    }
}

/// Per-type counts for the console summary printed before the report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub terraform: usize,
    pub kubernetes: usize,
    pub python: usize,
    pub other: usize,
}

impl TypeCounts {
    pub fn tally(records: &[FileRecord]) -> Self {
        let mut counts = TypeCounts::default();
        for record in records {
            match record.file_type {
                FileType::Terraform => counts.terraform += 1,
                FileType::Kubernetes => counts.kubernetes += 1,
                FileType::Python => counts.python += 1,
                // Plain YAML, shell, and everything else share a bucket.
                _ => counts.other += 1,
            }
        }
        counts
    }
}

/// Builds records for an explicit file list, preserving the caller's order.
///
/// Each entry is tried as given first, then relative to `target_dir`.
/// Entries that resolve nowhere are warned about and skipped.
pub fn discover_explicit(files: &[PathBuf], target_dir: &Path) -> Vec<FileRecord> {
    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let resolved = if file.exists() {
            file.clone()
        } else {
            let fallback = target_dir.join(file);
            if fallback.exists() {
                fallback
            } else {
                warn!("Skipping missing file: {}", file.display());
                continue;
            }
        };
        if let Some(record) = build_record(&resolved) {
            records.push(record);
        }
    }
    records
}

/// Walks `target_dir` and builds records for every review-extension file
/// that passes the type filter and the exclude substring.
pub fn discover_tree(
    target_dir: &Path,
    filter: TypeFilter,
    exclude: Option<&str>,
) -> Vec<FileRecord> {
    let mut records = Vec::new();
    for entry in WalkDir::new(target_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry during walk: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !REVIEW_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        if let Some(substr) = exclude {
            if !substr.is_empty() && path.to_string_lossy().contains(substr) {
                debug!("Excluding '{}' (matched '{}')", path.display(), substr);
                continue;
            }
        }

        let Some(record) = build_record(path) else {
            continue;
        };
        if filter.matches(record.file_type) {
            records.push(record);
        }
    }
    records
}

/// Reads one file's metadata and contents into a record. Unreadable files
/// yield `None` with a warning.
fn build_record(path: &Path) -> Option<FileRecord> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("Skipping unreadable file '{}': {}", path.display(), e);
            return None;
        }
    };
    let line_count = String::from_utf8_lossy(&bytes).lines().count();
    Some(FileRecord {
        path: path.to_path_buf(),
        byte_size: bytes.len() as u64,
        line_count,
        file_type: classify::classify(path),
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sorted_names(records: &[FileRecord]) -> Vec<String> {
        let mut names: Vec<String> = records
            .iter()
            .map(|r| {
                r.path
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!(TypeFilter::parse("all").unwrap(), TypeFilter::All);
        assert_eq!(
            TypeFilter::parse("Terraform").unwrap(),
            TypeFilter::Terraform
        );
        assert!(TypeFilter::parse("shell").is_err());
    }

    #[test]
    fn test_discover_tree_filters_by_type() {
        let dir = tempdir().unwrap();
        for name in ["a.tf", "b.tf"] {
            fs::write(dir.path().join(name), "resource \"x\" \"y\" {}\n").unwrap();
        }
        for name in ["c.py", "d.py", "e.py"] {
            fs::write(dir.path().join(name), "print('hi')\n").unwrap();
        }
        fs::write(dir.path().join("notes.md"), "ignored\n").unwrap();

        let tf_only = discover_tree(dir.path(), TypeFilter::Terraform, None);
        assert_eq!(tf_only.len(), 2);
        assert_eq!(sorted_names(&tf_only), vec!["a.tf", "b.tf"]);

        let all = discover_tree(dir.path(), TypeFilter::All, None);
        // The .md file is not a review extension and never appears.
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_discover_tree_exclude_substring() {
        let dir = tempdir().unwrap();
        let modules = dir.path().join("modules");
        fs::create_dir(&modules).unwrap();
        fs::write(dir.path().join("main.tf"), "\n").unwrap();
        fs::write(modules.join("vpc.tf"), "\n").unwrap();

        let records = discover_tree(dir.path(), TypeFilter::All, Some("modules"));
        assert_eq!(sorted_names(&records), vec!["main.tf"]);

        // An empty exclude string drops nothing.
        let records = discover_tree(dir.path(), TypeFilter::All, Some(""));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_discover_tree_classifies_yaml_content() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("deploy.yaml"), "kind: Deployment\n").unwrap();
        fs::write(dir.path().join("values.yaml"), "foo: bar\n").unwrap();

        let k8s = discover_tree(dir.path(), TypeFilter::Kubernetes, None);
        assert_eq!(sorted_names(&k8s), vec!["deploy.yaml"]);
    }

    #[test]
    fn test_discover_tree_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(discover_tree(dir.path(), TypeFilter::All, None).is_empty());
    }

    #[test]
    fn test_discover_explicit_preserves_order_and_skips_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("z.py"), "pass\n").unwrap();
        fs::write(dir.path().join("a.tf"), "\n").unwrap();

        let requested = vec![
            PathBuf::from("z.py"),
            PathBuf::from("missing.sh"),
            PathBuf::from("a.tf"),
        ];
        let records = discover_explicit(&requested, dir.path());

        // Caller-supplied order, not sorted; missing entry skipped.
        let names: Vec<_> = records
            .iter()
            .map(|r| r.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["z.py", "a.tf"]);
    }

    #[test]
    fn test_discover_explicit_no_type_filter() {
        let dir = tempdir().unwrap();
        // Even a non-review extension is accepted when listed explicitly.
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        let records = discover_explicit(&[PathBuf::from("README.md")], dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_type, FileType::Other);
    }

    #[test]
    fn test_record_captures_size_and_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.tf");
        fs::write(&path, "resource \"a\" \"b\" {\n}\n").unwrap();
        let record = build_record(&path).unwrap();
        assert_eq!(record.byte_size, 21);
        assert_eq!(record.line_count, 2);
        assert_eq!(record.file_type, FileType::Terraform);
    }

    #[test]
    fn test_type_counts_tally() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tf"), "\n").unwrap();
        fs::write(dir.path().join("b.py"), "\n").unwrap();
        fs::write(dir.path().join("run.sh"), "\n").unwrap();
        fs::write(dir.path().join("values.yaml"), "foo: bar\n").unwrap();

        let records = discover_tree(dir.path(), TypeFilter::All, None);
        let counts = TypeCounts::tally(&records);
        assert_eq!(counts.terraform, 1);
        assert_eq!(counts.python, 1);
        assert_eq!(counts.kubernetes, 0);
        // Shell and plain YAML land in the shared bucket.
        assert_eq!(counts.other, 2);
    }
}

//! # OpsForge Review Command Group
//!
//! File: cli/src/commands/review/mod.rs
//!
//! ## Overview
//!
//! This module implements `opsforge review`, which enumerates infrastructure
//! and application files under a target directory (or takes an explicit
//! list), classifies them with the shared classifier, and writes a markdown
//! review report skeleton — one section per file — for a human or AI
//! reviewer to fill in.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Parse arguments and validate the type filter
//! 2. Load configuration (for the default prompt location)
//! 3. Discover files (`discover` module): explicit list or tree walk
//! 4. Zero matches → warn and finish successfully with no report written
//! 5. Print the per-type count summary to the console
//! 6. Render the report (`report` module) and write it, overwriting any
//!    previous report at the output path
//!
//! ## Examples
//!
//! ```bash
//! # Review every matching file under the current directory
//! opsforge review
//!
//! # Only Terraform files, skipping vendored modules
//! opsforge review -d infra -t terraform -e .terraform
//!
//! # An explicit file list with a custom prompt
//! opsforge review -f main.tf,app.py -p prompts/security-review.md -o report.md
//! ```
//!
use crate::common::fs as ofs;
use crate::core::config::{self, Config};
use crate::core::error::{OpsForgeError, Result};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// File discovery and the record/filter types.
mod discover;
/// Report view structs and skeleton rendering.
mod report;

use discover::{FileRecord, TypeCounts, TypeFilter};
use report::{FileSection, ReportView, MISSING_PROMPT_TEXT};

/// # Review Arguments (`ReviewArgs`)
///
/// Command-line arguments accepted by `opsforge review`.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Target directory to enumerate.
    #[arg(long, short = 'd', default_value = ".")]
    directory: PathBuf,

    /// Explicit comma-separated file list; bypasses the tree walk and the
    /// type filter, preserving the given order.
    #[arg(long, short = 'f', value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Prompt file to embed verbatim. Defaults to security-review.md in the
    /// configured prompts directory.
    #[arg(long, short = 'p')]
    prompt: Option<PathBuf>,

    /// Output report path, overwritten on each run.
    #[arg(long, short = 'o', default_value = "review-report.md")]
    output: PathBuf,

    /// Type filter: terraform, kubernetes, python, or all.
    #[arg(long, short = 't', default_value = "all")]
    filter: String,

    /// Drop discovered files whose path contains this substring.
    #[arg(long, short = 'e')]
    exclude: Option<String>,
}

/// # Handle Review Command (`handle_review`)
///
/// Loads configuration and delegates to `run_review`.
pub async fn handle_review(args: ReviewArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load OpsForge configuration")?;
    run_review(&args, &cfg)
}

/// The full review pipeline, separated from config loading for testability.
fn run_review(args: &ReviewArgs, cfg: &Config) -> Result<()> {
    let filter = TypeFilter::parse(&args.filter)?;

    if !args.directory.is_dir() {
        return Err(OpsForgeError::NotFound(format!(
            "target directory '{}'",
            args.directory.display()
        ))
        .into());
    }

    // --- File Discovery ---
    let records: Vec<FileRecord> = if args.files.is_empty() {
        discover::discover_tree(&args.directory, filter, args.exclude.as_deref())
    } else {
        info!("Using explicit file list ({} entries)", args.files.len());
        discover::discover_explicit(&args.files, &args.directory)
    };

    if records.is_empty() {
        warn!("No files matched; no report will be written.");
        println!("No files matched the given filters. Nothing to review.");
        return Ok(());
    }

    // --- Console Summary ---
    let counts = TypeCounts::tally(&records);
    println!("Files discovered: {}", records.len());
    println!("  terraform:  {}", counts.terraform);
    println!("  kubernetes: {}", counts.kubernetes);
    println!("  python:     {}", counts.python);
    println!("  other:      {}", counts.other);

    // --- Prompt Payload ---
    let prompt_path = args
        .prompt
        .clone()
        .unwrap_or_else(|| cfg.paths.prompts_dir.join("security-review.md"));
    let prompt_text = match ofs::read_file_to_string(&prompt_path) {
        Ok(text) => text,
        Err(_) => {
            warn!(
                "Prompt file '{}' not found; embedding a placeholder paragraph.",
                prompt_path.display()
            );
            MISSING_PROMPT_TEXT.to_string()
        }
    };

    // --- Report Assembly ---
    let view = ReportView {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        target_dir: args.directory.display().to_string(),
        file_count: records.len(),
        prompt_path: prompt_path.display().to_string(),
        type_filter: filter.to_string(),
        prompt_text,
        files: records.iter().map(FileSection::from).collect(),
    };
    let document = report::render_report(&view)?;
    ofs::write_string_to_file(&args.output, &document)?;

    println!("\nReview report written to {}", args.output.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PathsConfig;
    use std::fs;
    use tempfile::tempdir;

    fn test_config(repo_root: &std::path::Path) -> Config {
        Config {
            paths: PathsConfig {
                repo_root: repo_root.to_path_buf(),
                templates_dir: repo_root.join("templates"),
                configs_dir: repo_root.join("configs"),
                prompts_dir: repo_root.join("prompts"),
            },
        }
    }

    fn base_args(dir: &std::path::Path, output: &std::path::Path) -> ReviewArgs {
        ReviewArgs {
            directory: dir.to_path_buf(),
            files: vec![],
            prompt: None,
            output: output.to_path_buf(),
            filter: "all".into(),
            exclude: None,
        }
    }

    #[test]
    fn test_review_args_parsing() {
        let args = ReviewArgs::try_parse_from([
            "review", "-d", "infra", "-f", "a.tf,b.py", "-t", "terraform", "-e", "modules",
        ])
        .unwrap();
        assert_eq!(args.directory, PathBuf::from("infra"));
        assert_eq!(args.files, vec![PathBuf::from("a.tf"), PathBuf::from("b.py")]);
        assert_eq!(args.filter, "terraform");
        assert_eq!(args.exclude.as_deref(), Some("modules"));
        assert_eq!(args.output, PathBuf::from("review-report.md"));
    }

    #[test]
    fn test_run_review_missing_directory() {
        let base = tempdir().unwrap();
        let cfg = test_config(base.path());
        let mut args = base_args(&base.path().join("nope"), &base.path().join("out.md"));
        args.directory = base.path().join("nope");
        let result = run_review(&args, &cfg);
        assert!(result.unwrap_err().to_string().contains("Not found"));
    }

    #[test]
    fn test_run_review_unknown_filter() {
        let base = tempdir().unwrap();
        let cfg = test_config(base.path());
        let mut args = base_args(base.path(), &base.path().join("out.md"));
        args.filter = "shell".into();
        let result = run_review(&args, &cfg);
        assert!(result.unwrap_err().to_string().contains("Unknown type"));
    }

    #[test]
    fn test_run_review_zero_matches_writes_nothing() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(target.path().join("notes.md"), "no review extensions\n").unwrap();
        let cfg = test_config(base.path());
        let output = base.path().join("out.md");
        let args = base_args(target.path(), &output);

        run_review(&args, &cfg).unwrap();
        assert!(!output.exists(), "zero matches must not write a report");
    }

    #[test]
    fn test_run_review_filtered_report_sections() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(target.path().join("a.tf"), "resource \"x\" \"y\" {}\n").unwrap();
        fs::write(target.path().join("b.tf"), "module \"m\" {}\n").unwrap();
        for name in ["one.py", "two.py", "three.py"] {
            fs::write(target.path().join(name), "pass\n").unwrap();
        }
        let cfg = test_config(base.path());
        let output = base.path().join("report.md");
        let mut args = base_args(target.path(), &output);
        args.filter = "terraform".into();

        run_review(&args, &cfg).unwrap();

        let report = fs::read_to_string(&output).unwrap();
        // Exactly the two terraform files appear as sections.
        assert!(report.contains("a.tf"));
        assert!(report.contains("b.tf"));
        assert!(!report.contains("one.py"));
        assert!(report.contains("**Files reviewed:** 2"));
        // The prompts dir does not exist in this fixture.
        assert!(report.contains("No prompt file was found"));
    }

    #[test]
    fn test_run_review_embeds_prompt_verbatim() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(target.path().join("main.tf"), "\n").unwrap();
        fs::create_dir_all(base.path().join("prompts")).unwrap();
        fs::write(
            base.path().join("prompts/security-review.md"),
            "Check for wide-open security groups.\n",
        )
        .unwrap();
        let cfg = test_config(base.path());
        let output = base.path().join("report.md");
        let args = base_args(target.path(), &output);

        run_review(&args, &cfg).unwrap();

        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("Check for wide-open security groups."));
    }

    #[test]
    fn test_run_review_overwrites_previous_report() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(target.path().join("app.py"), "pass\n").unwrap();
        let cfg = test_config(base.path());
        let output = base.path().join("report.md");
        fs::write(&output, "stale content").unwrap();
        let args = base_args(target.path(), &output);

        run_review(&args, &cfg).unwrap();

        let report = fs::read_to_string(&output).unwrap();
        assert!(!report.contains("stale content"));
        assert!(report.starts_with("# Bulk Review Report"));
    }
}

//! # OpsForge Docs Command Group
//!
//! File: cli/src/commands/docs/mod.rs
//!
//! ## Overview
//!
//! This module implements `opsforge docs`, which inspects a source directory,
//! detects its project kind, and writes documentation skeletons (API,
//! architecture, README) into an output directory for a human or AI author
//! to fill in. With `-f html`, each markdown file is additionally converted
//! through pandoc when the tool is on the PATH.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Parse arguments, the doc-type set, and the output format
//! 2. Validate the source directory and derive the project name
//! 3. Detect the project kind with the shared classifier
//! 4. Render each requested skeleton (`skeleton` module) and write it
//! 5. For HTML output, convert each markdown file via pandoc, or warn and
//!    leave the markdown as the final artifact when pandoc is missing
//!
//! ## Examples
//!
//! ```bash
//! # All three skeletons for the current directory, into ./docs
//! opsforge docs
//!
//! # Only the API document for an infrastructure tree
//! opsforge docs -d infra -t api -o infra/docs
//!
//! # HTML output (requires pandoc on the PATH)
//! opsforge docs -f html
//! ```
//!
use crate::common::classify;
use crate::common::exec;
use crate::common::fs as ofs;
use crate::core::error::{OpsForgeError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Doc-type/format parsing, skeleton templates, and rendering.
mod skeleton;

use skeleton::{DocType, DocView, OutputFormat};

/// # Docs Arguments (`DocsArgs`)
///
/// Command-line arguments accepted by `opsforge docs`.
#[derive(Parser, Debug)]
pub struct DocsArgs {
    /// Source directory to document.
    #[arg(long, short = 'd', default_value = ".")]
    directory: PathBuf,

    /// Output directory for the generated skeletons.
    #[arg(long, short = 'o', default_value = "./docs")]
    output: PathBuf,

    /// Which documents to generate: api, architecture, readme, or all.
    #[arg(long, short = 't', default_value = "all")]
    doc_type: String,

    /// Output format: markdown or html (html requires pandoc).
    #[arg(long, short = 'f', default_value = "markdown")]
    format: String,

    /// Project name used in the headers; defaults to the source directory's
    /// base name.
    #[arg(long, short = 'p')]
    project: Option<String>,
}

/// # Handle Docs Command (`handle_docs`)
///
/// Stamps the current local time and delegates to `run_docs`.
pub async fn handle_docs(args: DocsArgs) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let written = run_docs(&args, &generated_at)?;
    println!("\nGenerated {} document(s):", written.len());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}

/// The full docs pipeline, separated from timestamping for testability.
/// Returns the paths of every file written, markdown and HTML alike.
fn run_docs(args: &DocsArgs, generated_at: &str) -> Result<Vec<PathBuf>> {
    let doc_types = DocType::parse_set(&args.doc_type)?;
    let format = OutputFormat::parse(&args.format)?;

    if !args.directory.is_dir() {
        return Err(OpsForgeError::NotFound(format!(
            "source directory '{}'",
            args.directory.display()
        ))
        .into());
    }

    let project_name = match &args.project {
        Some(name) => name.clone(),
        None => derive_project_name(&args.directory),
    };
    let kind = classify::detect_project_kind(&args.directory);
    info!(
        "Documenting '{}' ({}) from {}",
        project_name,
        kind,
        args.directory.display()
    );

    ofs::ensure_dir_exists(&args.output)?;

    // The API document enumerates source files; the other skeletons only
    // need the header fields.
    let files = if doc_types.contains(&DocType::Api) {
        skeleton::collect_api_files(&args.directory)
    } else {
        vec![]
    };

    let view = DocView {
        project_name,
        generated_at: generated_at.to_string(),
        project_kind: kind.to_string(),
        source_dir: args.directory.display().to_string(),
        files,
    };

    let mut written = Vec::new();
    for doc_type in &doc_types {
        let document = skeleton::render(*doc_type, &view)?;
        let path = args.output.join(doc_type.file_name());
        ofs::write_string_to_file(&path, &document)?;
        written.push(path);
    }

    if format == OutputFormat::Html {
        match exec::find_tool("pandoc") {
            Some(pandoc) => {
                let mut html_paths = Vec::new();
                for md_path in &written {
                    let html = exec::markdown_to_html(&pandoc, md_path)?;
                    html_paths.push(html);
                }
                written.extend(html_paths);
            }
            None => {
                warn!("pandoc not found on PATH; keeping markdown output only.");
            }
        }
    }

    Ok(written)
}

/// Derives the project name from the source directory's base name, falling
/// back to a generic label for root-like paths.
fn derive_project_name(directory: &std::path::Path) -> String {
    let canonical = directory.canonicalize().ok();
    canonical
        .as_deref()
        .unwrap_or(directory)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

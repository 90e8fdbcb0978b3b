//! # OpsForge Scaffold Command Group
//!
//! File: cli/src/commands/scaffold/mod.rs
//!
//! ## Overview
//!
//! This module implements `opsforge scaffold`, which creates a new
//! AI-assistant-ready project directory: it copies the matching `CLAUDE.md`
//! template payload, lays down the type-specific file skeleton, copies any
//! example configuration subtree, writes a default ignore file, and
//! initializes a git repository when the tool is available.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Parse and validate command arguments
//! 2. Load configuration (template/config/prompt payload locations)
//! 3. Resolve a `ScaffoldPlan` — pure, no side effects (`plan` module)
//! 4. Execute the plan with tracked rollback on failure (`plan` + `tracker`)
//! 5. Print a completion message with type-appropriate next steps
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold a Terraform project under /tmp
//! opsforge scaffold demo --type terraform -d /tmp
//!
//! # Use an explicit template payload instead of the type mapping
//! opsforge scaffold demo --template ./my-conventions.md -d /tmp
//!
//! # Overwrite an existing directory
//! opsforge scaffold demo --type python --force
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

/// Scaffold plan resolution and execution.
mod plan;
/// Rollback bookkeeping for created paths.
mod tracker;

pub use plan::ProjectType;

/// # Scaffold Arguments (`ScaffoldArgs`)
///
/// Command-line arguments accepted by `opsforge scaffold`.
#[derive(Parser, Debug)]
pub struct ScaffoldArgs {
    /// The name of the new project directory.
    project_name: String,

    /// Project type: terraform, kubernetes (k8s), python, or cicd (ci-cd).
    /// Required unless --template is given.
    #[arg(long = "type", short = 't')]
    project_type: Option<String>,

    /// Explicit template file to copy as the project's CLAUDE.md, checked
    /// as given and then relative to the configured repository root.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Parent directory in which to create the project.
    #[arg(long, short = 'd', default_value = ".")]
    directory: PathBuf,

    /// Proceed even if the target directory already exists.
    #[arg(long, short = 'f')]
    force: bool,
}

/// # Handle Scaffold Command (`handle_scaffold`)
///
/// Resolves the plan from arguments plus configuration, executes it, and
/// prints the completion message.
///
/// ## Arguments
/// * `args` - The parsed `ScaffoldArgs`.
///
/// ## Returns
/// * `Result<()>` - `Ok(())` on success, or an `Err` if any step fails.
pub async fn handle_scaffold(args: ScaffoldArgs) -> Result<()> {
    info!(
        "Scaffolding project '{}' (type: {:?}, template: {:?})",
        args.project_name, args.project_type, args.template
    );

    let cfg = config::load_config().context("Failed to load OpsForge configuration")?;

    // Resolve the parent directory against the current directory when given
    // as a relative path.
    let target_dir = if args.directory.is_absolute() {
        args.directory.clone()
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.directory)
    };

    let plan = plan::resolve_plan(
        args.project_type.as_deref(),
        &args.project_name,
        &target_dir,
        args.template.as_deref(),
        &cfg,
    )
    .context("Failed to resolve scaffold plan")?;

    let project_dir = plan::execute_plan(&plan, args.force).context("Scaffolding failed")?;

    print_completion_message(&project_dir, &args.project_name, plan.project_type);
    Ok(())
}

/// Prints the success message plus next steps appropriate to the project
/// type, preferring a relative path for the `cd` suggestion.
fn print_completion_message(project_dir: &Path, project_name: &str, ty: Option<ProjectType>) {
    println!("\nProject '{}' created successfully!", project_name);
    println!("   Location: {}", project_dir.display());

    println!("\nNext steps:");

    let display_path = match env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(project_dir, &cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| project_dir.display().to_string()),
        Err(_) => project_dir.display().to_string(),
    };
    println!("  1. Navigate to your project: cd {}", display_path);
    println!("  2. Review the assistant conventions: cat CLAUDE.md");

    match ty {
        Some(ProjectType::Terraform) => {
            println!("  3. Initialize providers: terraform init");
            println!("  4. Sketch your first resources in main.tf");
        }
        Some(ProjectType::Kubernetes) => {
            println!("  3. Fill in base/ manifests and kustomization.yaml");
            println!("  4. Render an overlay: kubectl kustomize overlays/dev");
        }
        Some(ProjectType::Python) => {
            println!("  3. Create a virtual environment: python -m venv .venv && source .venv/bin/activate");
            println!("  4. Install dependencies: pip install -r requirements.txt");
        }
        Some(ProjectType::Cicd) => {
            println!("  3. Add your pipeline definitions next to CLAUDE.md");
        }
        None => {}
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_args_parsing() {
        let args =
            ScaffoldArgs::try_parse_from(["scaffold", "demo", "--type", "terraform"]).unwrap();
        assert_eq!(args.project_name, "demo");
        assert_eq!(args.project_type.as_deref(), Some("terraform"));
        assert!(args.template.is_none());
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.force);

        let args_full = ScaffoldArgs::try_parse_from([
            "scaffold",
            "api",
            "--template",
            "custom.md",
            "-d",
            "/tmp/projects",
            "--force",
        ])
        .unwrap();
        assert_eq!(args_full.project_name, "api");
        assert!(args_full.project_type.is_none());
        assert_eq!(args_full.template, Some(PathBuf::from("custom.md")));
        assert_eq!(args_full.directory, PathBuf::from("/tmp/projects"));
        assert!(args_full.force);
    }

    #[test]
    fn test_scaffold_args_requires_name() {
        assert!(ScaffoldArgs::try_parse_from(["scaffold", "--type", "python"]).is_err());
    }

    #[test]
    fn test_scaffold_args_short_type_flag() {
        let args = ScaffoldArgs::try_parse_from(["scaffold", "demo", "-t", "k8s"]).unwrap();
        assert_eq!(args.project_type.as_deref(), Some("k8s"));
    }
}

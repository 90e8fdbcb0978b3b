//! # OpsForge Scaffold Planning and Execution
//!
//! File: cli/src/commands/scaffold/plan.rs
//!
//! ## Overview
//!
//! This module implements the two halves of project scaffolding:
//!
//! 1. **Planning** (`resolve_plan`): a pure computation from arguments plus
//!    configuration to a `ScaffoldPlan`. Template resolution, project-type
//!    mapping, and all validation happen here, before any filesystem write.
//!    An unknown type or missing template therefore fails with zero side
//!    effects.
//! 2. **Execution** (`execute_plan`): the ordered side effects — create the
//!    project directory, copy the template payload to `CLAUDE.md`, copy the
//!    matching example configuration subtree, create the type-specific
//!    skeleton, write a default ignore file, and best-effort `git init`.
//!    Every created path is recorded in a `CleanupTracker`; a failure rolls
//!    back exactly this invocation's additions.
//!
//! ## Architecture
//!
//! The type-to-template mapping is a fixed table with no fallback: terraform,
//! kubernetes (alias k8s), python, and cicd (alias ci-cd) map to
//! `<templates_dir>/<type>/CLAUDE.md`. Skeleton layouts are equally fixed:
//!
//! - terraform: empty `main.tf`, `variables.tf`, `outputs.tf`, `versions.tf`
//!   and a `modules/` directory
//! - kubernetes: `base/`, `overlays/dev|staging|prod/`, empty
//!   `kustomization.yaml`
//! - python: `src/<snake_name>/__init__.py`, `tests/`, empty
//!   `requirements.txt` and `requirements-dev.txt`
//! - cicd: template and ignore file only
//!
use crate::common::{exec, fs as ofs};
use crate::core::config::Config;
use crate::core::error::{OpsForgeError, Result};
use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use super::tracker::CleanupTracker;

/// The supported scaffold project types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Terraform,
    Kubernetes,
    Python,
    Cicd,
}

impl ProjectType {
    /// Parses a user-supplied type string, accepting the documented aliases.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "terraform" => Ok(ProjectType::Terraform),
            "kubernetes" | "k8s" => Ok(ProjectType::Kubernetes),
            "python" => Ok(ProjectType::Python),
            "cicd" | "ci-cd" => Ok(ProjectType::Cicd),
            other => Err(OpsForgeError::UnknownType(format!(
                "project type '{}' (expected terraform, kubernetes, python, or cicd)",
                other
            ))
            .into()),
        }
    }

    /// Template location relative to the configured templates directory.
    fn template_rel_path(&self) -> &'static str {
        match self {
            ProjectType::Terraform => "terraform/CLAUDE.md",
            ProjectType::Kubernetes => "kubernetes/CLAUDE.md",
            ProjectType::Python => "python/CLAUDE.md",
            ProjectType::Cicd => "cicd/CLAUDE.md",
        }
    }

    /// Name of the optional example configuration subtree for this type.
    fn config_dir_name(&self) -> Option<&'static str> {
        match self {
            ProjectType::Terraform => Some("terraform-project"),
            ProjectType::Kubernetes => Some("k8s-project"),
            ProjectType::Python => Some("python-project"),
            ProjectType::Cicd => None,
        }
    }
}

/// Everything a scaffold execution needs, computed up front.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub project_type: Option<ProjectType>,
    pub project_name: String,
    /// Final project directory: `<target_dir>/<project_name>`.
    pub project_dir: PathBuf,
    /// Resolved template payload to copy to `<project>/CLAUDE.md`.
    pub template_path: PathBuf,
    /// Example configuration subtree to copy in, when one exists.
    pub config_dir: Option<PathBuf>,
}

/// Resolves a `ScaffoldPlan` from arguments and configuration.
///
/// Pure with respect to the filesystem: only existence checks, no writes.
/// Either `project_type` or `explicit_template` must be supplied.
pub fn resolve_plan(
    project_type: Option<&str>,
    project_name: &str,
    target_dir: &Path,
    explicit_template: Option<&Path>,
    config: &Config,
) -> Result<ScaffoldPlan> {
    if project_name.trim().is_empty() {
        return Err(OpsForgeError::Config("project name must not be empty".into()).into());
    }

    let parsed_type = match project_type {
        Some(value) => Some(ProjectType::parse(value)?),
        None => None,
    };

    // --- Template Resolution ---
    let template_path = match explicit_template {
        // Explicit path wins: check as given (covers absolute paths and
        // paths relative to the current directory), then under repo_root.
        Some(template) => {
            if template.is_file() {
                template.to_path_buf()
            } else {
                let in_repo = config.paths.repo_root.join(template);
                if in_repo.is_file() {
                    in_repo
                } else {
                    return Err(OpsForgeError::NotFound(format!(
                        "template '{}' (checked as given and under '{}')",
                        template.display(),
                        config.paths.repo_root.display()
                    ))
                    .into());
                }
            }
        }
        None => {
            let ty = parsed_type.ok_or_else(|| {
                OpsForgeError::Config(
                    "either a project type or an explicit --template is required".into(),
                )
            })?;
            let mapped = config.paths.templates_dir.join(ty.template_rel_path());
            if !mapped.is_file() {
                return Err(OpsForgeError::NotFound(format!(
                    "template '{}' for project type",
                    mapped.display()
                ))
                .into());
            }
            mapped
        }
    };

    // --- Optional Example Configuration Subtree ---
    let config_dir = parsed_type
        .and_then(|ty| ty.config_dir_name())
        .map(|name| config.paths.configs_dir.join(name))
        .filter(|dir| dir.is_dir());

    let plan = ScaffoldPlan {
        project_type: parsed_type,
        project_name: project_name.to_string(),
        project_dir: target_dir.join(project_name),
        template_path,
        config_dir,
    };
    debug!("Resolved scaffold plan: {:?}", plan);
    Ok(plan)
}

/// Executes a plan's side effects in order, rolling back this invocation's
/// created paths on failure.
pub fn execute_plan(plan: &ScaffoldPlan, force: bool) -> Result<PathBuf> {
    // Collision handling replaces the old interactive confirmation: an
    // existing target is an error unless --force was given.
    if plan.project_dir.exists() {
        if !plan.project_dir.is_dir() {
            return Err(OpsForgeError::FileSystem(format!(
                "Target path '{}' exists but is a file",
                plan.project_dir.display()
            ))
            .into());
        }
        if !force {
            return Err(OpsForgeError::AlreadyExists {
                path: plan.project_dir.display().to_string(),
            }
            .into());
        }
        warn!(
            "Target directory '{}' already exists. Proceeding due to --force; existing files may be overwritten.",
            plan.project_dir.display()
        );
    }

    let mut tracker = CleanupTracker::new();
    match execute_steps(plan, &mut tracker) {
        Ok(()) => Ok(plan.project_dir.clone()),
        Err(e) => {
            warn!(
                "Scaffolding failed, removing {} created path(s)",
                tracker.len()
            );
            tracker.remove_created();
            Err(e)
        }
    }
}

fn execute_steps(plan: &ScaffoldPlan, tracker: &mut CleanupTracker) -> Result<()> {
    // (1) Project directory.
    if !plan.project_dir.exists() {
        ofs::ensure_dir_exists(&plan.project_dir)?;
        tracker.track(&plan.project_dir);
    }

    // (2) Template payload, byte-for-byte, overwriting any existing file.
    let claude_md = plan.project_dir.join("CLAUDE.md");
    let existed = claude_md.exists();
    fs::copy(&plan.template_path, &claude_md).with_context(|| {
        format!(
            "Failed to copy template '{}' to '{}'",
            plan.template_path.display(),
            claude_md.display()
        )
    })?;
    if !existed {
        tracker.track(&claude_md);
    }
    info!(
        "Copied template '{}' to '{}'",
        plan.template_path.display(),
        claude_md.display()
    );

    // (3) Example configuration subtree, when the repository ships one.
    if let Some(config_dir) = &plan.config_dir {
        track_config_copy_targets(config_dir, &plan.project_dir, tracker)?;
        ofs::copy_dir_recursive(config_dir, &plan.project_dir)?;
    }

    // (4) Type-specific skeleton.
    if let Some(ty) = plan.project_type {
        create_skeleton(ty, plan, tracker)?;
    }

    // (5) Default ignore file, only when none exists.
    let gitignore = plan.project_dir.join(".gitignore");
    if !gitignore.exists() {
        ofs::write_string_to_file(&gitignore, default_gitignore(plan.project_type))?;
        tracker.track(&gitignore);
    }

    // (6) Best-effort repository init; a missing or failing git is a warning.
    match exec::find_tool("git") {
        Some(git) => {
            if let Err(e) = exec::git_init(&git, &plan.project_dir) {
                warn!("git init failed, continuing without a repository: {}", e);
            }
        }
        None => warn!("git not found on PATH, skipping repository init"),
    }

    Ok(())
}

/// Records the config subtree's top-level entries that do not yet exist in
/// the project, so a later failure can remove what the recursive copy added.
fn track_config_copy_targets(
    config_dir: &Path,
    project_dir: &Path,
    tracker: &mut CleanupTracker,
) -> Result<()> {
    let entries = fs::read_dir(config_dir)
        .with_context(|| format!("Failed to read config directory {:?}", config_dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", config_dir))?;
        let target = project_dir.join(entry.file_name());
        if !target.exists() {
            tracker.track(target);
        }
    }
    Ok(())
}

/// Creates the fixed per-type file/directory skeleton. Existing files are
/// left alone so --force never clobbers user content with empty files.
fn create_skeleton(ty: ProjectType, plan: &ScaffoldPlan, tracker: &mut CleanupTracker) -> Result<()> {
    let root = &plan.project_dir;

    match ty {
        ProjectType::Terraform => {
            for file in ["main.tf", "variables.tf", "outputs.tf", "versions.tf"] {
                touch(root, file, tracker)?;
            }
            make_dir(root, "modules", tracker)?;
        }
        ProjectType::Kubernetes => {
            for dir in ["base", "overlays/dev", "overlays/staging", "overlays/prod"] {
                make_dir(root, dir, tracker)?;
            }
            touch(root, "kustomization.yaml", tracker)?;
        }
        ProjectType::Python => {
            let init_rel = format!("src/{}/__init__.py", to_snake_case(&plan.project_name));
            touch(root, &init_rel, tracker)?;
            make_dir(root, "tests", tracker)?;
            touch(root, "requirements.txt", tracker)?;
            touch(root, "requirements-dev.txt", tracker)?;
        }
        ProjectType::Cicd => {
            // No skeleton beyond the template and ignore file.
        }
    }
    Ok(())
}

/// Creates an empty skeleton file and records it when newly created.
fn touch(root: &Path, rel: &str, tracker: &mut CleanupTracker) -> Result<()> {
    let path = root.join(rel);
    if ofs::create_empty_file(&path)? {
        tracker.track(path);
    }
    Ok(())
}

/// Creates a skeleton directory and records it when newly created.
fn make_dir(root: &Path, rel: &str, tracker: &mut CleanupTracker) -> Result<()> {
    let path = root.join(rel);
    if !path.exists() {
        ofs::ensure_dir_exists(&path)?;
        tracker.track(path);
    }
    Ok(())
}

/// Converts a kebab-case or mixed-case project name to snake_case for the
/// Python package directory.
fn to_snake_case(input: &str) -> String {
    input
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Minimal default ignore file, keyed by project type.
fn default_gitignore(ty: Option<ProjectType>) -> &'static str {
    match ty {
        Some(ProjectType::Terraform) => {
            ".terraform/\n*.tfstate\n*.tfstate.backup\n.terraform.lock.hcl\ncrash.log\n"
        }
        Some(ProjectType::Python) => "__pycache__/\n*.pyc\n.venv/\n.pytest_cache/\ndist/\n",
        Some(ProjectType::Kubernetes) => "*.secret.yaml\ncharts/*.tgz\n",
        _ => ".DS_Store\n*.log\n",
    }
}

//! # OpsForge Documentation Skeletons
//!
//! File: cli/src/commands/docs/skeleton.rs
//!
//! ## Overview
//!
//! This module owns the three markdown skeletons the docs command can emit —
//! API, architecture, and README — plus the source-file enumeration that
//! feeds the API document. Every skeleton opens with the same header
//! (project name, generation timestamp, detected project kind, source
//! directory) followed by kind-specific placeholder sections.
//!
//! ## Architecture
//!
//! Rendering goes through `core::templating` (Tera) against a single
//! `DocView`. The generation timestamp is a caller-injected string, so all
//! renderers are pure and repeated runs produce byte-identical files apart
//! from that one field.
//!
//! For the API document, `collect_api_files` walks the source tree for
//! `*.py` and `*.tf` files (sorted by path so output is stable) and, for
//! Terraform files, extracts the top-level declaration lines beginning with
//! `resource `, `module `, or `data `.
//!
use crate::core::error::{OpsForgeError, Result};
use crate::core::templating;
use serde::Serialize;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// The documentation artifacts the command can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Api,
    Architecture,
    Readme,
}

impl DocType {
    /// Parses the `-t` flag into the requested set; `all` selects all three.
    pub fn parse_set(value: &str) -> Result<Vec<DocType>> {
        match value.to_lowercase().as_str() {
            "all" => Ok(vec![DocType::Api, DocType::Architecture, DocType::Readme]),
            "api" => Ok(vec![DocType::Api]),
            "architecture" => Ok(vec![DocType::Architecture]),
            "readme" => Ok(vec![DocType::Readme]),
            other => Err(OpsForgeError::UnknownType(format!(
                "doc type '{}' (expected api, architecture, readme, or all)",
                other
            ))
            .into()),
        }
    }

    /// Output file name for this artifact.
    pub fn file_name(&self) -> &'static str {
        match self {
            DocType::Api => "API.md",
            DocType::Architecture => "ARCHITECTURE.md",
            DocType::Readme => "README.md",
        }
    }
}

/// Output format for generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "markdown" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            other => Err(OpsForgeError::UnknownType(format!(
                "output format '{}' (expected markdown or html)",
                other
            ))
            .into()),
        }
    }
}

/// The shared view rendered into every skeleton. `files` only matters for
/// the API document; the other skeletons ignore it.
#[derive(Serialize, Debug)]
pub struct DocView {
    pub project_name: String,
    pub generated_at: String,
    pub project_kind: String,
    pub source_dir: String,
    pub files: Vec<ApiFileSection>,
}

/// One source file subsection in the API document.
#[derive(Serialize, Debug)]
pub struct ApiFileSection {
    pub path: String,
    /// "terraform" or "python", driving the per-file placeholder.
    pub language: String,
    /// Terraform declaration lines (`resource `/`module `/`data `).
    pub resources: Vec<String>,
}

const HEADER: &str = r#"> Project: {{ project_name }}
> Generated: {{ generated_at }}
> Detected type: {{ project_kind }}
> Source: {{ source_dir }}
"#;

const API_SKELETON_BODY: &str = r#"
# API Documentation — {{ project_name }}

## Overview

_Describe the public surface of this project._
{% for file in files %}
## `{{ file.path }}`
{% if file.language == "terraform" %}{% if file.resources %}Declared resources:
{% for line in file.resources %}- `{{ line }}`
{% endfor %}{% else %}_No resources found._
{% endif %}{% else %}_Document the public functions and classes of this module._
{% endif %}{% endfor %}
## Conventions

_Naming, versioning, and deprecation rules go here._
"#;

const ARCHITECTURE_SKELETON_BODY: &str = r#"
# Architecture — {{ project_name }}

## System Overview

_One-paragraph summary of what this system does and for whom._

## Components
{% if project_kind == "terraform" %}
- **Root module**: entry point (`main.tf`, `variables.tf`, `outputs.tf`)
- **Child modules**: reusable building blocks under `modules/`
- **State backend**: _where state lives and how it is locked_
{% elif project_kind == "kubernetes" %}
- **Base manifests**: shared resources under `base/`
- **Overlays**: per-environment variants (dev / staging / prod)
- **Cluster services**: _ingress, secrets, observability_
{% elif project_kind == "python" %}
- **Application package**: importable modules under `src/`
- **Entry points**: _CLIs, services, scheduled jobs_
- **Dependencies**: pinned in `requirements.txt`
{% elif project_kind == "nodejs" %}
- **Application package**: modules declared in `package.json`
- **Entry points**: _scripts and exported binaries_
{% else %}
- _List the major components and their responsibilities._
{% endif %}
## Data Flow

_How requests, events, or plans move through the components._

## Deployment

_Environments, promotion path, and rollback strategy._
"#;

const README_SKELETON_BODY: &str = r#"
# {{ project_name }}

_One-sentence description of the project._

## Getting Started
{% if project_kind == "terraform" %}
```bash
terraform init
terraform plan
```
{% elif project_kind == "python" %}
```bash
python -m venv .venv && source .venv/bin/activate
pip install -r requirements.txt
```
{% elif project_kind == "nodejs" %}
```bash
npm install
npm test
```
{% elif project_kind == "kubernetes" %}
```bash
kubectl kustomize overlays/dev
```
{% else %}
_Describe how to build and run the project._
{% endif %}
## Project Structure

_Outline the important directories and what lives in each._

## Contributing

_How changes are proposed, reviewed, and released._
"#;

/// Renders the requested skeleton from the view.
pub fn render(doc_type: DocType, view: &DocView) -> Result<String> {
    let body = match doc_type {
        DocType::Api => API_SKELETON_BODY,
        DocType::Architecture => ARCHITECTURE_SKELETON_BODY,
        DocType::Readme => README_SKELETON_BODY,
    };
    let template = format!("{}{}", HEADER, body);
    let context = templating::context_from(view)?;
    templating::render_skeleton(&template, &context)
}

/// Terraform top-level declaration prefixes surfaced in the API document.
const TF_DECLARATION_PREFIXES: [&str; 3] = ["resource ", "module ", "data "];

/// Walks the source tree for `*.py` / `*.tf` files, sorted by path so the
/// generated API document is stable across runs.
pub fn collect_api_files(source_dir: &Path) -> Vec<ApiFileSection> {
    let mut sections = Vec::new();
    for entry in WalkDir::new(source_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let section = match ext.as_str() {
            "py" => ApiFileSection {
                path: display_relative(path, source_dir),
                language: "python".into(),
                resources: vec![],
            },
            "tf" => ApiFileSection {
                path: display_relative(path, source_dir),
                language: "terraform".into(),
                resources: terraform_declarations(path),
            },
            _ => continue,
        };
        sections.push(section);
    }
    sections.sort_by(|a, b| a.path.cmp(&b.path));
    sections
}

/// Paths in the API document are shown relative to the source directory.
fn display_relative(path: &Path, source_dir: &Path) -> String {
    path.strip_prefix(source_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Extracts lines beginning with a Terraform declaration keyword. Unreadable
/// files yield an empty list with a warning.
fn terraform_declarations(path: &Path) -> Vec<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read '{}' for API listing: {}", path.display(), e);
            return vec![];
        }
    };
    content
        .lines()
        .filter(|line| {
            TF_DECLARATION_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
        })
        .map(|line| line.trim_end().to_string())
        .collect()
}

//! # OpsForge Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, and validates the OpsForge configuration. The
//! configuration is deliberately small: a single `paths` section naming the
//! repository root and the directories holding template, example
//! configuration, and prompt payloads. It is constructed exactly once at
//! startup and handed to every command handler — no component computes "its
//! own location" at call time.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.opsforge.toml` in current directory or ancestors
//!    (the search stops at a `.git` boundary)
//! 2. User-specific `~/.config/opsforge/config.toml`
//! 3. Default values defined in the code
//!
//! After merging, `~` is expanded in every path and relative directories are
//! resolved against `repo_root`, so downstream code only ever sees absolute
//! paths.
//!
//! ## Examples
//!
//! Loading and using configuration:
//!
//! ```rust
//! let cfg = config::load_config()?;
//!
//! let template = cfg.paths.templates_dir.join("terraform/CLAUDE.md");
//! let default_prompt = cfg.paths.prompts_dir.join("security-review.md");
//! ```
//!
use crate::core::error::{OpsForgeError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Top-level configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

/// The explicit path set every command receives.
///
/// Paths may be written with `~` or relative to `repo_root` in the TOML
/// files; `resolve_config_paths` rewrites them to absolute form during load.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the payload repository. Defaults to the current directory.
    #[serde(default = "default_repo_root")]
    pub repo_root: PathBuf,
    /// Directory holding one template subdirectory per project type.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Directory holding optional example configuration subtrees.
    #[serde(default = "default_configs_dir")]
    pub configs_dir: PathBuf,
    /// Directory holding prompt payloads (e.g. security-review.md).
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            repo_root: default_repo_root(),
            templates_dir: default_templates_dir(),
            configs_dir: default_configs_dir(),
            prompts_dir: default_prompts_dir(),
        }
    }
}

// Default path values. Relative entries resolve against repo_root later.
fn default_repo_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}
fn default_configs_dir() -> PathBuf {
    PathBuf::from("configs")
}
fn default_prompts_dir() -> PathBuf {
    PathBuf::from("prompts")
}

const PROJECT_CONFIG_FILENAME: &str = ".opsforge.toml";

/// Loads the final configuration: user file, project file, defaults, merged
/// in precedence order, with all paths expanded and validated.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged = merge_configs(user_config.unwrap_or_default(), project_config);
    resolve_config_paths(&mut merged).context("Failed to resolve paths in configuration")?;
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "OpsForge", "opsforge") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.opsforge.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks upward from the current directory looking for `.opsforge.toml`,
/// stopping at the first `.git` directory so one repository's settings never
/// leak into another.
fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Ok(Some(project_config));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project settings win over user settings; user settings win over defaults.
/// A field counts as "set" in the project file when it differs from the coded
/// default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.paths.repo_root = if project_cfg.paths.repo_root != default_repo_root() {
        project_cfg.paths.repo_root
    } else {
        user.paths.repo_root
    };
    merged.paths.templates_dir = if project_cfg.paths.templates_dir != default_templates_dir() {
        project_cfg.paths.templates_dir
    } else {
        user.paths.templates_dir
    };
    merged.paths.configs_dir = if project_cfg.paths.configs_dir != default_configs_dir() {
        project_cfg.paths.configs_dir
    } else {
        user.paths.configs_dir
    };
    merged.paths.prompts_dir = if project_cfg.paths.prompts_dir != default_prompts_dir() {
        project_cfg.paths.prompts_dir
    } else {
        user.paths.prompts_dir
    };
    merged
}

/// Expands `~`, absolutizes `repo_root` against the current directory, and
/// resolves the three payload directories against `repo_root` when they are
/// given as relative paths.
fn resolve_config_paths(config: &mut Config) -> Result<()> {
    debug!("Resolving paths in configuration...");
    let expand = |p: &Path| -> PathBuf {
        PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
    };

    let mut repo_root = expand(&config.paths.repo_root);
    if repo_root.is_relative() {
        repo_root = env::current_dir()
            .context("Failed to get current directory")?
            .join(repo_root);
    }
    config.paths.repo_root = repo_root;

    for dir in [
        &mut config.paths.templates_dir,
        &mut config.paths.configs_dir,
        &mut config.paths.prompts_dir,
    ] {
        let expanded = expand(dir);
        *dir = if expanded.is_relative() {
            config.paths.repo_root.join(expanded)
        } else {
            expanded
        };
    }
    debug!("Resolved repo root: {}", config.paths.repo_root.display());
    Ok(())
}

/// Sanity checks on the resolved paths. A missing templates directory is only
/// a warning — `scaffold --template` works without it and the other commands
/// never touch it.
fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    for (label, dir) in [
        ("templates", &config.paths.templates_dir),
        ("configs", &config.paths.configs_dir),
        ("prompts", &config.paths.prompts_dir),
    ] {
        if !dir.exists() {
            warn!(
                "Configured {} directory '{}' does not exist.",
                label,
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(OpsForgeError::Config(format!(
                "Configured {} path '{}' exists but is not a directory.",
                label,
                dir.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [paths]
            repo_root = "/srv/opsforge"
            templates_dir = "tpl"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.paths.repo_root, PathBuf::from("/srv/opsforge"));
        assert_eq!(config.paths.templates_dir, PathBuf::from("tpl"));
        // Unset fields fall back to the coded defaults.
        assert_eq!(config.paths.configs_dir, default_configs_dir());
        assert_eq!(config.paths.prompts_dir, default_prompts_dir());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let toml_content = r#"
            [paths]
            templates_dir = "tpl"
            payload_dir = "nope"
        "#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_resolve_paths_relative_to_repo_root() {
        let mut config = Config {
            paths: PathsConfig {
                repo_root: PathBuf::from("/srv/opsforge"),
                templates_dir: PathBuf::from("tpl"),
                configs_dir: PathBuf::from("/etc/opsforge/configs"),
                prompts_dir: PathBuf::from("prompts"),
            },
        };

        resolve_config_paths(&mut config).unwrap();

        assert_eq!(config.paths.repo_root, PathBuf::from("/srv/opsforge"));
        assert_eq!(
            config.paths.templates_dir,
            PathBuf::from("/srv/opsforge/tpl")
        );
        // Absolute directories are left alone.
        assert_eq!(
            config.paths.configs_dir,
            PathBuf::from("/etc/opsforge/configs")
        );
        assert_eq!(
            config.paths.prompts_dir,
            PathBuf::from("/srv/opsforge/prompts")
        );
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config {
            paths: PathsConfig {
                repo_root: PathBuf::from("~/opsforge"),
                ..Default::default()
            },
        };

        resolve_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(config.paths.repo_root, home_dir.join("opsforge"));
        assert!(config.paths.templates_dir.is_absolute());
    }

    #[test]
    fn test_merge_project_wins() {
        let user = Config {
            paths: PathsConfig {
                repo_root: PathBuf::from("/home/user/payloads"),
                prompts_dir: PathBuf::from("/home/user/prompts"),
                ..Default::default()
            },
        };
        let project = Config {
            paths: PathsConfig {
                repo_root: PathBuf::from("/srv/project"),
                ..Default::default()
            },
        };

        let merged = merge_configs(user, Some(project));

        // Project set repo_root, so it wins; prompts_dir stays user-level.
        assert_eq!(merged.paths.repo_root, PathBuf::from("/srv/project"));
        assert_eq!(merged.paths.prompts_dir, PathBuf::from("/home/user/prompts"));
    }

    #[test]
    fn test_validate_config_payload_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            paths: PathsConfig {
                repo_root: temp_dir.path().to_path_buf(),
                templates_dir: file_path,
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_missing_dirs_only_warn() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            paths: PathsConfig {
                repo_root: temp_dir.path().to_path_buf(),
                templates_dir: temp_dir.path().join("missing-templates"),
                configs_dir: temp_dir.path().join("missing-configs"),
                prompts_dir: temp_dir.path().join("missing-prompts"),
            },
        };
        assert!(validate_config(&config).is_ok());
    }
}

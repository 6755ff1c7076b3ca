//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstree/bstree.toml`
//! 3. Local config: `<dir>/.bstree.toml`
//! 4. Environment variables: `BSTREE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{SettingsError, SettingsResult};
use crate::traverse::TraversalMode;

/// Driver settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Order used by the traverse command
    pub traversal: TraversalMode,
    /// Render the tree after every insert/remove
    pub show_tree: bool,
    /// Prompt printed before reading a menu option
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            traversal: TraversalMode::PreOrder,
            show_tree: false,
            prompt: "bstree>".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal: Option<TraversalMode>,
    pub show_tree: Option<bool>,
    pub prompt: Option<String>,
}

/// Get the XDG config directory for bstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bstree.toml")
}

fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            traversal: overlay.traversal.unwrap_or(self.traversal),
            show_tree: overlay.show_tree.unwrap_or(self.show_tree),
            prompt: overlay
                .prompt
                .clone()
                .unwrap_or_else(|| self.prompt.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bstree.toml`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply BSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BSTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;

        if let Ok(val) = config.get_string("traversal") {
            settings.traversal = TraversalMode::from_str(&val, true)
                .map_err(|e| SettingsError::Invalid(format!("BSTREE_TRAVERSAL: {e}")))?;
        }
        if let Ok(val) = config.get_bool("show_tree") {
            settings.show_tree = val;
        }
        if let Ok(val) = config.get_string("prompt") {
            settings.prompt = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SettingsError::Invalid(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bstree/bstree.toml
#   Local:  <dir>/.bstree.toml   (select with -C <dir>)
#   Env:    BSTREE_* environment variables

# Traversal order: "pre-order", "in-order", "post-order" or "shallow"
# traversal = "pre-order"

# Render the tree after each insert/remove
# show_tree = false

# Session prompt
# prompt = "bstree>"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_pre_order_and_no_rendering() {
        let settings = Settings::default();
        assert_eq!(settings.traversal, TraversalMode::PreOrder);
        assert!(!settings.show_tree);
        assert_eq!(settings.prompt, "bstree>");
    }

    #[test]
    fn given_partial_overlay_when_merge_then_only_specified_fields_change() {
        let overlay = RawSettings {
            traversal: Some(TraversalMode::InOrder),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.traversal, TraversalMode::InOrder);
        assert_eq!(merged.prompt, "bstree>");
    }

    #[test]
    fn given_settings_when_to_toml_then_uses_kebab_case_modes() {
        let settings = Settings {
            traversal: TraversalMode::PostOrder,
            ..Default::default()
        };
        let toml = settings.to_toml().unwrap();
        assert!(toml.contains(r#"traversal = "post-order""#));
    }

    #[test]
    fn given_template_when_uncommented_then_parses() {
        let uncommented: String = Settings::template()
            .lines()
            .filter(|l| l.starts_with("# ") && l.contains(" = "))
            .map(|l| l.trim_start_matches("# "))
            .collect::<Vec<_>>()
            .join("\n");
        let raw: RawSettings = toml::from_str(&uncommented).unwrap();
        assert_eq!(raw.traversal, Some(TraversalMode::PreOrder));
        assert_eq!(raw.show_tree, Some(false));
    }
}

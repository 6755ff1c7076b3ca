//! Integration tests for Settings layered loading.
//!
//! These run without a global config (temp directories only), so they cover
//! local config merging over defaults and env var overrides.

use std::fs;

use tempfile::TempDir;

use bstree::config::{local_config_path, Settings};
use bstree::errors::SettingsError;
use bstree::TraversalMode;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
traversal = "in-order"
show_tree = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.traversal, TraversalMode::InOrder);
    assert!(settings.show_tree);
}

#[test]
fn given_directory_without_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(Some(dir.path())).expect("load settings");
    assert_eq!(settings.traversal, TraversalMode::PreOrder);
    assert!(!settings.show_tree);
}

#[test]
fn given_malformed_local_config_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "traversal = \"sideways\"\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains(".bstree.toml"));
}

#[test]
fn given_prompt_env_var_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "prompt = \"from-file>\"\n").unwrap();
    std::env::set_var("BSTREE_PROMPT", "from-env>");

    let settings = Settings::load(Some(dir.path()));
    std::env::remove_var("BSTREE_PROMPT");

    assert_eq!(settings.expect("load settings").prompt, "from-env>");
}

#[test]
fn given_settings_when_round_tripped_through_toml_then_equal() {
    let settings = Settings {
        traversal: TraversalMode::Shallow,
        show_tree: true,
        prompt: "> ".into(),
    };
    let parsed: Settings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
    assert_eq!(parsed, settings);
}

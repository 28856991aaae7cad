use super::*;
use crate::kernel::services::ports::config::{ConfigLayers, ConfigScope};
use serde_json::json;

#[test]
fn test_defaults_when_unset() {
    let layers = ConfigLayers::default();
    let store = ConfigStore::new(&layers);
    assert_eq!(store.alignment(), Alignment::Left);
    assert_eq!(store.path_style(), PathStyle::Absolute);
}

#[test]
fn test_reads_configured_values() {
    let mut layers = ConfigLayers::default();
    layers.set(ConfigScope::User, STATUS_BAR_ALIGNMENT_KEY, json!("none"));
    layers.set(ConfigScope::Workspace, PATH_STYLE_KEY, json!("relative"));

    let store = ConfigStore::new(&layers);
    assert_eq!(store.alignment(), Alignment::None);
    assert_eq!(store.path_style(), PathStyle::Relative);
}

#[test]
fn test_reflects_latest_value_on_next_read() {
    let mut layers = ConfigLayers::default();
    layers.set(ConfigScope::Workspace, PATH_STYLE_KEY, json!("relative"));
    assert_eq!(ConfigStore::new(&layers).path_style(), PathStyle::Relative);

    layers.set(ConfigScope::Workspace, PATH_STYLE_KEY, json!("absolute"));
    assert_eq!(ConfigStore::new(&layers).path_style(), PathStyle::Absolute);
}

#[test]
fn test_unknown_value_falls_back_to_default() {
    let mut layers = ConfigLayers::default();
    layers.set(ConfigScope::Workspace, STATUS_BAR_ALIGNMENT_KEY, json!("center"));
    layers.set(ConfigScope::Workspace, PATH_STYLE_KEY, json!(42));

    let store = ConfigStore::new(&layers);
    assert_eq!(store.alignment(), Alignment::Left);
    assert_eq!(store.path_style(), PathStyle::Absolute);
}

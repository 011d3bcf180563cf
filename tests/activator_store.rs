//! Observable behavior of the activation store through the public API:
//! durability across instances, reset semantics, and cache consistency.

use modkit::core::activator::{FileActivator, ModuleStatusMap};
use modkit::core::config::Config;
use modkit::core::error::ModkitError;
use std::fs;
use tempfile::TempDir;

fn config_in(dir: &TempDir, cache_enabled: bool) -> Config {
    let mut config = Config::default();
    config.root = dir.path().to_path_buf();
    config.cache.enabled = cache_enabled;
    config
}

#[test]
fn never_set_names_read_disabled() {
    let dir = TempDir::new().unwrap();
    let activator = FileActivator::from_config(&config_in(&dir, false)).unwrap();
    for name in ["Blog", "Billing", "Nope"] {
        assert!(!activator.is_enabled(name));
    }
}

#[test]
fn set_enabled_survives_a_fresh_instance() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    {
        let mut activator = FileActivator::from_config(&config).unwrap();
        activator.set_enabled("Blog", true).unwrap();
        activator.set_enabled("Billing", false).unwrap();
    }
    let fresh = FileActivator::from_config(&config).unwrap();
    assert!(fresh.is_enabled("Blog"));
    assert!(!fresh.is_enabled("Billing"));
}

#[test]
fn remove_then_fresh_instance_sees_disabled() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    {
        let mut activator = FileActivator::from_config(&config).unwrap();
        activator.set_enabled("Blog", true).unwrap();
        activator.remove("Blog").unwrap();
        assert!(!activator.is_enabled("Blog"));
    }
    let fresh = FileActivator::from_config(&config).unwrap();
    assert!(!fresh.is_enabled("Blog"));
}

#[test]
fn reset_then_fresh_instance_sees_everything_disabled() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    let statuses_path = config.statuses_file_path();
    {
        let mut activator = FileActivator::from_config(&config).unwrap();
        activator.set_enabled("Blog", true).unwrap();
        activator.set_enabled("Billing", true).unwrap();
        activator.reset().unwrap();
    }
    assert!(!statuses_path.exists());
    let fresh = FileActivator::from_config(&config).unwrap();
    assert!(!fresh.is_enabled("Blog"));
    assert!(!fresh.is_enabled("Billing"));
}

#[test]
fn store_path_accessor_matches_config() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    let activator = FileActivator::from_config(&config).unwrap();
    assert_eq!(activator.statuses_file_path(), config.statuses_file_path());
}

#[test]
fn cached_store_observes_its_own_writes() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir, true);
    config.activator.cache_lifetime = 2;

    let mut activator = FileActivator::from_config(&config).unwrap();
    activator.set_enabled("Blog", true).unwrap();
    assert!(activator.is_enabled("Blog"));
    activator.remove("Blog").unwrap();
    assert!(!activator.is_enabled("Blog"));
}

#[test]
fn full_scenario_walkthrough() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    let statuses_path = config.statuses_file_path();
    fs::write(&statuses_path, r#"{"A": true}"#).unwrap();

    let mut activator = FileActivator::from_config(&config).unwrap();
    assert!(activator.is_enabled("A"));
    assert!(!activator.is_enabled("B"));

    activator.set_enabled("B", true).unwrap();
    let map: ModuleStatusMap =
        serde_json::from_str(&fs::read_to_string(&statuses_path).unwrap()).unwrap();
    assert_eq!(map.get("A"), Some(&true));
    assert_eq!(map.get("B"), Some(&true));

    activator.remove("A").unwrap();
    let map: ModuleStatusMap =
        serde_json::from_str(&fs::read_to_string(&statuses_path).unwrap()).unwrap();
    assert!(!map.contains_key("A"));
    assert_eq!(map.get("B"), Some(&true));

    activator.reset().unwrap();
    assert!(!statuses_path.exists());
    assert!(!activator.is_enabled("B"));
}

#[test]
fn malformed_durable_file_fails_load_not_reads() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, false);
    fs::write(config.statuses_file_path(), "not json at all").unwrap();
    assert!(matches!(
        FileActivator::from_config(&config),
        Err(ModkitError::MalformedStatuses { .. })
    ));
}

//! Integration tests for the settings file store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pretty_assertions::assert_eq;
use tasklog_store::{Settings, SettingsStore};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));
    let settings = store.get_settings().unwrap();
    assert_eq!(settings.task_create_default.title, "No title");
    assert!(!settings.auto_focus_description);
}

#[test]
fn update_persists_and_notifies() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join("cfg").join("settings.json"));

    let notified = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&notified);
    let _handle = store.watch(move |s: &Settings| flag.store(s.auto_focus_description, Ordering::SeqCst));

    let updated = store
        .update(|s| {
            s.auto_focus_description = true;
            s.task_create_default.title = "Sprint".into();
        })
        .unwrap();

    assert!(notified.load(Ordering::SeqCst));
    let reloaded = store.get_settings().unwrap();
    assert_eq!(reloaded, updated);
    assert_eq!(reloaded.task_create_default.title, "Sprint");
}

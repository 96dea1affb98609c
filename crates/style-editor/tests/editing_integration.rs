//! End-to-end editing through the command bridge with the built-in engines.

use std::path::PathBuf;
use std::sync::Arc;

use style_editor::application::ports::{StateStore, ENABLE_EXPERT_KEY, ENABLE_FORMAT_KEY, FORMAT_STYLE_KEY};
use style_editor::infrastructure::storage::config::EditorConfig;
use style_editor::infrastructure::storage::local_store::TomlStateStore;
use style_editor::infrastructure::storage::memory::MemoryStateStore;
use style_editor::infrastructure::ui_bridge::{self as bridge, AppState};

fn scratch_state_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("style-editor-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("state.toml")
}

async fn started(store: Arc<dyn StateStore>) -> Arc<AppState> {
    let state = AppState::with_builtin_engines(EditorConfig::default(), store);
    state.start().await;
    state
}

#[tokio::test]
async fn test_style_edit_reformats_output_and_survives_restart() {
    // Arrange
    let path = scratch_state_file("restart");
    let store: Arc<dyn StateStore> = Arc::new(TomlStateStore::open(&path).unwrap());
    store.set(ENABLE_FORMAT_KEY, "true").unwrap();
    store.set(ENABLE_EXPERT_KEY, "true").unwrap();
    let state = started(Arc::clone(&store)).await;
    let output = state.subscribe_output();

    // Act
    bridge::demangle(Arc::clone(&state), "_ZN3foo3barEPKc".into()).await;
    let edit = bridge::rename_enum(Arc::clone(&state), "PointerAlignment".into(), "Right".into()).await;

    // Assert: the edit re-ran the pipeline on the last input.
    assert!(edit.success, "{:?}", edit.error);
    assert_eq!(*output.borrow(), vec!["foo::bar(char const *)".to_string()]);

    // A new process sees the same style.
    let reopened: Arc<dyn StateStore> = Arc::new(TomlStateStore::open(&path).unwrap());
    let restarted = started(reopened).await;
    let lines = bridge::demangle(restarted, "_ZN3foo3barEPKc".into()).await.data.unwrap().lines;
    assert_eq!(lines, vec!["foo::bar(char const *)"]);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_unreadable_stored_style_falls_back_to_none_preset() {
    // Arrange
    let store = Arc::new(MemoryStateStore::with_entries([
        (FORMAT_STYLE_KEY, "IndentWidth: [unterminated"),
        (ENABLE_FORMAT_KEY, "true"),
    ]));
    let state = started(Arc::clone(&store) as Arc<dyn StateStore>).await;

    // Act
    let exported = bridge::export_style(Arc::clone(&state)).await.data.unwrap();
    let lines = bridge::demangle(state, "_ZN3foo3barEPKc".into()).await.data.unwrap().lines;

    // Assert: None disables formatting, so output is the raw demangled text.
    assert!(exported.contains("DisableFormat: true"));
    assert_eq!(lines, vec!["foo::bar(char const*)"]);
    assert_ne!(store.get(FORMAT_STYLE_KEY).unwrap().as_deref(), Some("IndentWidth: [unterminated"));
}

#[tokio::test]
async fn test_preset_load_then_export_import_round_trip() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::with_entries([(ENABLE_EXPERT_KEY, "true")]));
    let state = started(store).await;

    assert!(bridge::load_preset(Arc::clone(&state), "webkit".into()).await.success);
    let webkit = bridge::export_style(Arc::clone(&state)).await.data.unwrap();
    assert!(bridge::load_preset(Arc::clone(&state), "GNU".into()).await.success);
    let imported = bridge::import_style(Arc::clone(&state), webkit.clone()).await;

    assert!(imported.success, "{:?}", imported.error);
    assert_eq!(bridge::export_style(state).await.data.unwrap(), webkit);
}

#[tokio::test]
async fn test_import_of_bad_text_keeps_current_style() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::with_entries([(ENABLE_EXPERT_KEY, "true")]));
    let state = started(store).await;
    let before = bridge::export_style(Arc::clone(&state)).await.data.unwrap();

    let result = bridge::import_style(Arc::clone(&state), "NoSuchOption: 1\n".into()).await;

    assert!(!result.success);
    assert_eq!(bridge::export_style(state).await.data.unwrap(), before);
}

#[tokio::test]
async fn test_nested_edit_through_list_of_structs() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::with_entries([(ENABLE_EXPERT_KEY, "true")]));
    let state = started(store).await;

    let entry = bridge::set_value(Arc::clone(&state), "IncludeCategories[1].Priority".into(), "7".into())
        .await
        .data
        .unwrap();
    let exported = bridge::export_style(state).await.data.unwrap();

    assert_eq!(entry.depth, 3);
    assert_eq!(entry.value.as_deref(), Some("7"));
    assert!(exported.contains("Priority: 7"));
}

//! Integration tests for the persistence facade.
//!
//! Each test opens a fresh application directory under the system temp
//! directory and drives both stores through the public API only.

use std::path::PathBuf;

use persist_core::{
    AppPersistence, CachePolicy, ConfigOptions, Document, PathOutcome, PersistenceOptions,
    StoreError, ValueKind, VersionPolicy,
};
use serde_json::{json, Value};
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scratch_base() -> PathBuf {
    std::env::temp_dir().join(format!("persist_it_{}", Uuid::new_v4()))
}

fn doc(v: Value) -> Document {
    match v {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

fn options(base: &PathBuf, versioning: VersionPolicy) -> PersistenceOptions {
    PersistenceOptions {
        base_dir: Some(base.clone()),
        config: ConfigOptions {
            versioning,
            ..ConfigOptions::default()
        },
    }
}

fn read_json(path: PathBuf) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("file must exist")).expect("valid JSON")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_first_open_lays_out_app_directory() {
    let base = scratch_base();

    let app = AppPersistence::open(
        "editor",
        doc(json!({"config_version": 2, "x": 1})),
        options(&base, VersionPolicy::KeepExisting),
    )
    .expect("open must succeed");

    assert_eq!(app.root(), base.join(".editor"));
    assert_eq!(read_json(app.root().join("config.json")), json!({"config_version": 2, "x": 1}));
    assert!(!app.root().join("state.json").exists(), "state file is created lazily");
    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_version_bump_replaces_config_only_when_requested() {
    // Arrange
    let base = scratch_base();
    let v2 = doc(json!({"config_version": 2, "x": 1}));
    let v3 = doc(json!({"config_version": 3, "x": 10, "y": 20}));
    AppPersistence::open("editor", v2, options(&base, VersionPolicy::KeepExisting)).unwrap();

    // Act / Assert: keep-existing leaves the v2 file alone
    let kept = AppPersistence::open("editor", v3.clone(), options(&base, VersionPolicy::KeepExisting)).unwrap();
    assert_eq!(read_json(kept.config.file_path().to_path_buf()), json!({"config_version": 2, "x": 1}));
    drop(kept);

    // Act / Assert: reset-on-mismatch replaces it entirely
    let mut reset = AppPersistence::open("editor", v3, options(&base, VersionPolicy::ResetOnMismatch)).unwrap();
    assert_eq!(
        read_json(reset.config.file_path().to_path_buf()),
        json!({"config_version": 3, "x": 10, "y": 20})
    );
    assert_eq!(reset.config.config_version().unwrap(), Some(3));

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_config_and_state_are_independent_files() {
    let base = scratch_base();
    let mut app = AppPersistence::open("editor", Document::new(), options(&base, VersionPolicy::KeepExisting)).unwrap();

    app.config.set_value("font", "mono").unwrap();
    app.state.set_value("font", "sans").unwrap();

    assert_eq!(app.config.get_value("font", ValueKind::String).unwrap(), Some(json!("mono")));
    assert_eq!(app.state.get_value("font", None).unwrap(), Some(json!("sans")));
    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_path_writes_report_blocked_descent() {
    let base = scratch_base();
    let mut app = AppPersistence::open(
        "editor",
        doc(json!({"a": 5, "window": {}})),
        options(&base, VersionPolicy::KeepExisting),
    )
    .unwrap();

    // Lenient mode: ignore the outcome.
    let outcome = app.config.set_by_path("a/b", &1).unwrap();
    assert!(matches!(outcome, PathOutcome::Blocked(_)));
    assert_eq!(read_json(app.config.file_path().to_path_buf()), json!({"a": 5, "window": {}}));

    // Strict mode: turn the block into an error.
    let strict = app.config.set_by_path("a/b", &1).and_then(PathOutcome::require);
    assert!(matches!(strict, Err(StoreError::Structural(_))));

    // A reachable path is written.
    app.config.set_by_path("/window/width/", &640).unwrap().require().unwrap();
    assert_eq!(app.config.get_by_path("window/width", ValueKind::Float).unwrap(), Some(json!(640.0)));

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_uncached_config_reflects_external_edits() {
    let base = scratch_base();
    let opts = PersistenceOptions {
        base_dir: Some(base.clone()),
        config: ConfigOptions {
            cache: CachePolicy::AlwaysReread,
            versioning: VersionPolicy::KeepExisting,
        },
    };
    let mut app = AppPersistence::open("editor", doc(json!({"n": 1})), opts).unwrap();

    std::fs::write(app.config.file_path(), r#"{"n": 2}"#).unwrap();

    assert_eq!(app.config.get_value("n", ValueKind::Integer).unwrap(), Some(json!(2)));
    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_state_defaults_and_geometry_survive_reopen() {
    // Arrange
    let base = scratch_base();
    let blob = vec![0x01, 0xD9, 0xD0, 0xCB, 0x00, 0x03, 0xFF];
    {
        let app = AppPersistence::open("editor", Document::new(), options(&base, VersionPolicy::KeepExisting)).unwrap();
        app.state.get_value("recent", Some(json!(["a.md"]))).unwrap();
        app.state.save_geometry("main", &blob).unwrap();
    }

    // Act
    let app = AppPersistence::open("editor", Document::new(), options(&base, VersionPolicy::KeepExisting)).unwrap();

    // Assert
    assert_eq!(app.state.get_value("recent", None).unwrap(), Some(json!(["a.md"])));
    assert_eq!(app.state.get_geometry("main").unwrap(), Some(blob));
    assert_eq!(app.state.get_geometry("settings-dialog").unwrap(), None);
    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn test_corrupt_config_surfaces_parse_error() {
    let base = scratch_base();
    let root = base.join(".editor");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("config.json"), "{\"x\": ").unwrap();

    let result = AppPersistence::open("editor", Document::new(), options(&base, VersionPolicy::KeepExisting));

    assert!(matches!(result, Err(StoreError::Parse { .. })));
    std::fs::remove_dir_all(&base).ok();
}

//! Session Persistence Integration Tests
//!
//! Save a desktop to a shared in-memory store, then restore it into a fresh
//! engine the way a page reload would.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, TimeZone, Utc};
use tracing_subscriber::EnvFilter;
use wds_desktop::{
    BlobStore, DesktopEngine, ManualClock, MemoryBlobStore, Rect, SessionSnapshot, ShellConfig,
    StorageError, WindowSpec,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config() -> ShellConfig {
    ShellConfig {
        dock_width: 0.0,
        topbar_height: 0.0,
        ..Default::default()
    }
}

fn engine(store: &MemoryBlobStore, clock: &ManualClock) -> DesktopEngine {
    DesktopEngine::new(config())
        .with_store(store.clone())
        .with_clock(clock.clone())
}

fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap())
}

/// Test that a fresh snapshot reproduces ids, bounds, workspaces and current workspace.
#[test]
fn test_session_round_trip() {
    init_tracing();
    let store = MemoryBlobStore::new();
    let clock = start_clock();

    let mut before = engine(&store, &clock);
    let calc = before.open_window(WindowSpec::new("calc", "Calculator"));
    let ws2 = before.create_workspace(Some("Work"));
    let notes = before.open_window(
        WindowSpec::new("notes", "Notes").with_bounds(Rect::new(300.0, 200.0, 500.0, 400.0)),
    );
    before.move_window_to_workspace(notes, ws2);
    before.switch_workspace(ws2);
    assert!(before.save_session());

    clock.advance(Duration::hours(2));
    let mut after = engine(&store, &clock);
    assert!(after.load_session());

    assert_eq!(after.current_workspace(), ws2);
    assert_eq!(after.workspaces.count(), 2);
    assert_eq!(after.workspaces.get(ws2).unwrap().name, "Work");
    for id in [calc, notes] {
        let saved = before.windows.get(id).unwrap();
        let restored = after.windows.get(id).unwrap();
        assert_eq!(restored.bounds, saved.bounds);
        assert_eq!(restored.workspace, saved.workspace);
        assert_eq!(restored.flags.visible, saved.flags.visible);
    }
    assert_eq!(after.windows.focused().map(|w| w.id), Some(notes));
}

/// Test that paint order survives a reload.
#[test]
fn test_restore_preserves_stacking_order() {
    init_tracing();
    let store = MemoryBlobStore::new();
    let clock = start_clock();

    let mut before = engine(&store, &clock);
    let a = before.open_window(WindowSpec::new("a", "A"));
    let b = before.open_window(WindowSpec::new("b", "B"));
    let c = before.open_window(WindowSpec::new("c", "C"));
    before.focus_window(a);
    before.shutdown();

    let mut after = engine(&store, &clock);
    after.load_session();

    let order: Vec<_> = after.frames().iter().map(|f| f.id).collect();
    assert_eq!(order, vec![b, c, a]);
}

/// Test that a snapshot older than a day is ignored on startup.
#[test]
fn test_stale_session_is_discarded() {
    init_tracing();
    let store = MemoryBlobStore::new();
    let clock = start_clock();

    let mut before = engine(&store, &clock);
    before.open_window(WindowSpec::new("calc", "Calculator"));
    before.create_workspace(None);
    before.save_session();

    clock.advance(Duration::hours(25));
    let mut after = engine(&store, &clock);
    assert!(!after.load_session());

    assert!(after.windows.is_empty());
    assert_eq!(after.workspaces.count(), 1);
    assert_eq!(after.current_workspace(), 1);
}

/// Test that exactly 24 hours counts as stale.
#[test]
fn test_staleness_boundary_is_inclusive() {
    let store = MemoryBlobStore::new();
    let clock = start_clock();

    let mut before = engine(&store, &clock);
    before.open_window(WindowSpec::new("calc", "Calculator"));
    let snapshot = before.snapshot();

    clock.advance(Duration::hours(24));
    let mut after = engine(&store, &clock);
    assert!(!after.restore_session(&snapshot));

    clock.set(snapshot.timestamp + Duration::hours(24) - Duration::seconds(1));
    assert!(after.restore_session(&snapshot));
    assert_eq!(after.windows.count(), 1);
}

/// Test that corrupt or empty blobs leave the default desktop in place.
#[test]
fn test_malformed_blob_treated_as_absent() {
    init_tracing();
    let store = MemoryBlobStore::new();
    let clock = start_clock();
    let key = config().session_key;

    store.write_blob(&key, "{not json").unwrap();
    let mut engine_a = engine(&store, &clock);
    assert!(!engine_a.load_session());
    assert!(engine_a.windows.is_empty());

    let no_workspaces = format!(
        r#"{{"windows":[],"workspaces":[],"currentWorkspace":1,"timestamp":"{}"}}"#,
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap().to_rfc3339()
    );
    store.write_blob(&key, &no_workspaces).unwrap();
    assert!(!engine_a.load_session());
    assert_eq!(engine_a.workspaces.count(), 1);
}

/// Test that a missing blob is not an error.
#[test]
fn test_no_stored_session() {
    let store = MemoryBlobStore::new();
    let clock = start_clock();
    let mut engine = engine(&store, &clock);

    assert!(!engine.load_session());
    assert!(engine.windows.is_empty());
}

/// Test that the autosave schedule writes every interval and on shutdown.
#[test]
fn test_autosave_schedule() {
    let store = MemoryBlobStore::new();
    let clock = start_clock();
    let mut engine = engine(&store, &clock);
    let key = engine.config().session_key.clone();
    engine.open_window(WindowSpec::new("calc", "Calculator"));

    clock.advance(Duration::seconds(10));
    assert!(!engine.tick());
    assert!(!store.contains(&key));

    clock.advance(Duration::seconds(20));
    assert!(engine.tick());
    let first = SessionSnapshot::read_from(&store, &key).unwrap().unwrap();
    assert_eq!(first.windows.len(), 1);

    engine.open_window(WindowSpec::new("notes", "Notes"));
    engine.shutdown();
    let last = SessionSnapshot::read_from(&store, &key).unwrap().unwrap();
    assert_eq!(last.windows.len(), 2);
}

/// Store whose every call fails, counting write attempts
#[derive(Clone, Default)]
struct UnavailableStore {
    writes: Rc<Cell<u32>>,
}

impl BlobStore for UnavailableStore {
    fn write_blob(&self, _key: &str, _json: &str) -> Result<(), StorageError> {
        self.writes.set(self.writes.get() + 1);
        Err(StorageError::unavailable("localStorage is disabled"))
    }

    fn read_blob(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::unavailable("localStorage is disabled"))
    }

    fn remove_blob(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::unavailable("localStorage is disabled"))
    }
}

/// Test that storage failures are swallowed and autosave does not retry early.
#[test]
fn test_storage_failure_is_swallowed() {
    init_tracing();
    let store = UnavailableStore::default();
    let clock = start_clock();
    let mut engine = DesktopEngine::new(config())
        .with_store(store.clone())
        .with_clock(clock.clone());
    let calc = engine.open_window(WindowSpec::new("calc", "Calculator"));

    assert!(!engine.save_session());
    assert_eq!(store.writes.get(), 1);

    clock.advance(Duration::seconds(30));
    assert!(engine.tick());
    assert_eq!(store.writes.get(), 2);

    // A failed write still counts as this interval's attempt
    assert!(!engine.tick());
    clock.advance(Duration::seconds(29));
    assert!(!engine.tick());
    assert_eq!(store.writes.get(), 2);

    clock.advance(Duration::seconds(1));
    assert!(engine.tick());
    assert_eq!(store.writes.get(), 3);

    assert!(!engine.load_session());
    assert_eq!(engine.windows.count(), 1);
    assert_eq!(engine.windows.focused().map(|w| w.id), Some(calc));
    assert_eq!(engine.workspaces.count(), 1);

    engine.shutdown();
    assert_eq!(store.writes.get(), 4);
}

/// Test that an unreadable store on startup leaves the default desktop.
#[test]
fn test_unreadable_store_starts_fresh() {
    let clock = start_clock();
    let mut engine = DesktopEngine::new(config())
        .with_store(UnavailableStore::default())
        .with_clock(clock);

    assert!(!engine.load_session());
    assert!(engine.windows.is_empty());
    assert_eq!(engine.workspaces.count(), 1);
    assert_eq!(engine.current_workspace(), 1);
}

/// Test that stale and malformed snapshots are removed once rejected.
#[test]
fn test_rejected_snapshots_are_removed() {
    let store = MemoryBlobStore::new();
    let clock = start_clock();
    let key = config().session_key;

    let mut before = engine(&store, &clock);
    before.open_window(WindowSpec::new("calc", "Calculator"));
    before.save_session();

    clock.advance(Duration::hours(25));
    let mut after = engine(&store, &clock);
    assert!(!after.load_session());
    assert!(!store.contains(&key));

    store.write_blob(&key, "{not json").unwrap();
    assert!(!after.load_session());
    assert!(!store.contains(&key));
}

//! Tests for the Redb storage backend.
//!
//! This module runs the standard storage engine compliance tests against
//! the Redb backend, plus Redb-specific tests.


use std::sync::Arc;

use vert_storage::backends::{RedbConfig, RedbEngine};
use vert_storage::{Cursor, StorageEngine, StorageResult, Transaction};

use engine_tests::{run_test_suite, TestHarness};

/// Test harness for the Redb in-memory backend.
struct RedbHarness;

impl TestHarness for RedbHarness {
    type Engine = RedbEngine;

    fn create_engine() -> StorageResult<Self::Engine> {
        RedbEngine::in_memory()
    }
}

/// Test harness for a shared engine behind an `Arc`.
struct SharedRedbHarness;

impl TestHarness for SharedRedbHarness {
    type Engine = Arc<RedbEngine>;

    fn create_engine() -> StorageResult<Self::Engine> {
        RedbEngine::in_memory().map(Arc::new)
    }
}

#[test]
fn test_redb_compliance() {
    run_test_suite::<RedbHarness>();
}

#[test]
fn test_shared_redb_compliance() {
    run_test_suite::<SharedRedbHarness>();
}

#[test]
fn test_file_backed_data_survives_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("graph.redb");

    {
        let engine = RedbEngine::open(&path).expect("failed to open");
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("graph", b"v1", b"[[],{},[],[]]").expect("failed to put");
        tx.commit().expect("failed to commit");
        engine.flush().expect("failed to flush");
    }

    let engine = RedbEngine::open_with_config(&path, RedbConfig::new().create_if_missing(false))
        .expect("failed to reopen");
    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get("graph", b"v1").expect("failed to get"), Some(b"[[],{},[],[]]".to_vec()));
}

#[test]
fn test_cursor_crosses_batch_boundaries() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");

    // More entries than one cursor batch holds
    let count = 2_500u32;
    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        for i in 0..count {
            tx.put("big", &i.to_be_bytes(), b"").expect("failed to put");
        }
        tx.commit().expect("failed to commit");
    }

    let tx = engine.begin_read().expect("failed to begin read");
    let mut cursor = tx.cursor("big").expect("failed to create cursor");
    let mut seen = 0u32;
    while let Some((k, _)) = cursor.next().expect("failed to next") {
        assert_eq!(k, seen.to_be_bytes().to_vec());
        seen += 1;
    }
    assert_eq!(seen, count);
}

#[test]
fn test_keys_containing_separator_bytes() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("graph", b"a\0b", b"1").expect("failed to put");
        tx.put("graph", b"a", b"2").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get("graph", b"a\0b").expect("failed to get"), Some(b"1".to_vec()));

    let mut cursor = tx.cursor("graph").expect("failed to create cursor");
    assert_eq!(cursor.next().expect("next").map(|(k, _)| k), Some(b"a".to_vec()));
    assert_eq!(cursor.next().expect("next").map(|(k, _)| k), Some(b"a\0b".to_vec()));
    assert_eq!(cursor.next().expect("next"), None);
}

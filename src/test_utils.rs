//! Shared test utilities for Synergy.
//!
//! This module provides common setup functions used across test modules.

#![cfg(test)]

use crate::platform::{FixedClock, Host, RecordingNotifier};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

/// Create a temporary on-disk store with migrations applied.
///
/// Returns a tuple of (SqliteStore, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_store() -> (SqliteStore, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let store = SqliteStore::open(&db_path).expect("Failed to open test store");
    (store, dir)
}

pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid test datetime")
}

/// Host with a fixed clock, a recording notifier and no-op feedback.
pub fn test_host(now: NaiveDateTime) -> (Host, Arc<FixedClock>, Arc<RecordingNotifier>) {
    let clock = Arc::new(FixedClock::new(now));
    let notifier = Arc::new(RecordingNotifier::granted());
    let host = Host::quiet(
        Arc::<FixedClock>::clone(&clock),
        Arc::<RecordingNotifier>::clone(&notifier),
    );
    (host, clock, notifier)
}

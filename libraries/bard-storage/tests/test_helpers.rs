//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations and constraints.

#![allow(dead_code)]

use bard_core::{codec, AssetClass, AssetEntry};
use bard_storage::LocalAssetStore;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub store: LocalAssetStore,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = bard_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        // Run migrations
        bard_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            store: LocalAssetStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    /// Get the store reference
    pub fn store(&self) -> &LocalAssetStore {
        &self.store
    }
}

/// Test fixture: an audio entry with recognizable bytes
pub fn audio_entry(name: &str, marker: u8) -> AssetEntry {
    AssetEntry::from_bytes(AssetClass::Audio, name, &[b'I', b'D', b'3', marker, 0, 255])
}

/// Test fixture: a data entry holding a JSON document
pub fn data_entry(name: &str, json: &serde_json::Value) -> AssetEntry {
    AssetEntry::new(name, codec::encode_text(&json.to_string()), "application/json")
}

//! Flat string-keyed storage shared by every component.
//!
//! Values are text: JSON for structured entries, plain decimal for numbers.

pub mod legacy;
mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::AppError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

/// Key-value storage with get/set/remove by string key.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Set a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Load a JSON value. Malformed entries are treated as absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring malformed value under '{key}': {e}");
            Ok(None)
        }
    }
}

pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Load a plain-text value such as an integer. Unparseable entries are treated as absent.
pub fn load_parsed<T, S>(store: &S, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    S: KeyValueStore + ?Sized,
{
    Ok(store
        .get(key)?
        .and_then(|raw| match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparseable value under '{key}': {raw:?}");
                None
            }
        }))
}

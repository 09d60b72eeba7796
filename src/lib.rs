pub mod account;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod planner;
pub mod platform;
pub mod progress;
pub mod reminder;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod validation;

use crate::account::AccountStore;
use crate::config::{Config, DB_FILE_NAME};
use crate::error::AppError;
use crate::platform::Host;
use crate::progress::ProgressTracker;
use crate::reminder::ReminderScheduler;
use crate::store::{KeyValueStore, SqliteStore};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Error type for Synergy initialization failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Could not determine project directories")]
    NoProjectDirs,
    #[error("Could not create data directory: {0}")]
    DataDirCreation(std::io::Error),
    #[error("Failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),
    #[error("Failed to upgrade stored data: {0}")]
    Upgrade(AppError),
}

/// Lock a mutex, recovering from poisoning if necessary
pub(crate) fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context} mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

pub fn get_db_path(config: &Config) -> Result<PathBuf, InitError> {
    let path = match &config.db_path {
        Some(path) => path.clone(),
        None => {
            let proj_dirs = Config::project_dirs().ok_or(InitError::NoProjectDirs)?;
            proj_dirs.data_dir().join(DB_FILE_NAME)
        }
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(InitError::DataDirCreation)?;
    }
    Ok(path)
}

/// Open the store, apply migrations and upgrade legacy keys.
pub fn open_store(config: &Config) -> Result<Arc<SqliteStore>, InitError> {
    let db_path = get_db_path(config)?;
    let store = SqliteStore::open(&db_path).map_err(|e| {
        error!("Failed to open database at {}: {e}", db_path.display());
        InitError::DatabaseOpen(e)
    })?;
    crate::store::legacy::upgrade(&store).map_err(InitError::Upgrade)?;
    info!("Using data at {}", db_path.display());
    Ok(Arc::new(store))
}

/// The tracker's components wired to one store and one host.
pub struct Synergy {
    pub accounts: AccountStore,
    pub progress: ProgressTracker,
    pub reminders: ReminderScheduler,
}

impl Synergy {
    pub fn new(store: Arc<dyn KeyValueStore>, host: Host) -> Self {
        Self {
            accounts: AccountStore::new(Arc::clone(&store)),
            progress: ProgressTracker::new(Arc::clone(&store), host.clone()),
            reminders: ReminderScheduler::new(store, host),
        }
    }

    pub fn open(config: &Config, host: Host) -> Result<Self, InitError> {
        let store = open_store(config)?;
        Ok(Self::new(store, host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::keys;
    use crate::test_utils::{datetime, test_host};
    use tempfile::tempdir;

    #[test]
    fn test_get_db_path_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("synergy.db");
        let resolved = get_db_path(&Config::with_db_path(&path)).unwrap();
        assert_eq!(resolved, path);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_open_upgrades_legacy_keys() {
        let dir = tempdir().unwrap();
        let config = Config::with_db_path(dir.path().join("synergy.db"));
        {
            let store = open_store(&config).unwrap();
            store.set(keys::STREAK, "3").unwrap();
        }

        let store = open_store(&config).unwrap();
        let raw = store.get(keys::STREAK).unwrap().unwrap();
        assert!(raw.starts_with('{'));
    }

    #[test]
    fn test_open_keeps_data_written_by_older_builds() {
        let dir = tempdir().unwrap();
        let config = Config::with_db_path(dir.path().join("synergy.db"));
        {
            let store = open_store(&config).unwrap();
            store
                .set(keys::USERS, r#"[{"name":"Ana","email":"ana@example.com","password":"pw","phone":""}]"#)
                .unwrap();
            store
                .set(keys::STREAK, r#"{"count":9,"lastDate":"Wed Apr 10 2024"}"#)
                .unwrap();
        }

        let (host, _, _) = test_host(datetime(2024, 4, 11, 18, 0));
        let app = Synergy::open(&config, host).unwrap();

        assert!(app.accounts.login("ana@example.com", "pw").is_ok());
        assert_eq!(app.progress.streak().unwrap().count, 9);
        let (streak, _) = app.progress.mark_day_complete().unwrap();
        assert_eq!(streak.count, 10);
    }

    #[test]
    fn test_components_share_store() {
        let dir = tempdir().unwrap();
        let config = Config::with_db_path(dir.path().join("synergy.db"));
        let (host, _, _) = test_host(datetime(2024, 5, 2, 9, 0));
        let app = Synergy::open(&config, host.clone()).unwrap();

        app.accounts.register("Ana", "ana@example.com", "pw", "").unwrap();
        app.progress.mark_day_complete().unwrap();
        app.progress.set_daily("70").unwrap();
        drop(app);

        let app = Synergy::open(&config, host).unwrap();
        assert!(app.accounts.current_session().unwrap().is_some());
        assert_eq!(app.progress.streak().unwrap().count, 1);
        assert_eq!(app.progress.daily().unwrap().unwrap().value(), 70);
    }
}

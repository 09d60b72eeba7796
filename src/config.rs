use directories::ProjectDirs;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "synergy.db";

/// Where Synergy keeps its data.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Explicit database file; the platform data directory is used when unset.
    pub db_path: Option<PathBuf>,
}

impl Config {
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
        }
    }

    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "synergy", "Synergy")
    }
}

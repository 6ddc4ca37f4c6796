//! Library configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How ids are assigned to new categories and bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Random v4 UUIDs
    #[default]
    Uuid,
    /// Millisecond timestamps, compatible with ids written by older versions
    Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Id assignment for new records
    #[serde(default)]
    pub id_scheme: IdScheme,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("bookshelf.db"),
            id_scheme: IdScheme::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        Self::data_dir_under(data_local_dir())
    }

    fn data_dir_under(base: Option<PathBuf>) -> PathBuf {
        base.map(|d| d.join("bookshelf"))
            .unwrap_or_else(|| PathBuf::from(".bookshelf"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

/// `LOCALAPPDATA` on Windows, otherwise `XDG_DATA_HOME` or `~/.local/share`.
fn data_local_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return std::env::var_os("LOCALAPPDATA").map(PathBuf::from);
    }

    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
}

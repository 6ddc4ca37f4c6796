//! Bookshelf Core
//!
//! Categories and bookmarks kept as two whole collections in a key-value
//! store. Each mutation reads a collection, changes it and writes it back;
//! mutations on the same collection are serialized per library handle.

mod config;
mod error;
mod ids;
mod library;
mod model;

pub use config::{Config, IdScheme};
pub use error::CoreError;
pub use ids::{IdGenerator, TimestampIdGenerator, UuidGenerator};
pub use library::{BookmarkLibrary, CategoryFilter, BOOKMARKS_KEY, CATEGORIES_KEY};
pub use model::{Bookmark, Category, NewBookmark, NewCategory};

pub use bookshelf_storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

//! Bookshelf Storage Layer
//!
//! Key-value persistence for the bookmark collections.
//! Every slot holds one whole JSON value and every write overwrites it.

mod accessor;
mod error;
mod memory;
mod migrations;
mod sqlite;

pub use accessor::{get_storage, set_storage, KeyValueStore};
pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type Result<T> = std::result::Result<T, StorageError>;

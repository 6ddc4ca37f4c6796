//! Bookmark library
//!
//! Typed operations over the `categories` and `bookmarks` slots.
//! Every mutation is a read-modify-write of the whole collection, held under
//! that collection's lock so concurrent callers cannot lose each other's
//! changes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use bookshelf_storage::{get_storage, set_storage, KeyValueStore, MemoryStore, SqliteStore};

use crate::config::{Config, IdScheme};
use crate::error::CoreError;
use crate::ids::{IdGenerator, TimestampIdGenerator, UuidGenerator};
use crate::model::{require, Bookmark, Category, NewBookmark, NewCategory};
use crate::Result;

/// Slot holding the ordered category collection
pub const CATEGORIES_KEY: &str = "categories";
/// Slot holding the ordered bookmark collection
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Which bookmarks a dashboard view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    fn admits(&self, bookmark: &Bookmark) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => &bookmark.category_id == id,
        }
    }
}

pub struct BookmarkLibrary {
    /// Backing key-value store
    store: Arc<dyn KeyValueStore>,
    /// Id assignment for new records
    ids: Arc<dyn IdGenerator>,
    /// Serializes read-modify-write cycles on the categories slot
    categories_lock: Arc<Mutex<()>>,
    /// Serializes read-modify-write cycles on the bookmarks slot
    bookmarks_lock: Arc<Mutex<()>>,
}

impl BookmarkLibrary {
    pub fn new(store: Arc<dyn KeyValueStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            categories_lock: Arc::new(Mutex::new(())),
            bookmarks_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Arc::new(UuidGenerator))
    }

    /// Library over a fresh volatile store
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Open the durable store described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = SqliteStore::open(&config.database_path)?;
        let ids: Arc<dyn IdGenerator> = match config.id_scheme {
            IdScheme::Uuid => Arc::new(UuidGenerator),
            IdScheme::Timestamp => Arc::new(TimestampIdGenerator::new()),
        };

        tracing::info!(
            database_path = %config.database_path.display(),
            id_scheme = ?config.id_scheme,
            "Opened bookmark library"
        );

        Ok(Self::new(Arc::new(store), ids))
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(get_storage(self.store.as_ref(), key, Vec::new()).await?)
    }

    async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        Ok(set_storage(self.store.as_ref(), key, items).await?)
    }

    /// All categories in insertion order
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.load(CATEGORIES_KEY).await
    }

    pub async fn category(&self, id: &str) -> Result<Category> {
        self.categories()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Append a new category and return it with its assigned id
    pub async fn add_category(&self, draft: NewCategory) -> Result<Category> {
        draft.validate()?;

        let _guard = self.categories_lock.lock().await;
        let mut categories = self.categories().await?;
        let category = draft.into_category(self.ids.generate_id());
        categories.push(category.clone());
        self.save(CATEGORIES_KEY, &categories).await?;

        tracing::info!(
            category_id = %category.id,
            category_name = %category.name,
            "Added category"
        );

        Ok(category)
    }

    /// Remove a category by id. Bookmarks filed under it are left in place.
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let _guard = self.categories_lock.lock().await;
        let mut categories = self.categories().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);

        if categories.len() == before {
            tracing::debug!(category_id = %id, "Category not present, nothing to delete");
            return Ok(());
        }

        self.save(CATEGORIES_KEY, &categories).await?;
        tracing::info!(category_id = %id, "Deleted category");

        Ok(())
    }

    /// All bookmarks in insertion order
    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.load(BOOKMARKS_KEY).await
    }

    pub async fn bookmark(&self, id: &str) -> Result<Bookmark> {
        self.bookmarks()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Append a new bookmark and return it with its assigned id.
    ///
    /// `category_id` is stored as given; it is not checked against the
    /// category collection.
    pub async fn add_bookmark(&self, draft: NewBookmark) -> Result<Bookmark> {
        draft.validate()?;

        let _guard = self.bookmarks_lock.lock().await;
        let mut bookmarks = self.bookmarks().await?;
        let bookmark = draft.into_bookmark(self.ids.generate_id());
        bookmarks.push(bookmark.clone());
        self.save(BOOKMARKS_KEY, &bookmarks).await?;

        tracing::info!(
            bookmark_id = %bookmark.id,
            category_id = %bookmark.category_id,
            url = %bookmark.url,
            "Added bookmark"
        );

        Ok(bookmark)
    }

    pub async fn delete_bookmark(&self, id: &str) -> Result<()> {
        let _guard = self.bookmarks_lock.lock().await;
        let mut bookmarks = self.bookmarks().await?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);

        if bookmarks.len() == before {
            tracing::debug!(bookmark_id = %id, "Bookmark not present, nothing to delete");
            return Ok(());
        }

        self.save(BOOKMARKS_KEY, &bookmarks).await?;
        tracing::info!(bookmark_id = %id, "Deleted bookmark");

        Ok(())
    }

    /// Create a category and file a bookmark under it in one call.
    ///
    /// The category name is trimmed. Both records are validated before
    /// anything is written.
    pub async fn add_bookmark_to_new_category(
        &self,
        category_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<(Category, Bookmark)> {
        let category_name: String = category_name.into();
        let draft = NewCategory::new(category_name.trim());
        let title = title.into();
        let url = url.into();

        draft.validate()?;
        require("title", &title)?;
        require("url", &url)?;

        let category = self.add_category(draft).await?;
        let bookmark = self
            .add_bookmark(NewBookmark::new(title, url, category.id.clone()))
            .await?;

        Ok((category, bookmark))
    }

    pub async fn bookmarks_in(&self, filter: &CategoryFilter) -> Result<Vec<Bookmark>> {
        Ok(self
            .bookmarks()
            .await?
            .into_iter()
            .filter(|b| filter.admits(b))
            .collect())
    }

    /// Bookmarks within `filter` whose title or url contains `query`,
    /// ignoring case. A blank query matches everything in the filter.
    pub async fn search_bookmarks(
        &self,
        query: &str,
        filter: &CategoryFilter,
    ) -> Result<Vec<Bookmark>> {
        let needle = query.trim().to_lowercase();

        Ok(self
            .bookmarks_in(filter)
            .await?
            .into_iter()
            .filter(|b| needle.is_empty() || b.matches(&needle))
            .collect())
    }

    /// Bookmarks whose category no longer exists
    pub async fn orphaned_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let known: HashSet<String> = self
            .categories()
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        Ok(self
            .bookmarks()
            .await?
            .into_iter()
            .filter(|b| !known.contains(&b.category_id))
            .collect())
    }
}

impl Clone for BookmarkLibrary {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            categories_lock: Arc::clone(&self.categories_lock),
            bookmarks_lock: Arc::clone(&self.bookmarks_lock),
        }
    }
}

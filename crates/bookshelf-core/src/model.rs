//! Category and bookmark records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Assigned at creation, never changes
    pub id: String,
    pub name: String,
    /// Fields this crate does not model, kept so rewrites preserve them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Assigned at creation, never changes
    pub id: String,
    pub title: String,
    pub url: String,
    /// May point at a category that has since been deleted
    pub category_id: String,
    /// Fields this crate does not model, kept so rewrites preserve them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bookmark {
    /// Host part of the url, as shown on a dashboard card.
    pub fn hostname(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    /// Case-insensitive match of `needle` (already lowercased) against title or url.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

/// Fields supplied by the caller when creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)
    }

    pub(crate) fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            extra: Map::new(),
        }
    }
}

/// Fields supplied by the caller when creating a bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub category_id: String,
}

impl NewBookmark {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            category_id: category_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("url", &self.url)?;
        require("categoryId", &self.category_id)
    }

    pub(crate) fn into_bookmark(self, id: String) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            category_id: self.category_id,
            extra: Map::new(),
        }
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation { field });
    }
    Ok(())
}

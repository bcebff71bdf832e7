//! Catalog loading: categories plus the entries filed under them.

use std::fs;
use std::path::{Path, PathBuf};

use arbor::{CategoryId, CategoryNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{CategoryRow, CategoryStore, StoreError};

/// Format of an entry's timestamp in the entry list.
pub const TIME_FORMAT: &str = "%F %R";

/// Errors from reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid category tree: {0}")]
    Tree(#[from] StoreError),
    #[error("catalog has no categories")]
    Empty,
}

/// One archived resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub uri: String,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    pub time_add: DateTime<Utc>,
}

impl Entry {
    pub fn is_in(&self, category: CategoryId) -> bool {
        self.categories.contains(&category)
    }

    pub fn added(&self) -> String {
        self.time_add.format(TIME_FORMAT).to_string()
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    categories: RawCategories,
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategories {
    Tree(CategoryNode),
    Rows(Vec<CategoryRow>),
}

/// Categories and entries loaded at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub categories: CategoryStore,
    pub entries: Vec<Entry>,
}

impl Catalog {
    /// Read and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        log::info!(
            "loaded {} categories and {} entries from {}",
            catalog.categories.len(),
            catalog.entries.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog. `categories` is either a nested tree or a list of
    /// rows linked by `parent`.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(text)?;
        let categories = match raw.categories {
            RawCategories::Tree(root) => CategoryStore::from_tree(&root)?,
            RawCategories::Rows(rows) if rows.is_empty() => return Err(CatalogError::Empty),
            RawCategories::Rows(rows) => CategoryStore::from_rows(&rows)?,
        };

        for entry in &raw.entries {
            for id in entry.categories.iter().filter(|id| !categories.contains(**id)) {
                log::warn!("entry {} refers to unknown category {id}", entry.id);
            }
        }

        Ok(Self {
            categories,
            entries: raw.entries,
        })
    }

    /// A small built-in catalog, used when no catalog file exists.
    pub fn sample() -> Result<Self, CatalogError> {
        let categories = CategoryStore::from_tree(&CategoryNode::branch(
            0,
            "root",
            vec![
                CategoryNode::branch(
                    1,
                    "aaa",
                    vec![CategoryNode::leaf(2, "bbb"), CategoryNode::leaf(3, "ccc")],
                ),
                CategoryNode::leaf(4, "ddd"),
            ],
        ))?;

        let entry = |id: i64, title: &str, uri: &str, category: i64, secs: i64| Entry {
            id,
            title: title.to_string(),
            uri: uri.to_string(),
            categories: vec![CategoryId(category)],
            time_add: DateTime::from_timestamp(secs, 0).unwrap_or_default(),
        };
        let entries = vec![
            entry(1, "The Rust Programming Language", "https://doc.rust-lang.org/book/", 2, 1_709_285_400),
            entry(2, "Serde", "https://serde.rs/", 2, 1_709_402_700),
            entry(3, "crossterm", "https://docs.rs/crossterm", 3, 1_709_500_000),
            entry(4, "chrono", "https://docs.rs/chrono", 4, 1_709_600_000),
        ];

        Ok(Self {
            categories,
            entries,
        })
    }

    /// Entries filed directly under `category`, in catalog order.
    pub fn entries_in(&self, category: CategoryId) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.is_in(category))
    }
}

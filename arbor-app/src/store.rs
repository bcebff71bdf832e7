//! In-memory category store.
//!
//! Categories live in a flat arena with parent/child links so new ones can be
//! appended anywhere. The tree view consumes a [`CategoryNode`] snapshot
//! built by [`CategoryStore::to_tree`].

use std::collections::{HashMap, HashSet};

use arbor::{CategoryId, CategoryNode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building or editing the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate category id {0}")]
    DuplicateId(CategoryId),
    #[error("unknown parent category {0}")]
    UnknownParent(CategoryId),
    #[error("category {0} is its own ancestor")]
    Cycle(CategoryId),
    #[error("no root category")]
    MissingRoot,
    #[error("more than one root category: {0} and {1}")]
    MultipleRoots(CategoryId, CategoryId),
    #[error("no category ids left above the largest in use")]
    IdsExhausted,
}

/// A category as one flat row, linked to its parent by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryId>,
}

#[derive(Debug, Clone)]
struct Slot {
    id: CategoryId,
    name: String,
    parent: Option<CategoryId>,
    children: Vec<CategoryId>,
}

/// Arena of categories with exactly one root.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    slots: Vec<Slot>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryStore {
    /// Create a store holding only a root.
    pub fn new(root: CategoryId, name: impl Into<String>) -> Self {
        Self {
            slots: vec![Slot {
                id: root,
                name: name.into(),
                parent: None,
                children: Vec::new(),
            }],
            index: HashMap::from([(root, 0)]),
        }
    }

    /// Build a store from a nested tree, rejecting repeated ids.
    pub fn from_tree(root: &CategoryNode) -> Result<Self, StoreError> {
        let mut store = Self::new(root.id, root.name.clone());
        let mut pending: Vec<(CategoryId, &CategoryNode)> =
            root.children.iter().rev().map(|c| (root.id, c)).collect();

        // Depth-first, keeping sibling order.
        while let Some((parent, node)) = pending.pop() {
            store.insert(parent, node.id, node.name.clone())?;
            pending.extend(node.children.iter().rev().map(|c| (node.id, c)));
        }
        Ok(store)
    }

    /// Build a store from flat rows in any order.
    ///
    /// Exactly one row must have no parent.
    pub fn from_rows(rows: &[CategoryRow]) -> Result<Self, StoreError> {
        let mut roots = rows.iter().filter(|r| r.parent.is_none());
        let root = roots.next().ok_or(StoreError::MissingRoot)?;
        if let Some(other) = roots.next() {
            return Err(StoreError::MultipleRoots(root.id, other.id));
        }

        let mut store = Self::new(root.id, root.name.clone());
        let mut pending: Vec<&CategoryRow> = rows.iter().filter(|r| r.parent.is_some()).collect();

        // Each pass inserts every row whose parent is already placed.
        loop {
            let before = pending.len();
            let mut rest = Vec::new();
            for row in pending {
                match row.parent {
                    Some(parent) if store.contains(parent) => {
                        store.insert(parent, row.id, row.name.clone())?
                    }
                    _ => rest.push(row),
                }
            }
            pending = rest;
            if pending.is_empty() {
                return Ok(store);
            }
            if pending.len() == before {
                break;
            }
        }

        // Nothing left can be placed: either a parent is missing entirely or
        // the remaining rows only reach each other.
        let ids: HashSet<CategoryId> = pending.iter().map(|r| r.id).collect();
        let missing = pending
            .iter()
            .filter_map(|r| r.parent)
            .find(|parent| !ids.contains(parent));
        if let Some(parent) = missing {
            return Err(StoreError::UnknownParent(parent));
        }
        Err(StoreError::Cycle(pending[0].id))
    }

    /// Insert a category with a known id as the last child of `parent`.
    pub fn insert(
        &mut self,
        parent: CategoryId,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<(), StoreError> {
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        let Some(&parent_idx) = self.index.get(&parent) else {
            return Err(StoreError::UnknownParent(parent));
        };

        self.slots[parent_idx].children.push(id);
        self.index.insert(id, self.slots.len());
        self.slots.push(Slot {
            id,
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
        });
        Ok(())
    }

    /// Append a category under `parent` with the next free id.
    pub fn add(
        &mut self,
        parent: CategoryId,
        name: impl Into<String>,
    ) -> Result<CategoryId, StoreError> {
        let id = self.next_id()?;
        self.insert(parent, id, name)?;
        Ok(id)
    }

    /// One past the largest id in use.
    pub fn next_id(&self) -> Result<CategoryId, StoreError> {
        let max = self.slots.iter().map(|s| s.id.0).max().unwrap_or(0);
        max.checked_add(1).map(CategoryId).ok_or(StoreError::IdsExhausted)
    }

    pub fn root_id(&self) -> CategoryId {
        self.slots[0].id
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.slot(id).map(|s| s.name.as_str())
    }

    pub fn parent(&self, id: CategoryId) -> Option<CategoryId> {
        self.slot(id)?.parent
    }

    /// Child ids in insertion order. Empty for unknown ids.
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.slot(id).map(|s| s.children.as_slice()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a store has at least its root.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot the store as a nested tree.
    pub fn to_tree(&self) -> CategoryNode {
        self.node(0)
    }

    fn node(&self, idx: usize) -> CategoryNode {
        let slot = &self.slots[idx];
        CategoryNode {
            id: slot.id,
            name: slot.name.clone(),
            children: slot
                .children
                .iter()
                .filter_map(|id| self.index.get(id))
                .map(|&child| self.node(child))
                .collect(),
        }
    }

    fn slot(&self, id: CategoryId) -> Option<&Slot> {
        self.index.get(&id).map(|&idx| &self.slots[idx])
    }
}

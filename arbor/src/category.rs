//! Category tree model.
//!
//! The tree is owned by whoever loads it; components only read it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a category, unique across one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One named node and its ordered children. No children means leaf.
///
/// Deserializes from the flat form `{"id", "name", "children"}` and from the
/// wrapped form `{"data": {"id", "name"}, "children"}`. Serializes flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode")]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Wrapped {
        data: RawData,
        #[serde(default)]
        children: Option<Vec<CategoryNode>>,
    },
    Flat {
        #[serde(alias = "key")]
        id: CategoryId,
        name: String,
        #[serde(default)]
        children: Option<Vec<CategoryNode>>,
    },
}

#[derive(Deserialize)]
struct RawData {
    id: CategoryId,
    name: String,
}

impl From<RawNode> for CategoryNode {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Wrapped { data, children } => Self {
                id: data.id,
                name: data.name,
                children: children.unwrap_or_default(),
            },
            RawNode::Flat { id, name, children } => Self {
                id,
                name,
                children: children.unwrap_or_default(),
            },
        }
    }
}

impl CategoryNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn branch(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        children: Vec<CategoryNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a node by id anywhere in this subtree.
    pub fn find(&self, id: CategoryId) -> Option<&CategoryNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.find(id).is_some()
    }

    /// Ids of the nodes from this node down to `id`, inclusive.
    pub fn path_to(&self, id: CategoryId) -> Option<Vec<CategoryId>> {
        if self.id == id {
            return Some(vec![self.id]);
        }
        self.children.iter().find_map(|child| {
            child.path_to(id).map(|mut path| {
                path.insert(0, self.id);
                path
            })
        })
    }

    /// Pre-order traversal with depth (this node is depth 0).
    pub fn walk(&self) -> Vec<(usize, &CategoryNode)> {
        let mut out = Vec::new();
        self.walk_into(0, &mut out);
        out
    }

    fn walk_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a CategoryNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.walk_into(depth + 1, out);
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::node_count).sum::<usize>()
    }
}

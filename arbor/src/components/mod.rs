//! Category tree components.
//!
//! [`TreeView`] owns the canonical selection and one root [`TreeItem`]. Each
//! item owns its fold state and a [`FoldToggle`], and mounts one child item
//! per child node while expanded. Collapsing an item drops its mounted
//! children, so their fold state starts over when it is expanded again.

mod fold;
mod item;
mod view;

use std::sync::Arc;

use crate::category::CategoryId;

pub use fold::FoldToggle;
pub use item::{ItemProps, RenderScope, SELECTED_CLASS, TreeItem};
pub use view::TreeView;

/// Select callback threaded down to every item.
pub type SelectFn = Arc<dyn Fn(CategoryId) + Send + Sync>;

/// Reads the live selection. Items call it on every render instead of
/// holding a copy.
pub type SelectionAccessor = Arc<dyn Fn() -> Option<CategoryId> + Send + Sync>;

/// Element id of one part of a rendered item.
pub fn element_id(tree_id: &str, part: &str, id: CategoryId) -> String {
    format!("{tree_id}-{part}-{id}")
}

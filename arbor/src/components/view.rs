//! Tree view - the coordinator that owns the selection for one tree.
//!
//! # Example
//!
//! ```
//! use arbor::{CategoryId, CategoryNode, TreeView};
//! use arbor_dom::Event;
//!
//! let data = CategoryNode::branch(0, "root", vec![CategoryNode::leaf(1, "child")]);
//! let mut view = TreeView::new(Some(CategoryId(0))).id("categories");
//! view.render(&data);
//!
//! let label = view.label_id(CategoryId(1));
//! view.dispatch(&Event::click(label));
//! view.render(&data);
//!
//! assert_eq!(view.selection(), Some(CategoryId(1)));
//! assert!(view.item(CategoryId(1)).unwrap().is_selected());
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use arbor_dom::{Element, Event};

use super::{ItemProps, RenderScope, SelectFn, SelectionAccessor, TreeItem, element_id};
use crate::category::{CategoryId, CategoryNode};
use crate::handler::HandlerRegistry;
use crate::state::State;

const DEFAULT_INDENT: u16 = 2;

/// Root of one rendered category tree.
///
/// Owns the canonical selection. Items never store it; they read it through
/// an accessor on every render and change it only through the select
/// callback, which also notifies the [`on_select`](Self::on_select)
/// listener. The selected id is not checked against the tree: an unknown id
/// leaves every item unselected.
pub struct TreeView {
    id: String,
    indent: u16,
    root_folded: Option<bool>,
    selection: State<Option<CategoryId>>,
    on_select: Option<SelectFn>,
    registry: HandlerRegistry,
    root: Option<TreeItem>,
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TreeView {
    /// Create a view with an initial selection.
    pub fn new(selection: Option<CategoryId>) -> Self {
        Self {
            id: "tree".to_string(),
            indent: DEFAULT_INDENT,
            root_folded: None,
            selection: State::new(selection),
            on_select: None,
            registry: HandlerRegistry::new(),
            root: None,
        }
    }

    /// Set the tree id, used as the prefix of every element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set indentation per depth level, in cells.
    pub fn indent(mut self, cells: u16) -> Self {
        self.indent = cells;
        self
    }

    /// Mount the root item folded (or explicitly expanded).
    pub fn with_root_folded(mut self, folded: bool) -> Self {
        self.root_folded = Some(folded);
        self
    }

    /// Listen for label clicks. Called after the selection is updated.
    pub fn on_select(mut self, f: impl Fn(CategoryId) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(f));
        self
    }

    pub fn tree_id(&self) -> &str {
        &self.id
    }

    /// Set the canonical selection.
    pub fn select(&self, id: CategoryId) {
        set_selection(&self.selection, id);
    }

    /// The canonical selection.
    pub fn selection(&self) -> Option<CategoryId> {
        self.selection.get()
    }

    /// An accessor for the live selection, as handed to items.
    pub fn accessor(&self) -> SelectionAccessor {
        let selection = self.selection.clone();
        Arc::new(move || selection.get())
    }

    /// Render `data`, reconciling the mounted items against it.
    ///
    /// Handlers from the previous render are discarded. A root with a
    /// different id than last time replaces the whole mounted tree.
    pub fn render(&mut self, data: &CategoryNode) -> Element {
        self.registry.clear();

        let get_selection = self.accessor();
        let on_select: SelectFn = {
            let selection = self.selection.clone();
            let listener = self.on_select.clone();
            Arc::new(move |id| {
                set_selection(&selection, id);
                if let Some(listener) = &listener {
                    listener(id);
                }
            })
        };

        if self.root.as_ref().map(TreeItem::id) != Some(data.id) {
            log::debug!("tree {} mounting root {}", self.id, data.id);
            self.root = Some(TreeItem::new(data.id, self.root_folded));
        }
        let root_folded = self.root_folded;
        let root = self
            .root
            .get_or_insert_with(|| TreeItem::new(data.id, root_folded));

        let scope = RenderScope {
            tree_id: &self.id,
            indent: self.indent,
            registry: &self.registry,
            on_select: &on_select,
            get_selection: &get_selection,
        };
        let props = ItemProps {
            node: data,
            depth: 0,
            selected: get_selection() == Some(data.id),
        };
        let element = root.render(props, &scope);

        root.clear_dirty();
        self.selection.clear_dirty();
        log::debug!(
            "tree {} rendered, {} handlers registered",
            self.id,
            self.registry.len()
        );

        Element::div()
            .id(self.id.clone())
            .class("TreeView")
            .child(element)
    }

    /// Route an event to the item that rendered its target.
    ///
    /// Returns whether a handler ran. The new state is applied before this
    /// returns: collapsed items have already unmounted their children, and
    /// the handlers of those children are gone.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let before = self.mounted_ids();
        if !self.registry.dispatch(event) {
            return false;
        }
        self.unmount_collapsed(&before);
        true
    }

    /// Activate the fold control of a mounted item. Returns false if the
    /// item is not mounted.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        let before = self.mounted_ids();
        match self.root.as_mut().and_then(|root| root.find_mut(id)) {
            Some(item) => item.toggle_fold(),
            None => return false,
        }
        self.unmount_collapsed(&before);
        true
    }

    /// Prune collapsed subtrees and unregister the handlers of every item in
    /// `before` that is no longer mounted.
    fn unmount_collapsed(&mut self, before: &[CategoryId]) {
        if let Some(root) = &mut self.root {
            root.prune_collapsed();
        }
        let mounted: HashSet<CategoryId> = self.mounted_ids().into_iter().collect();
        for &gone in before.iter().filter(|id| !mounted.contains(id)) {
            for part in ["fold", "label"] {
                self.registry.remove(&element_id(&self.id, part, gone));
            }
        }
    }

    /// Whether state changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.selection.is_dirty() || self.root.as_ref().is_some_and(TreeItem::is_dirty)
    }

    /// The mounted root item, if rendered.
    pub fn root(&self) -> Option<&TreeItem> {
        self.root.as_ref()
    }

    /// Find a mounted item.
    pub fn item(&self, id: CategoryId) -> Option<&TreeItem> {
        self.root.as_ref()?.find(id)
    }

    pub fn is_mounted(&self, id: CategoryId) -> bool {
        self.item(id).is_some()
    }

    /// Ids of all mounted items, pre-order.
    pub fn mounted_ids(&self) -> Vec<CategoryId> {
        self.root
            .as_ref()
            .map(TreeItem::mounted_ids)
            .unwrap_or_default()
    }

    /// Ids of the mounted items that reported themselves selected on the
    /// last render.
    pub fn selected_ids(&self) -> Vec<CategoryId> {
        self.mounted_ids()
            .into_iter()
            .filter(|id| self.item(*id).is_some_and(TreeItem::is_selected))
            .collect()
    }

    /// Element id of an item's label.
    pub fn label_id(&self, id: CategoryId) -> String {
        element_id(&self.id, "label", id)
    }

    /// Element id of an item's fold control.
    pub fn fold_id(&self, id: CategoryId) -> String {
        element_id(&self.id, "fold", id)
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

fn set_selection(selection: &State<Option<CategoryId>>, id: CategoryId) {
    log::info!("selected category {id}");
    selection.set(Some(id));
}

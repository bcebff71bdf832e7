//! Tree item - one category row plus its mounted subtree.

use std::collections::HashMap;
use std::sync::Arc;

use arbor_dom::Element;

use super::{FoldToggle, SelectFn, SelectionAccessor, element_id};
use crate::category::{CategoryId, CategoryNode};
use crate::handler::{HandlerRegistry, ON_ACTIVATE};
use crate::state::State;

/// Class set on the label of the selected item.
pub const SELECTED_CLASS: &str = "TreeItemSelected";

/// Inputs a parent passes to one child item on each render.
#[derive(Debug, Clone, Copy)]
pub struct ItemProps<'a> {
    pub node: &'a CategoryNode,
    pub depth: u16,
    pub selected: bool,
}

/// Inputs shared unchanged by every item of one render.
pub struct RenderScope<'a> {
    pub tree_id: &'a str,
    /// Cells of indentation per depth level.
    pub indent: u16,
    pub registry: &'a HandlerRegistry,
    pub on_select: &'a SelectFn,
    pub get_selection: &'a SelectionAccessor,
}

impl RenderScope<'_> {
    pub fn element_id(&self, part: &str, id: CategoryId) -> String {
        element_id(self.tree_id, part, id)
    }
}

/// A mounted tree item.
///
/// Items are retained between renders so their fold state survives. While
/// expanded, an item keeps one child item per child node, matched by id.
/// While collapsed it keeps none.
#[derive(Debug)]
pub struct TreeItem {
    id: CategoryId,
    expanded: State<bool>,
    toggle: FoldToggle,
    depth: u16,
    selected: bool,
    children: Vec<TreeItem>,
}

impl TreeItem {
    /// Create an item. With no `folded` value it starts expanded.
    pub fn new(id: CategoryId, folded: Option<bool>) -> Self {
        let folded = folded.unwrap_or(false);
        Self {
            id,
            expanded: State::new(!folded),
            toggle: FoldToggle::new(folded),
            depth: 0,
            selected: false,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Whether the last render marked this item as the selected one.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Depth at the last render (root is 0).
    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn toggle(&self) -> &FoldToggle {
        &self.toggle
    }

    pub fn children(&self) -> &[TreeItem] {
        &self.children
    }

    /// Find a mounted item by id in this subtree.
    pub fn find(&self, id: CategoryId) -> Option<&TreeItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: CategoryId) -> Option<&mut TreeItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Activate the fold control, as a click on it would.
    pub fn toggle_fold(&mut self) {
        let expanded = self.expanded.clone();
        self.toggle.activate(move || flip(&expanded));
        self.prune_collapsed();
    }

    /// Unmount the children of every collapsed item in this subtree.
    pub fn prune_collapsed(&mut self) {
        if !self.is_expanded() {
            if !self.children.is_empty() {
                log::debug!("unmounting {} children of item {}", self.children.len(), self.id);
            }
            self.children.clear();
            return;
        }
        for child in &mut self.children {
            child.prune_collapsed();
        }
    }

    /// Ids of all mounted items in this subtree, pre-order.
    pub fn mounted_ids(&self) -> Vec<CategoryId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<CategoryId>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.expanded.is_dirty()
            || self.toggle.is_dirty()
            || self.children.iter().any(TreeItem::is_dirty)
    }

    pub fn clear_dirty(&self) {
        self.expanded.clear_dirty();
        self.toggle.clear_dirty();
        for child in &self.children {
            child.clear_dirty();
        }
    }

    /// Render this item and, if expanded, its children.
    ///
    /// Registers the fold and label handlers for this render in
    /// `scope.registry`.
    pub fn render(&mut self, props: ItemProps<'_>, scope: &RenderScope<'_>) -> Element {
        let selection = (scope.get_selection)();
        self.depth = props.depth;
        self.selected = props.selected;
        log::trace!(
            "drawing item {}, selection is {:?}, selected is {}",
            self.id,
            selection,
            self.selected
        );

        let mut subtree = Vec::new();
        if self.is_expanded() {
            self.reconcile(&props.node.children);
            for (child, node) in self.children.iter_mut().zip(&props.node.children) {
                let child_props = ItemProps {
                    node,
                    depth: props.depth.saturating_add(1),
                    selected: selection == Some(node.id),
                };
                subtree.push(child.render(child_props, scope));
            }
        } else {
            self.children.clear();
        }

        let expanded = self.expanded.clone();
        let fold = self.toggle.render(
            &scope.element_id("fold", self.id),
            scope.registry,
            move || flip(&expanded),
        );

        let label_id = scope.element_id("label", self.id);
        let on_select = Arc::clone(scope.on_select);
        let id = self.id;
        scope
            .registry
            .register(&label_id, ON_ACTIVATE, Arc::new(move |_| on_select(id)));

        let label = Element::span()
            .id(label_id)
            .class(if self.selected { SELECTED_CLASS } else { "" })
            .clickable(true)
            .with_text(props.node.name.clone());

        let row = Element::div()
            .id(scope.element_id("row", self.id))
            .attr("margin-left", props.depth.saturating_mul(scope.indent))
            .child(fold)
            .child(label);

        Element::div()
            .id(scope.element_id("item", self.id))
            .attr("data-category", self.id)
            .child(row)
            .children(subtree)
    }

    /// Match mounted children to `nodes` by id, in node order. Unmatched
    /// nodes get fresh items; unmatched items are dropped.
    fn reconcile(&mut self, nodes: &[CategoryNode]) {
        let mut mounted: HashMap<CategoryId, TreeItem> =
            self.children.drain(..).map(|item| (item.id, item)).collect();

        self.children = nodes
            .iter()
            .map(|node| {
                mounted
                    .remove(&node.id)
                    .unwrap_or_else(|| TreeItem::new(node.id, None))
            })
            .collect();

        if !mounted.is_empty() {
            log::debug!("dropped {} stale children of item {}", mounted.len(), self.id);
        }
    }
}

fn flip(expanded: &State<bool>) {
    expanded.update(|e| *e = !*e);
}

use std::sync::{Arc, Mutex};

use arbor::components::SELECTED_CLASS;
use arbor::{CategoryId, CategoryNode, TreeItem, TreeView};
use arbor_dom::{find_by_class, find_element, Element, Event, Stylesheet};

const ROOT: CategoryId = CategoryId(0);
const AAA: CategoryId = CategoryId(1);
const BBB: CategoryId = CategoryId(2);
const CCC: CategoryId = CategoryId(3);
const DDD: CategoryId = CategoryId(4);

/// root(0) -> [aaa(1) -> [bbb(2), ccc(3)], ddd(4)]
fn sample() -> CategoryNode {
    CategoryNode::branch(
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
    )
}

fn click_label(view: &mut TreeView, id: CategoryId) -> bool {
    let target = view.label_id(id);
    view.dispatch(&Event::click(target))
}

fn click_fold(view: &mut TreeView, id: CategoryId) -> bool {
    let target = view.fold_id(id);
    view.dispatch(&Event::click(target))
}

fn selected_labels(element: &Element) -> Vec<String> {
    find_by_class(element, SELECTED_CLASS)
        .into_iter()
        .map(Element::text_content)
        .collect()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_initial_selection_marks_root() {
    let data = sample();
    let mut view = TreeView::new(Some(ROOT));
    let element = view.render(&data);

    assert_eq!(view.selection(), Some(ROOT));
    assert_eq!(view.selected_ids(), vec![ROOT]);
    assert_eq!(selected_labels(&element), vec!["root"]);
}

#[test]
fn test_select_every_node_marks_exactly_one_item() {
    let data = sample();
    let mut view = TreeView::new(Some(ROOT));
    view.render(&data);

    for (_, node) in data.walk() {
        view.select(node.id);
        let element = view.render(&data);

        assert_eq!(view.selection(), Some(node.id));
        assert_eq!(view.selected_ids(), vec![node.id]);
        assert_eq!(selected_labels(&element), vec![node.name.clone()]);
    }
}

#[test]
fn test_clicking_label_selects_and_notifies() {
    let data = sample();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut view = TreeView::new(Some(ROOT)).on_select(move |id| {
        sink.lock().unwrap().push(id);
    });
    view.render(&data);

    assert!(click_label(&mut view, DDD));
    assert_eq!(view.selection(), Some(DDD));
    assert_eq!(*seen.lock().unwrap(), vec![DDD]);

    view.render(&data);
    assert_eq!(view.selected_ids(), vec![DDD]);
}

#[test]
fn test_programmatic_select_does_not_notify() {
    let data = sample();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut view = TreeView::new(None).on_select(move |id| {
        sink.lock().unwrap().push(id);
    });
    view.render(&data);

    view.select(CCC);

    assert_eq!(view.selection(), Some(CCC));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_selection_selects_nothing() {
    let data = sample();
    let mut view = TreeView::new(Some(CategoryId(99)));
    let element = view.render(&data);

    assert_eq!(view.selection(), Some(CategoryId(99)));
    assert!(view.selected_ids().is_empty());
    assert!(selected_labels(&element).is_empty());

    view.select(BBB);
    view.render(&data);
    assert_eq!(view.selected_ids(), vec![BBB]);
}

#[test]
fn test_no_selection() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    assert_eq!(view.selection(), None);
    assert!(view.selected_ids().is_empty());
}

// ============================================================================
// Fold State
// ============================================================================

#[test]
fn test_root_without_folded_prop_starts_expanded() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    assert!(view.root().is_some_and(TreeItem::is_expanded));
    assert_eq!(view.mounted_ids(), vec![ROOT, AAA, BBB, CCC, DDD]);

    // A subtree rendered as its own root starts expanded too.
    let subtree = data.find(AAA).unwrap().clone();
    let mut sub_view = TreeView::new(None);
    sub_view.render(&subtree);
    assert!(sub_view.root().is_some_and(TreeItem::is_expanded));
    assert_eq!(sub_view.mounted_ids(), vec![AAA, BBB, CCC]);
}

#[test]
fn test_root_folded_option_mounts_only_root() {
    let data = sample();
    let mut view = TreeView::new(None).with_root_folded(true);
    view.render(&data);

    assert_eq!(view.mounted_ids(), vec![ROOT]);
    assert!(view.root().unwrap().toggle().is_folded());
}

#[test]
fn test_even_toggles_restore_fold_state() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    for _ in 0..2 {
        assert!(click_fold(&mut view, AAA));
        view.render(&data);
    }

    let item = view.item(AAA).unwrap();
    assert!(item.is_expanded());
    assert!(!item.toggle().is_folded());
    assert!(view.is_mounted(BBB));
}

#[test]
fn test_collapse_unmounts_descendants() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    assert!(click_fold(&mut view, AAA));
    // Applied before the next render.
    assert!(!view.is_mounted(BBB));
    assert!(!view.is_mounted(CCC));

    let element = view.render(&data);
    assert_eq!(view.mounted_ids(), vec![ROOT, AAA, DDD]);
    assert!(find_element(&element, &view.label_id(BBB)).is_none());
    assert!(find_element(&element, &view.label_id(AAA)).is_some());
}

#[test]
fn test_collapsed_child_label_is_not_routed() {
    let data = sample();
    let mut view = TreeView::new(Some(ROOT));
    view.render(&data);

    assert!(click_fold(&mut view, AAA));
    // No render in between: the hidden label must already be dead.
    assert!(!click_label(&mut view, BBB));
    assert!(!click_fold(&mut view, CCC));
    assert_eq!(view.selection(), Some(ROOT));
    assert_eq!(view.registry().len(), 6);

    assert!(view.toggle(ROOT));
    assert!(!click_label(&mut view, AAA));
    assert_eq!(view.registry().len(), 2);
}

#[test]
fn test_reexpand_creates_fresh_descendants() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    // Fold aaa, then collapse and re-expand root.
    assert!(click_fold(&mut view, AAA));
    view.render(&data);
    assert!(!view.item(AAA).unwrap().is_expanded());

    assert!(click_fold(&mut view, ROOT));
    view.render(&data);
    assert_eq!(view.mounted_ids(), vec![ROOT]);

    assert!(click_fold(&mut view, ROOT));
    view.render(&data);

    let aaa = view.item(AAA).unwrap();
    assert!(aaa.is_expanded());
    assert!(!aaa.toggle().is_folded());
    assert_eq!(view.mounted_ids(), vec![ROOT, AAA, BBB, CCC, DDD]);
}

#[test]
fn test_leaf_toggle_is_present_and_harmless() {
    let data = sample();
    let mut view = TreeView::new(None);
    let element = view.render(&data);

    assert!(find_element(&element, &view.fold_id(DDD)).is_some());
    assert!(click_fold(&mut view, DDD));
    view.render(&data);

    assert!(view.is_mounted(DDD));
    assert!(view.item(DDD).unwrap().toggle().is_folded());
}

#[test]
fn test_reorder_keeps_fold_state_by_id() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);
    assert!(click_fold(&mut view, AAA));
    view.render(&data);

    let mut reordered = data.clone();
    reordered.children.reverse();
    view.render(&reordered);

    assert!(!view.item(AAA).unwrap().is_expanded());
    assert_eq!(view.mounted_ids(), vec![ROOT, DDD, AAA]);
}

#[test]
fn test_removed_children_are_unmounted() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    let mut pruned = data.clone();
    pruned.children.truncate(1);
    view.render(&pruned);

    assert!(!view.is_mounted(DDD));
    assert!(!click_label(&mut view, DDD));
}

#[test]
fn test_programmatic_toggle() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);

    assert!(view.toggle(AAA));
    assert!(!view.is_mounted(BBB));
    assert!(view.is_dirty());

    view.render(&data);
    assert!(!view.is_dirty());
    assert!(!view.toggle(BBB));
}

// ============================================================================
// Selection vs Fold
// ============================================================================

#[test]
fn test_selecting_hidden_node_shows_after_expand() {
    let data = sample();
    let mut view = TreeView::new(Some(ROOT));
    view.render(&data);
    assert!(click_fold(&mut view, AAA));
    view.render(&data);

    view.select(CCC);
    let element = view.render(&data);
    assert_eq!(view.selection(), Some(CCC));
    assert!(view.selected_ids().is_empty());
    assert!(selected_labels(&element).is_empty());

    assert!(click_fold(&mut view, AAA));
    let element = view.render(&data);
    assert_eq!(view.selected_ids(), vec![CCC]);
    assert_eq!(selected_labels(&element), vec!["ccc"]);
}

#[test]
fn test_scenario_select_then_collapse() {
    let data = sample();
    let mut view = TreeView::new(Some(ROOT));
    view.render(&data);

    assert!(click_label(&mut view, BBB));
    let element = view.render(&data);
    assert_eq!(view.selection(), Some(BBB));
    assert_eq!(view.selected_ids(), vec![BBB]);
    assert_eq!(selected_labels(&element), vec!["bbb"]);

    assert!(click_fold(&mut view, AAA));
    let element = view.render(&data);
    assert!(find_element(&element, &view.label_id(BBB)).is_none());
    assert!(find_element(&element, &view.label_id(CCC)).is_none());
    assert_eq!(view.selection(), Some(BBB));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_rendered_rows_indent_by_depth() {
    let data = sample();
    let mut view = TreeView::new(Some(BBB)).id("cats").indent(2);
    let element = view.render(&data);

    let layout = arbor_dom::layout(&element, arbor_dom::Rect::new(0, 0, 30, 10));
    let mut buf = arbor_dom::Buffer::new(30, 10);
    arbor_dom::render_to_buffer(&element, &layout, &mut buf, &Stylesheet::new());

    assert_eq!(
        buf.lines(),
        vec!["▼root", "  ▼aaa", "    ▼bbb", "    ▼ccc", "  ▼ddd"]
    );
}

#[test]
fn test_folded_indicator_glyph() {
    let data = sample();
    let mut view = TreeView::new(None).id("cats");
    view.render(&data);
    assert!(click_fold(&mut view, AAA));
    let element = view.render(&data);

    let svg = find_element(&element, "cats-fold-1-svg").unwrap();
    assert_eq!(svg.glyph(), Some("▶"));
    let row = find_element(&element, "cats-row-1").unwrap();
    assert_eq!(row.get_attr("margin-left"), Some("2"));
}

#[test]
fn test_stale_handlers_cleared_on_render() {
    let data = sample();
    let mut view = TreeView::new(None);
    view.render(&data);
    let before = view.registry().len();

    assert!(click_fold(&mut view, AAA));
    view.render(&data);

    // Two handlers (fold + label) per mounted item.
    assert_eq!(before, 10);
    assert_eq!(view.registry().len(), 6);
}

#[test]
fn test_new_root_remounts_tree() {
    let mut view = TreeView::new(None);
    view.render(&sample());
    assert!(click_fold(&mut view, AAA));

    let other = CategoryNode::branch(10, "other", vec![CategoryNode::leaf(11, "x")]);
    view.render(&other);

    assert_eq!(view.mounted_ids(), vec![CategoryId(10), CategoryId(11)]);
}

use arbor_dom::{layout, Element, Rect};

fn layout_root(root: &Element, width: u16, height: u16) -> arbor_dom::LayoutResult {
    layout(root, Rect::new(0, 0, width, height))
}

// ============================================================================
// Block Flow
// ============================================================================

#[test]
fn test_blocks_stack_vertically() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("a").with_text("first"))
        .child(Element::div().id("b").with_text("second"));

    let layout = layout_root(&root, 40, 10);

    assert_eq!(layout["a"], Rect::new(0, 0, 40, 1));
    assert_eq!(layout["b"], Rect::new(0, 1, 40, 1));
    assert_eq!(layout["root"].height, 2);
}

#[test]
fn test_empty_block_takes_no_rows() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("empty"))
        .child(Element::div().id("after").with_text("x"));

    let layout = layout_root(&root, 20, 5);

    assert_eq!(layout["empty"].height, 0);
    assert_eq!(layout["after"].y, 0);
}

#[test]
fn test_margin_left_indents_block_and_children() {
    let root = Element::div()
        .id("root")
        .attr("margin-left", 4)
        .child(Element::span().id("label").with_text("abc"));

    let layout = layout_root(&root, 20, 5);

    assert_eq!(layout["root"].x, 4);
    assert_eq!(layout["root"].width, 16);
    assert_eq!(layout["label"], Rect::new(4, 0, 3, 1));
}

#[test]
fn test_nested_margins_accumulate() {
    let root = Element::div()
        .id("outer")
        .attr("margin-left", 2)
        .child(
            Element::div()
                .id("inner")
                .attr("margin-left", 3)
                .with_text("x"),
        );

    let layout = layout_root(&root, 20, 5);

    assert_eq!(layout["inner"].x, 5);
}

// ============================================================================
// Inline Flow
// ============================================================================

#[test]
fn test_inline_children_share_a_row() {
    let root = Element::div()
        .id("row")
        .child(Element::span().id("a").with_text("ab"))
        .child(Element::span().id("b").with_text("cde"));

    let layout = layout_root(&root, 20, 5);

    assert_eq!(layout["a"], Rect::new(0, 0, 2, 1));
    assert_eq!(layout["b"], Rect::new(2, 0, 3, 1));
    assert_eq!(layout["row"].height, 1);
}

#[test]
fn test_block_after_inline_starts_new_row() {
    let root = Element::div()
        .id("root")
        .child(Element::span().id("a").with_text("ab"))
        .child(Element::div().id("block").with_text("x"))
        .child(Element::span().id("c").with_text("cd"));

    let layout = layout_root(&root, 20, 5);

    assert_eq!(layout["a"].y, 0);
    assert_eq!(layout["block"].y, 1);
    assert_eq!(layout["c"], Rect::new(0, 2, 2, 1));
    assert_eq!(layout["root"].height, 3);
}

#[test]
fn test_inline_clipped_at_right_edge() {
    let root = Element::div()
        .id("root")
        .child(Element::span().id("a").with_text("abcdef"))
        .child(Element::span().id("b").with_text("gh"));

    let layout = layout_root(&root, 4, 2);

    assert_eq!(layout["a"].width, 4);
    assert_eq!(layout["b"].width, 0);
}

#[test]
fn test_glyph_replaces_children() {
    let root = Element::div().id("root").child(
        Element::new("svg")
            .id("icon")
            .attr("data-glyph", "▶")
            .child(Element::new("polygon").id("shape")),
    );

    let layout = layout_root(&root, 10, 2);

    assert_eq!(layout["icon"], Rect::new(0, 0, 1, 1));
    assert!(!layout.contains_key("shape"));
}

#[test]
fn test_inline_container_sums_children() {
    let root = Element::div().id("root").child(
        Element::span()
            .id("outer")
            .child(Element::text("ab").id("t1"))
            .child(Element::text("c").id("t2")),
    );

    let layout = layout_root(&root, 10, 2);

    assert_eq!(layout["outer"].width, 3);
    assert_eq!(layout["t2"].x, 2);
}

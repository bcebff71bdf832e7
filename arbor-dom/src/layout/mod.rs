mod rect;

use std::collections::HashMap;

pub use rect::Rect;

use crate::element::{Content, Element};
use crate::text::display_width;

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out `root` inside `available`.
///
/// Block elements stack vertically and span the full width minus their
/// `margin-left`. Inline elements flow left to right on a single row and are
/// clipped at the right edge; there is no wrapping.
pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    if root.is_inline() {
        layout_inline(root, available.x, available.y, available.right(), &mut result);
    } else {
        layout_block(root, available, available.y, &mut result);
    }
    result
}

/// Place a block element at row `y`. Returns the number of rows it occupies.
fn layout_block(element: &Element, area: Rect, y: u16, result: &mut LayoutResult) -> u16 {
    let x = area.x.saturating_add(element.margin_left()).min(area.right());
    let width = area.right() - x;
    let inner = Rect::new(x, y, width, area.bottom().saturating_sub(y));

    let height = if element.glyph().is_some() {
        1
    } else {
        match &element.content {
            Content::None => 0,
            Content::Text(text) => u16::from(!text.is_empty()),
            Content::Children(children) => layout_flow(children, inner, result),
        }
    };

    result.insert(element.id.clone(), Rect::new(x, y, width, height));
    height
}

fn layout_flow(children: &[Element], area: Rect, result: &mut LayoutResult) -> u16 {
    let mut rows: u16 = 0;
    let mut cursor_x = area.x;
    let mut line_open = false;

    for child in children {
        if child.is_inline() {
            let y = area.y.saturating_add(rows);
            let width = layout_inline(child, cursor_x, y, area.right(), result);
            cursor_x = cursor_x.saturating_add(width);
            line_open = true;
        } else {
            if line_open {
                rows = rows.saturating_add(1);
                cursor_x = area.x;
                line_open = false;
            }
            let y = area.y.saturating_add(rows);
            rows = rows.saturating_add(layout_block(child, area, y, result));
        }
    }

    if line_open {
        rows = rows.saturating_add(1);
    }
    rows
}

/// Place an inline element at `(x, y)`. Returns its width after clipping.
fn layout_inline(element: &Element, x: u16, y: u16, right: u16, result: &mut LayoutResult) -> u16 {
    let max = right.saturating_sub(x);

    // Glyph elements stand in for their children, which are not laid out.
    let natural = if let Some(glyph) = element.glyph() {
        cells(display_width(glyph))
    } else {
        match &element.content {
            Content::None => 0,
            Content::Text(text) => cells(display_width(text)),
            Content::Children(children) => {
                let mut cursor = x;
                for child in children {
                    cursor = cursor.saturating_add(layout_inline(child, cursor, y, right, result));
                }
                cursor - x
            }
        }
    };

    let width = natural.min(max);
    result.insert(element.id.clone(), Rect::new(x, y, width, 1));
    width
}

fn cells(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

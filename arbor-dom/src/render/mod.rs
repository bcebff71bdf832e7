use crate::buffer::{cell, Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::style::{Style, Stylesheet};
use crate::text::{char_width, clip};

pub fn render_to_buffer(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    stylesheet: &Stylesheet,
) {
    render_element(element, layout, buf, stylesheet, Style::default());
}

fn render_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    stylesheet: &Stylesheet,
    inherited: Style,
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };
    let style = stylesheet.resolve(element, inherited);

    if let Some(glyph) = element.glyph() {
        render_text(glyph, *rect, style, buf);
        return;
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => render_text(text, *rect, style, buf),
        Content::Children(children) => {
            for child in children {
                render_element(child, layout, buf, stylesheet, style);
            }
        }
    }
}

fn render_text(text: &str, rect: Rect, style: Style, buf: &mut Buffer) {
    if rect.is_empty() {
        return;
    }

    let fg = style.fg.unwrap_or(cell::DEFAULT_FG);
    let bg = style.bg.unwrap_or(cell::DEFAULT_BG);
    let text = clip(text, usize::from(rect.width));

    let mut x = rect.x;
    for ch in text.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > rect.right() {
            break;
        }

        buf.set(
            x,
            rect.y,
            Cell {
                char: ch,
                fg,
                bg,
                style: style.text,
                wide_continuation: false,
            },
        );
        for offset in 1..width {
            buf.set(
                x + offset,
                rect.y,
                Cell {
                    wide_continuation: true,
                    ..Cell::new(' ')
                },
            );
        }
        x += width;
    }
}

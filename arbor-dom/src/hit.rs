use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// The chain of elements whose laid-out rect covers `(x, y)`, outermost first.
///
/// Where siblings overlap, the later one wins. Empty if the point is outside
/// `root`.
pub fn elements_at<'a>(layout: &LayoutResult, root: &'a Element, x: u16, y: u16) -> Vec<&'a Element> {
    let mut chain = Vec::new();
    let mut current = Some(root);

    while let Some(element) = current.take() {
        if !layout.get(&element.id).is_some_and(|rect| rect.contains(x, y)) {
            break;
        }
        chain.push(element);

        if let Content::Children(children) = &element.content {
            current = children.iter().rev().find(|child| {
                layout
                    .get(&child.id)
                    .is_some_and(|rect| rect.contains(x, y))
            });
        }
    }
    chain
}

/// Id of the innermost clickable element under `(x, y)`.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    elements_at(layout, root, x, y)
        .into_iter()
        .rev()
        .find(|element| element.clickable)
        .map(|element| element.id.clone())
}

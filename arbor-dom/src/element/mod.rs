mod content;
mod node;

pub use content::Content;
pub use node::{Element, GLYPH_ATTR};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Mutable form of [`find_element`].
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }
    match &mut root.content {
        Content::Children(children) => children
            .iter_mut()
            .find_map(|child| find_element_mut(child, id)),
        _ => None,
    }
}

/// Ids of clickable elements in document order; the keyboard focus ring.
pub fn clickable_ids(root: &Element) -> Vec<String> {
    let mut ids = Vec::new();
    let mut stack = vec![root];
    while let Some(element) = stack.pop() {
        if element.clickable {
            ids.push(element.id.clone());
        }
        if let Content::Children(children) = &element.content {
            stack.extend(children.iter().rev());
        }
    }
    ids
}

/// Collect every element in the tree that carries `class`, in document order.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_by_class(root, class, &mut found);
    found
}

fn collect_by_class<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    if element.has_class(class) {
        found.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_by_class(child, class, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::div()
            .id("root")
            .child(
                Element::div()
                    .id("row")
                    .child(Element::span().id("fold").clickable(true))
                    .child(Element::span().id("label").clickable(true)),
            )
            .child(Element::new("button").id("add").clickable(true))
    }

    #[test]
    fn test_clickable_ids_in_document_order() {
        assert_eq!(clickable_ids(&sample()), vec!["fold", "label", "add"]);
    }

    #[test]
    fn test_find_element_mut_marks_in_place() {
        let mut root = sample();
        find_element_mut(&mut root, "label").unwrap().add_class("Focused");
        find_element_mut(&mut root, "label").unwrap().add_class("Focused");

        let label = find_element(&root, "label").unwrap();
        assert_eq!(label.get_attr("class"), Some("Focused"));
        assert!(find_element_mut(&mut root, "missing").is_none());
    }
}

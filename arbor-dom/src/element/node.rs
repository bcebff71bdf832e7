use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tags laid out in the current line instead of starting a new one.
const INLINE_TAGS: &[&str] = &["a", "b", "button", "i", "polygon", "span", "svg", "text"];

/// Attribute holding a single glyph that text renderers paint in place of
/// the element's children (used for vector graphics).
pub const GLYPH_ATTR: &str = "data-glyph";

/// A renderer-agnostic UI element: a tag, string attributes, and either
/// text or child elements.
///
/// `id` is used for layout lookups and event targeting, so it must be unique
/// within one rendered tree. Auto-generated ids are unique per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub content: Content,
    pub clickable: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            attributes: BTreeMap::new(),
            content: Content::None,
            clickable: false,
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// A bare inline text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new("text").with_text(content)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Append a class name to the `class` attribute. Empty names are ignored.
    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// In-place form of [`class`](Self::class), for marking an already built
    /// tree.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or("").split_whitespace()
    }

    pub fn is_inline(&self) -> bool {
        INLINE_TAGS.contains(&self.tag.as_str())
    }

    pub fn glyph(&self) -> Option<&str> {
        self.get_attr(GLYPH_ATTR)
    }

    /// Left indentation in cells, from the `margin-left` attribute.
    pub fn margin_left(&self) -> u16 {
        self.get_attr("margin-left")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

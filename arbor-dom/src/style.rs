use std::collections::HashMap;

use crate::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
            reverse: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    fn union(self, other: Self) -> Self {
        Self {
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            reverse: self.reverse || other.reverse,
        }
    }
}

/// Resolved paint style for one element. Unset colors inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub text: TextStyle,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    pub fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    pub fn text(mut self, text: TextStyle) -> Self {
        self.text = text;
        self
    }

    fn cascade(self, over: Self) -> Self {
        Self {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            text: self.text.union(over.text),
        }
    }
}

/// Maps tag names and class names to styles.
///
/// Styles cascade from parent to child; tag rules apply before class rules.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    tags: HashMap<String, Style>,
    classes: HashMap<String, Style>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>, style: Style) -> Self {
        self.tags.insert(tag.into(), style);
        self
    }

    pub fn class(mut self, class: impl Into<String>, style: Style) -> Self {
        self.classes.insert(class.into(), style);
        self
    }

    pub fn resolve(&self, element: &Element, inherited: Style) -> Style {
        let mut style = inherited;
        if let Some(rule) = self.tags.get(&element.tag) {
            style = style.cascade(*rule);
        }
        for class in element.classes() {
            if let Some(rule) = self.classes.get(class) {
                style = style.cascade(*rule);
            }
        }
        style
    }
}

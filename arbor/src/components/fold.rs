//! Fold toggle - the directional indicator in front of each tree item.

use std::sync::Arc;

use arbor_dom::{Element, GLYPH_ATTR};

use crate::handler::{HandlerRegistry, ON_ACTIVATE};
use crate::state::State;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const TRIANGLE_POINTS: &str = "0,2 8,2 4,6";
const FOLDED_TRANSFORM: &str = "translate(0, 8) rotate(-90)";
const EXPANDED_GLYPH: &str = "▼";
const FOLDED_GLYPH: &str = "▶";

/// A control that owns its own folded flag.
///
/// Activation flips the flag, then invokes the owner's callback exactly
/// once. The owner keeps its own structural flag; the two stay in step only
/// because both flip on every activation.
#[derive(Debug, Clone)]
pub struct FoldToggle {
    folded: State<bool>,
}

impl Default for FoldToggle {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FoldToggle {
    pub fn new(folded: bool) -> Self {
        Self {
            folded: State::new(folded),
        }
    }

    pub fn is_folded(&self) -> bool {
        self.folded.get()
    }

    /// Flip the indicator and notify the owner.
    pub fn activate(&self, on_toggle: impl FnOnce()) {
        flip(&self.folded);
        on_toggle();
    }

    pub fn is_dirty(&self) -> bool {
        self.folded.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.folded.clear_dirty();
    }

    /// Build the indicator element and register its activation handler
    /// under `id` for the current render.
    pub fn render(
        &self,
        id: &str,
        registry: &HandlerRegistry,
        on_toggle: impl Fn() + Send + Sync + 'static,
    ) -> Element {
        let folded = self.folded.clone();
        registry.register(
            id,
            ON_ACTIVATE,
            Arc::new(move |_| {
                flip(&folded);
                on_toggle();
            }),
        );

        let is_folded = self.is_folded();
        let (glyph, transform) = if is_folded {
            (FOLDED_GLYPH, FOLDED_TRANSFORM)
        } else {
            (EXPANDED_GLYPH, "")
        };

        Element::span()
            .id(id)
            .class("FoldIndicator")
            .clickable(true)
            .child(
                Element::new("svg")
                    .id(format!("{id}-svg"))
                    .attr("version", "1.1")
                    .attr("width", 8)
                    .attr("height", 8)
                    .attr("xmlns", SVG_NAMESPACE)
                    .attr(GLYPH_ATTR, glyph)
                    .child(
                        Element::new("polygon")
                            .id(format!("{id}-shape"))
                            .attr("points", TRIANGLE_POINTS)
                            .attr("fill", "black")
                            .attr("transform", transform),
                    ),
            )
    }
}

fn flip(folded: &State<bool>) {
    folded.update(|f| *f = !*f);
}

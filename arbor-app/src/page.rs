//! The browser page: a category pane above the entries of the selected
//! category.

use std::sync::Arc;

use arbor::components::SELECTED_CLASS;
use arbor::handler::ON_ACTIVATE;
use arbor::prelude::*;
use arbor_dom::{clickable_ids, find_element_mut, Key, Rgb, Style, Stylesheet, TextStyle};

use crate::catalog::{Catalog, Entry};
use crate::config::Config;
use crate::store::StoreError;

/// Element id of the "add category" button.
pub const ADD_CATEGORY_ID: &str = "add-category";

/// Tree id of the category tree; prefixes its element ids.
pub const TREE_ID: &str = "categories";

/// Class added to the element holding keyboard focus.
pub const FOCUSED_CLASS: &str = "Focused";

/// What the runtime should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    /// State changed; render again.
    Handled,
    Quit,
}

/// Top-level view.
pub struct MainView {
    catalog: Catalog,
    tree: TreeView,
    /// Last category picked in the tree; drives the entry list.
    selected_category: State<Option<CategoryId>>,
    add_requested: State<bool>,
    registry: HandlerRegistry,
    added: usize,
    /// Element that untargeted keys go to.
    focus: Option<String>,
    /// Clickable ids of the last render, in document order.
    focus_ring: Vec<String>,
}

impl MainView {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let initial = config
            .initial_selection
            .unwrap_or_else(|| catalog.categories.root_id());
        let selected_category = State::new(Some(initial));

        let listener = selected_category.clone();
        let mut tree = TreeView::new(Some(initial))
            .id(TREE_ID)
            .indent(config.indent)
            .on_select(move |id| listener.set(Some(id)));
        if config.root_folded {
            tree = tree.with_root_folded(true);
        }

        Self {
            catalog,
            tree,
            selected_category,
            add_requested: State::new(false),
            registry: HandlerRegistry::new(),
            added: 0,
            focus: None,
            focus_ring: Vec::new(),
        }
    }

    pub fn tree(&self) -> &TreeView {
        &self.tree
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Id of the focused element, if any.
    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category.get()
    }

    /// Entries of the selected category.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        match self.selected_category.get() {
            Some(id) => self.catalog.entries_in(id).collect(),
            None => Vec::new(),
        }
    }

    pub fn render(&mut self) -> Element {
        self.registry.clear();
        let add_requested = self.add_requested.clone();
        self.registry.register(
            ADD_CATEGORY_ID,
            ON_ACTIVATE,
            Arc::new(move |_| add_requested.set(true)),
        );

        let tree = self.tree.render(&self.catalog.categories.to_tree());
        let categories = Element::div()
            .id("category-pane")
            .class("CategoryPane")
            .child(
                Element::div()
                    .class("PaneHeader")
                    .child(Element::span().class("PaneTitle").with_text("Categories"))
                    .child(Element::text(" "))
                    .child(
                        Element::new("button")
                            .id(ADD_CATEGORY_ID)
                            .clickable(true)
                            .with_text("[+]"),
                    ),
            )
            .child(tree);

        let mut root = Element::div()
            .id("main")
            .class("MainView")
            .child(categories)
            .child(self.entry_pane());

        // Focus on an element that is gone, such as a collapsed child, is lost.
        self.focus_ring = clickable_ids(&root);
        match self.focus.as_deref().and_then(|id| find_element_mut(&mut root, id)) {
            Some(element) => element.add_class(FOCUSED_CLASS),
            None => self.focus = None,
        }
        root
    }

    fn entry_pane(&self) -> Element {
        let entries = self.visible_entries();
        let header = Element::div()
            .class("PaneHeader")
            .child(Element::span().class("PaneTitle").with_text("Entries"))
            .child(Element::text(format!(" ({})", entries.len())));

        let body = if entries.is_empty() {
            Element::div().class("Hint").with_text("No entries")
        } else {
            Element::new("ul").children(entries.into_iter().map(|entry| {
                Element::new("li")
                    .id(format!("entry-{}", entry.id))
                    .child(
                        Element::new("a")
                            .attr("href", &entry.uri)
                            .attr("title", &entry.uri)
                            .with_text(entry.title.clone()),
                    )
                    .child(
                        Element::span()
                            .class("EntryTime")
                            .with_text(format!("  {}", entry.added())),
                    )
            }))
        };

        Element::div()
            .id("entry-pane")
            .class("EntryListPane")
            .child(header)
            .child(body)
    }

    /// Apply one event.
    ///
    /// Key shortcuts: `q`/Esc/Ctrl+C quit, `+` or `a` adds a category,
    /// Tab/Down and Up move the focus through the clickable elements. Other
    /// keys go to the focused element, so Enter or Space activates it.
    pub fn handle(&mut self, event: &Event) -> Outcome {
        if let Event::Key {
            target: None,
            key,
            modifiers,
        } = event
        {
            match key {
                Key::Char('q') | Key::Escape => return Outcome::Quit,
                Key::Char('c') if modifiers.ctrl => return Outcome::Quit,
                Key::Char('+') | Key::Char('a') => self.add_requested.set(true),
                Key::Tab | Key::Down => return self.move_focus(true),
                Key::Up => return self.move_focus(false),
                _ => {}
            }
        }

        let event = match &self.focus {
            Some(focused) => event.clone().focus_on(focused),
            None => event.clone(),
        };
        let mut handled = matches!(event, Event::Resize { .. })
            || self.registry.dispatch(&event)
            || self.tree.dispatch(&event);

        if self.add_requested.get() {
            self.add_requested.set(false);
            if let Err(e) = self.add_category() {
                log::error!("failed to add category: {e}");
            }
            handled = true;
        }

        if handled {
            Outcome::Handled
        } else {
            Outcome::Ignored
        }
    }

    /// Step the focus along the ring of the last render, wrapping at the
    /// ends. With no focus, forward starts at the first element and backward
    /// at the last.
    fn move_focus(&mut self, forward: bool) -> Outcome {
        let len = self.focus_ring.len();
        if len == 0 {
            return Outcome::Ignored;
        }
        let current = self
            .focus
            .as_ref()
            .and_then(|focused| self.focus_ring.iter().position(|id| id == focused));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(at), true) => (at + 1) % len,
            (Some(at), false) => (at + len - 1) % len,
        };
        log::debug!("focus moved to {}", self.focus_ring[next]);
        self.focus = Some(self.focus_ring[next].clone());
        Outcome::Handled
    }

    /// Append a new category under the selection, or under the root when the
    /// selection names no category.
    pub fn add_category(&mut self) -> Result<CategoryId, StoreError> {
        let store = &mut self.catalog.categories;
        let parent = self
            .tree
            .selection()
            .filter(|id| store.contains(*id))
            .unwrap_or_else(|| store.root_id());

        self.added += 1;
        let id = store.add(parent, format!("New category {}", self.added))?;
        log::info!("added category {id} under {parent}");
        Ok(id)
    }
}

/// Terminal styles for the page.
pub fn stylesheet() -> Stylesheet {
    Stylesheet::new()
        .class("PaneTitle", Style::new().text(TextStyle::new().bold().underline()))
        .class(SELECTED_CLASS, Style::new().text(TextStyle::new().reverse()))
        .class(FOCUSED_CLASS, Style::new().text(TextStyle::new().underline()))
        .class("FoldIndicator", Style::new().fg(Rgb::new(128, 128, 128)))
        .class("EntryTime", Style::new().text(TextStyle::new().dim()))
        .class("Hint", Style::new().text(TextStyle::new().dim()))
        .tag("button", Style::new().fg(Rgb::new(80, 200, 120)).text(TextStyle::new().bold()))
        .tag("a", Style::new().fg(Rgb::new(97, 175, 239)))
}

#[cfg(test)]
mod tests {
    use arbor_dom::{find_element, Modifiers};

    use super::*;

    fn view() -> MainView {
        MainView::new(Catalog::sample().unwrap(), &Config::default())
    }

    fn titles(view: &MainView) -> Vec<String> {
        view.visible_entries()
            .into_iter()
            .map(|e| e.title.clone())
            .collect()
    }

    #[test]
    fn test_starts_on_root_with_no_entries() {
        let mut view = view();
        let element = view.render();

        assert_eq!(view.selected_category(), Some(CategoryId(0)));
        assert!(titles(&view).is_empty());
        let pane = find_element(&element, "entry-pane").unwrap();
        assert!(pane.text_content().contains("No entries"));
    }

    #[test]
    fn test_clicking_category_filters_entries() {
        let mut view = view();
        view.render();

        let label = view.tree().label_id(CategoryId(2));
        assert_eq!(view.handle(&Event::click(label)), Outcome::Handled);
        assert_eq!(view.selected_category(), Some(CategoryId(2)));
        assert_eq!(titles(&view), vec!["The Rust Programming Language", "Serde"]);

        let element = view.render();
        assert!(find_element(&element, "entry-1").is_some());
        assert!(find_element(&element, "entry-3").is_none());
    }

    #[test]
    fn test_add_button_appends_under_selection() {
        let mut view = view();
        view.render();
        let label = view.tree().label_id(CategoryId(4));
        view.handle(&Event::click(label));
        view.render();

        assert_eq!(view.handle(&Event::click(ADD_CATEGORY_ID)), Outcome::Handled);

        let store = &view.catalog().categories;
        assert_eq!(store.children(CategoryId(4)), &[CategoryId(5)]);
        assert_eq!(store.name(CategoryId(5)), Some("New category 1"));

        let element = view.render();
        let new_label = view.tree().label_id(CategoryId(5));
        assert!(find_element(&element, &new_label).is_some());
    }

    #[test]
    fn test_add_with_unknown_selection_goes_under_root() {
        let config = Config {
            initial_selection: Some(CategoryId(99)),
            ..Default::default()
        };
        let mut view = MainView::new(Catalog::sample().unwrap(), &config);
        view.render();

        assert_eq!(view.handle(&Event::key(Key::Char('+'))), Outcome::Handled);
        assert_eq!(
            view.catalog().categories.children(CategoryId(0)),
            &[CategoryId(1), CategoryId(4), CategoryId(5)]
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut view = view();
        assert_eq!(view.handle(&Event::key(Key::Char('q'))), Outcome::Quit);
        assert_eq!(view.handle(&Event::key(Key::Escape)), Outcome::Quit);

        let ctrl_c = Event::Key {
            target: None,
            key: Key::Char('c'),
            modifiers: Modifiers::ctrl(),
        };
        assert_eq!(view.handle(&ctrl_c), Outcome::Quit);
    }

    #[test]
    fn test_keyboard_focus_activates_elements() {
        let mut view = view();
        view.render();

        // Up from no focus lands on the last label, ddd.
        assert_eq!(view.handle(&Event::key(Key::Up)), Outcome::Handled);
        let ddd = view.tree().label_id(CategoryId(4));
        assert_eq!(view.focused(), Some(ddd.as_str()));
        let element = view.render();
        assert!(find_element(&element, &ddd).unwrap().has_class(FOCUSED_CLASS));

        assert_eq!(view.handle(&Event::key(Key::Enter)), Outcome::Handled);
        assert_eq!(view.selected_category(), Some(CategoryId(4)));
        view.render();

        // Tab wraps around to the add button; Space activates it.
        view.handle(&Event::key(Key::Tab));
        assert_eq!(view.focused(), Some(ADD_CATEGORY_ID));
        assert_eq!(view.handle(&Event::key(Key::Char(' '))), Outcome::Handled);
        assert_eq!(view.catalog().categories.children(CategoryId(4)), &[CategoryId(5)]);
    }

    #[test]
    fn test_focus_on_folded_away_element_is_dropped() {
        let mut view = view();
        view.render();

        // add, fold 0, label 0, fold 1, label 1, fold 2, label 2
        for _ in 0..7 {
            view.handle(&Event::key(Key::Down));
        }
        let bbb = view.tree().label_id(CategoryId(2));
        assert_eq!(view.focused(), Some(bbb.as_str()));

        let fold = view.tree().fold_id(CategoryId(1));
        view.handle(&Event::click(fold));
        view.render();
        assert_eq!(view.focused(), None);

        // Enter with nothing focused does nothing.
        assert_eq!(view.handle(&Event::key(Key::Enter)), Outcome::Ignored);
        assert_eq!(view.selected_category(), Some(CategoryId(0)));
    }

    #[test]
    fn test_add_fails_cleanly_when_ids_run_out() {
        let json = r#"{"categories":{"id":9223372036854775807,"name":"root"}}"#;
        let mut view = MainView::new(Catalog::from_json(json).unwrap(), &Config::default());
        view.render();

        assert_eq!(view.add_category(), Err(StoreError::IdsExhausted));
        assert_eq!(view.handle(&Event::key(Key::Char('+'))), Outcome::Handled);
        assert_eq!(view.catalog().categories.len(), 1);
    }

    #[test]
    fn test_unrouted_click_is_ignored() {
        let mut view = view();
        view.render();
        assert_eq!(view.handle(&Event::click("nowhere")), Outcome::Ignored);
    }

    #[test]
    fn test_root_folded_config() {
        let config = Config {
            root_folded: true,
            ..Default::default()
        };
        let mut view = MainView::new(Catalog::sample().unwrap(), &config);
        view.render();
        assert_eq!(view.tree().mounted_ids(), vec![CategoryId(0)]);
    }
}

use crate::element::Element;
use crate::hit::hit_test;
use crate::layout::LayoutResult;

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event, targeted at the focused element if any. Terminal
    /// input arrives untargeted; the page fills in its focus.
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Mouse click event
    Click {
        target: Option<String>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Left click on an element, as produced by hit testing.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: Some(target.into()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }

    pub fn key(key: Key) -> Self {
        Self::Key {
            target: None,
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// A key event without a target aimed at `focused`. Other events are
    /// returned unchanged.
    pub fn focus_on(self, focused: &str) -> Self {
        match self {
            Self::Key {
                target: None,
                key,
                modifiers,
            } => Self::Key {
                target: Some(focused.to_string()),
                key,
                modifiers,
            },
            other => other,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Key { target, .. } | Self::Click { target, .. } => target.as_deref(),
            Self::Resize { .. } => None,
        }
    }

    /// Whether this event activates its target: a left click, or Enter/Space.
    pub fn is_activation(&self) -> bool {
        match self {
            Self::Click { button, .. } => *button == MouseButton::Left,
            Self::Key { key, modifiers, .. } => {
                modifiers.none() && matches!(key, Key::Enter | Key::Char(' '))
            }
            Self::Resize { .. } => false,
        }
    }

    /// Translate a raw terminal event, resolving click targets against the
    /// last layout. Returns None for events this crate does not model.
    pub fn from_crossterm(
        event: crossterm::event::Event,
        root: &Element,
        layout: &LayoutResult,
    ) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};

        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Key::from_code(key.code).map(|code| Self::Key {
                    target: None,
                    key: code,
                    modifiers: key.modifiers.into(),
                })
            }
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(button) => Some(Self::Click {
                    target: hit_test(layout, root, mouse.column, mouse.row),
                    x: mouse.column,
                    y: mouse.row,
                    button: button.into(),
                }),
                _ => None,
            },
            CtEvent::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// Keys the browser reacts to. Other keys are not translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Up,
    Down,
}

impl Key {
    fn from_code(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        Some(match code {
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Enter => Self::Enter,
            KeyCode::Esc => Self::Escape,
            KeyCode::Tab => Self::Tab,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// True when no modifier is held.
    pub fn none(&self) -> bool {
        *self == Self::default()
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(held: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers as Held;
        Self {
            shift: held.contains(Held::SHIFT),
            ctrl: held.contains(Held::CONTROL),
            alt: held.contains(Held::ALT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(button: crossterm::event::MouseButton) -> Self {
        match button {
            crossterm::event::MouseButton::Left => Self::Left,
            crossterm::event::MouseButton::Right => Self::Right,
            crossterm::event::MouseButton::Middle => Self::Middle,
        }
    }
}

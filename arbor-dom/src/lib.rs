pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use element::{clickable_ids, find_by_class, find_element, find_element_mut, Content, Element, GLYPH_ATTR};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use hit::{elements_at, hit_test};
pub use layout::{layout, LayoutResult, Rect};
pub use render::render_to_buffer;
pub use style::{Rgb, Style, Stylesheet, TextStyle};
pub use terminal::Terminal;

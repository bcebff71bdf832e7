pub mod category;
pub mod components;
pub mod handler;
pub mod state;

pub use category::{CategoryId, CategoryNode};
pub use components::{FoldToggle, TreeItem, TreeView};
pub use handler::{Handler, HandlerRegistry};
pub use state::State;

pub mod prelude {
    pub use crate::category::{CategoryId, CategoryNode};
    pub use crate::components::{FoldToggle, SelectFn, SelectionAccessor, TreeItem, TreeView};
    pub use crate::handler::HandlerRegistry;
    pub use crate::state::State;

    pub use arbor_dom::{Element, Event};
}

mod buffer;
pub(crate) mod cell;

pub use buffer::Buffer;
pub use cell::Cell;

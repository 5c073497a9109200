mod key;
mod node;

pub use key::{Id, Tag, join};
pub use node::{Node, ShapeError};

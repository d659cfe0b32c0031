mod arena;
mod node;
mod node_id;
mod size;

pub(crate) use arena::Arena;
pub use node::Color;
pub(crate) use node::{DownLink, Node};
pub use node_id::NodeId;
pub(crate) use size::Size;

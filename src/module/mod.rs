//! Module dependency analysis and ordering.
pub mod dependencies;
pub mod graph;
pub mod node;
pub mod resolver;

pub use graph::Graph;
pub use node::DependencyNode;
pub use resolver::{resolve_order, ResolutionState};

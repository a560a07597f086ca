use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for an undirected link in a planar graph.
    pub struct LinkId;
}

/// An undirected link between two distinct nodes.
///
/// The stored order is the insertion order and carries no meaning beyond
/// deciding which directed edge is created first.
#[derive(Debug, Clone, Copy)]
pub struct LinkData {
    pub a: NodeId,
    pub b: NodeId,
}

impl LinkData {
    /// Creates a new link between `a` and `b`.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }
}

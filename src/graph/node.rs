use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in a planar graph.
    pub struct NodeId;
}

/// Data associated with a graph node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The planar position of the node.
    pub point: Point2,
}

impl NodeData {
    /// Creates a new node at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }
}

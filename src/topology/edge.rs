use crate::graph::NodeId;

use super::region::RegionId;

slotmap::new_key_type! {
    /// Unique identifier for a directed edge in a winged-edge structure.
    pub struct EdgeId;
}

/// One orientation of an undirected link. Identity is the ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectedEdge {
    pub origin: NodeId,
    pub dest: NodeId,
}

impl DirectedEdge {
    #[must_use]
    pub fn new(origin: NodeId, dest: NodeId) -> Self {
        Self { origin, dest }
    }

    /// The opposite orientation of the same link.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            origin: self.dest,
            dest: self.origin,
        }
    }
}

/// Which side of a directed edge a region lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Predecessor and successor of an edge in the clockwise boundary walk of
/// one incident face. Both are `None` when that face is the exterior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceLinks {
    pub pred: Option<EdgeId>,
    pub succ: Option<EdgeId>,
}

/// The winged-edge record of a directed edge.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    /// Start (origin) node.
    pub start: NodeId,
    /// End (destination) node.
    pub end: NodeId,
    /// The directed edge of the same link running the other way.
    pub twin: EdgeId,
    /// Region to the left of `start -> end`.
    pub left: RegionId,
    /// Region to the right of `start -> end`.
    pub right: RegionId,
    /// Links within the left region's boundary.
    pub left_links: FaceLinks,
    /// Links within the right region's boundary.
    pub right_links: FaceLinks,
}

impl EdgeRecord {
    #[must_use]
    pub fn directed(&self) -> DirectedEdge {
        DirectedEdge::new(self.start, self.end)
    }

    /// Returns `true` if `node` is either endpoint.
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// The side `region` lies on, preferring the right side when both match.
    #[must_use]
    pub fn side_of(&self, region: RegionId) -> Option<Side> {
        if self.right == region {
            Some(Side::Right)
        } else if self.left == region {
            Some(Side::Left)
        } else {
            None
        }
    }

    #[must_use]
    pub fn region(&self, side: Side) -> RegionId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[must_use]
    pub fn links(&self, side: Side) -> FaceLinks {
        match side {
            Side::Left => self.left_links,
            Side::Right => self.right_links,
        }
    }
}

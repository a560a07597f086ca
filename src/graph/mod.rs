pub mod link;
pub mod node;

pub use link::{LinkData, LinkId};
pub use node::{NodeData, NodeId};

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::GraphError;
use crate::math::Point2;

/// An undirected graph with planar node coordinates.
///
/// Nodes and links live in arenas addressed by typed keys. Links are
/// validated on insertion: no self-loops, no duplicates, both endpoints must
/// exist. The graph is the immutable snapshot a winged-edge structure is
/// built from.
#[derive(Debug, Default)]
pub struct PlanarGraph {
    nodes: SlotMap<NodeId, NodeData>,
    links: SlotMap<LinkId, LinkData>,
    neighbors: SecondaryMap<NodeId, Vec<NodeId>>,
}

impl PlanarGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a coordinate table and index pairs.
    ///
    /// Returns the graph and the node ids in the order of `coords`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair references an index outside `coords`, or if
    /// [`PlanarGraph::add_link`] rejects it.
    pub fn from_coords(
        coords: &[(f64, f64)],
        pairs: &[(usize, usize)],
    ) -> Result<(Self, Vec<NodeId>), GraphError> {
        let mut graph = Self::new();
        let ids: Vec<NodeId> = coords
            .iter()
            .map(|&(x, y)| graph.add_node(Point2::new(x, y)))
            .collect();
        for &(i, j) in pairs {
            let a = *ids
                .get(i)
                .ok_or_else(|| GraphError::EntityNotFound(format!("node index {i}")))?;
            let b = *ids
                .get(j)
                .ok_or_else(|| GraphError::EntityNotFound(format!("node index {j}")))?;
            graph.add_link(a, b)?;
        }
        Ok((graph, ids))
    }

    /// Inserts a node and returns its ID.
    pub fn add_node(&mut self, point: Point2) -> NodeId {
        let id = self.nodes.insert(NodeData::new(point));
        self.neighbors.insert(id, Vec::new());
        id
    }

    /// Inserts an undirected link between `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing, if `a == b`, or if the
    /// nodes are already linked.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> Result<LinkId, GraphError> {
        self.node(a)?;
        self.node(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(format!("{a:?}")));
        }
        if self.contains_link(a, b) {
            return Err(GraphError::DuplicateLink(format!("{a:?}"), format!("{b:?}")));
        }
        let id = self.links.insert(LinkData::new(a, b));
        if let Some(list) = self.neighbors.get_mut(a) {
            list.push(b);
        }
        if let Some(list) = self.neighbors.get_mut(b) {
            list.push(a);
        }
        Ok(id)
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::EntityNotFound(format!("node {id:?}")))
    }

    /// Returns the coordinates of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn point(&self, id: NodeId) -> Result<Point2, GraphError> {
        self.node(id).map(|n| n.point)
    }

    /// Returns a reference to the link data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is not in the graph.
    pub fn link(&self, id: LinkId) -> Result<&LinkData, GraphError> {
        self.links
            .get(id)
            .ok_or_else(|| GraphError::EntityNotFound(format!("link {id:?}")))
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    /// Iterates over links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &LinkData)> {
        self.links.iter()
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Neighbors of `id` in link insertion order. Empty for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.neighbors.get(id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Returns `true` if `a` and `b` are joined by a link.
    #[must_use]
    pub fn contains_link(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Number of nodes reachable from `start` (including `start`).
    #[must_use]
    pub fn reachable_count(&self, start: NodeId) -> usize {
        if !self.nodes.contains_key(start) {
            return 0;
        }
        let mut seen: SecondaryMap<NodeId, ()> = SecondaryMap::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start, ());
        while let Some(n) = queue.pop_front() {
            for &m in self.neighbors(n) {
                if seen.insert(m, ()).is_none() {
                    queue.push_back(m);
                }
            }
        }
        seen.len()
    }

    /// Returns `true` if every node is reachable from every other node.
    ///
    /// The empty graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.nodes
            .keys()
            .next()
            .is_none_or(|first| self.reachable_count(first) == self.nodes.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn add_nodes_and_links() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(Point2::new(0.0, 0.0));
        let b = g.add_node(Point2::new(1.0, 0.0));
        let c = g.add_node(Point2::new(0.0, 1.0));
        let ab = g.add_link(a, b).unwrap();
        g.add_link(b, c).unwrap();

        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_links(), 2);
        assert_eq!(g.neighbors(b), &[a, c]);
        assert_eq!(g.degree(a), 1);
        assert!(g.contains_link(c, b));
        assert!(!g.contains_link(a, c));
        let link = g.link(ab).unwrap();
        assert_eq!((link.a, link.b), (a, b));
    }

    #[test]
    fn self_loop_rejected() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(Point2::new(0.0, 0.0));
        assert!(matches!(g.add_link(a, a), Err(GraphError::SelfLoop(_))));
    }

    #[test]
    fn duplicate_link_rejected_in_either_direction() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(Point2::new(0.0, 0.0));
        let b = g.add_node(Point2::new(1.0, 0.0));
        g.add_link(a, b).unwrap();
        assert!(matches!(g.add_link(b, a), Err(GraphError::DuplicateLink(..))));
        assert_eq!(g.num_links(), 1);
    }

    #[test]
    fn unknown_node_rejected() {
        // Third slot of another graph does not exist in a one-node graph.
        let mut other = PlanarGraph::new();
        other.add_node(Point2::new(0.0, 0.0));
        other.add_node(Point2::new(1.0, 0.0));
        let stray = other.add_node(Point2::new(2.0, 0.0));

        let mut g = PlanarGraph::new();
        let a = g.add_node(Point2::new(0.0, 0.0));
        assert!(g.node(stray).is_err());
        assert!(matches!(g.add_link(a, stray), Err(GraphError::EntityNotFound(_))));
    }

    #[test]
    fn from_coords_rejects_bad_index() {
        let res = PlanarGraph::from_coords(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 5)]);
        assert!(matches!(res, Err(GraphError::EntityNotFound(_))));
    }

    #[test]
    fn connectivity() {
        let (g, ids) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, 5.0)],
            &[(0, 1), (1, 2)],
        )
        .unwrap();
        assert!(!g.is_connected());
        assert_eq!(g.reachable_count(ids[0]), 3);
        assert_eq!(g.reachable_count(ids[3]), 1);

        let (g, _) =
            PlanarGraph::from_coords(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 1)]).unwrap();
        assert!(g.is_connected());
        assert!(PlanarGraph::new().is_connected());
    }
}

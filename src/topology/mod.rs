pub mod adjacency;
pub mod edge;
pub mod region;
mod traverse;

pub use adjacency::RegionAdjacency;
pub use edge::{DirectedEdge, EdgeId, EdgeRecord, FaceLinks, Side};
pub use region::{Region, RegionId};

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::TopologyError;
use crate::graph::NodeId;

/// Winged-edge topology of a planar graph.
///
/// Directed edges live in an arena and refer to each other by [`EdgeId`]
/// (twin, face predecessor/successor), so the cyclic cross-references never
/// own anything. The structure is built once by
/// [`BuildWingedEdge`](crate::operations::build::BuildWingedEdge) and is
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct WingedEdge {
    pub(crate) edges: SlotMap<EdgeId, EdgeRecord>,
    pub(crate) lookup: HashMap<DirectedEdge, EdgeId>,
    /// First outgoing edge created for each node.
    pub(crate) node_edge: SecondaryMap<NodeId, EdgeId>,
    /// All outgoing edges per node, in creation order. Isolated nodes map to
    /// an empty list.
    pub(crate) outgoing: SecondaryMap<NodeId, Vec<EdgeId>>,
    /// Region 0 is the exterior placeholder.
    pub(crate) regions: Vec<Region>,
    /// Representative boundary edge per region; `None` for the exterior.
    pub(crate) region_edge: Vec<Option<EdgeId>>,
}

impl WingedEdge {
    // --- Counts ---

    /// Number of directed edges (twice the number of links).
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of regions including the exterior.
    #[must_use]
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Number of bounded regions.
    #[must_use]
    pub fn num_bounded_regions(&self) -> usize {
        self.regions.len().saturating_sub(1)
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.outgoing.len()
    }

    // --- Edges ---

    /// Returns the record of a directed edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the structure.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeRecord, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("edge {id:?}")))
    }

    /// Looks up the directed edge `origin -> dest`.
    #[must_use]
    pub fn find_edge(&self, origin: NodeId, dest: NodeId) -> Option<EdgeId> {
        self.lookup.get(&DirectedEdge::new(origin, dest)).copied()
    }

    /// The directed edge running the other way along the same link.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the structure.
    pub fn twin(&self, id: EdgeId) -> Result<EdgeId, TopologyError> {
        self.edge(id).map(|e| e.twin)
    }

    /// Iterates over all directed edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeRecord)> {
        self.edges.iter()
    }

    // --- Nodes ---

    /// Iterates over all nodes of the source graph.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing.keys()
    }

    /// Representative edge of a node: the first edge created leaving it.
    /// `None` for isolated or unknown nodes.
    #[must_use]
    pub fn node_edge(&self, node: NodeId) -> Option<EdgeId> {
        self.node_edge.get(node).copied()
    }

    /// Outgoing edges of `node` in creation order.
    #[must_use]
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        self.outgoing.get(node).map_or(&[], Vec::as_slice)
    }

    /// Number of links incident to `node`.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.outgoing(node).len()
    }

    // --- Regions ---

    /// Returns a region, or an error if the id is out of range.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not in the structure.
    pub fn region(&self, id: RegionId) -> Result<&Region, TopologyError> {
        self.regions
            .get(id.0)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("region {id}")))
    }

    /// All regions, the exterior placeholder first.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Ids of the bounded regions.
    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> {
        (1..self.regions.len()).map(RegionId)
    }

    /// Representative edge of a region: `(boundary[0], boundary[1])`.
    /// `None` for the exterior or unknown regions.
    #[must_use]
    pub fn region_edge(&self, id: RegionId) -> Option<EdgeId> {
        self.region_edge.get(id.0).copied().flatten()
    }

    /// Upper bound on the steps a well-formed traversal can take.
    pub(crate) fn step_cap(&self) -> usize {
        2 * self.edges.len() + 2
    }

    /// The outgoing edge at `node` of the link carrying `id`.
    pub(crate) fn outgoing_of(&self, node: NodeId, id: EdgeId) -> Result<EdgeId, TopologyError> {
        let rec = self.edge(id)?;
        if !rec.touches(node) {
            return Err(TopologyError::InvalidTopology(format!(
                "edge {id:?} is not incident to node {node:?}"
            )));
        }
        Ok(if rec.start == node { id } else { rec.twin })
    }
}

use crate::error::{Result, TopologyError};
use crate::graph::NodeId;

use super::{EdgeId, RegionId, WingedEdge};

impl WingedEdge {
    /// Clockwise walk of a region's boundary.
    ///
    /// Starts at the region's representative edge and follows the successor
    /// on whichever side the region lies, until the start recurs. The
    /// exterior region has no representative edge and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the region does not exist, if a bounded side lacks
    /// a successor, or if the walk exceeds the step cap.
    pub fn face_boundary(&self, region: RegionId) -> Result<Vec<EdgeId>> {
        self.region(region)?;
        let Some(start) = self.region_edge(region) else {
            return Ok(Vec::new());
        };
        let cap = self.step_cap();

        let mut edges = Vec::new();
        let mut current = start;
        loop {
            if edges.len() >= cap {
                return Err(TopologyError::TraversalDiverged { steps: cap }.into());
            }
            edges.push(current);
            let rec = self.edge(current)?;
            let next = if rec.right == region {
                rec.right_links.succ
            } else {
                rec.left_links.succ
            };
            let next = next.ok_or_else(|| {
                TopologyError::InvalidTopology(format!(
                    "edge {current:?} has no successor in {region}"
                ))
            })?;
            if next == start {
                break;
            }
            current = next;
        }
        Ok(edges)
    }

    /// Clockwise walk of the links incident to `node`.
    ///
    /// Each link is reported once, as its directed edge leaving `node`. The
    /// walk follows right predecessors of outgoing edges and left
    /// predecessors of incoming ones. An absent pointer marks an exterior
    /// wedge: the walk then extends the fan counter-clockwise from the start,
    /// and outgoing edges still unvisited seed further fans. Each fan is in
    /// clockwise order; fans appear in discovery order.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown, if a pointer leads to an edge
    /// not incident to `node`, or if the walk exceeds the step cap.
    pub fn incident_edges(&self, node: NodeId) -> Result<Vec<EdgeId>> {
        let Some(outgoing) = self.outgoing.get(node) else {
            return Err(TopologyError::EntityNotFound(format!("node {node:?}")).into());
        };
        let Some(start) = self.node_edge(node) else {
            return Ok(Vec::new());
        };

        let mut steps = 0;
        let mut result = Vec::with_capacity(outgoing.len());
        let mut seed = Some(start);
        while let Some(s) = seed {
            let fan = self.fan(node, s, &mut steps)?;
            result.extend(fan);
            seed = outgoing.iter().copied().find(|e| !result.contains(e));
        }
        Ok(result)
    }

    /// Outgoing edges of the fan around `node` that contains `start`.
    fn fan(&self, node: NodeId, start: EdgeId, steps: &mut usize) -> Result<Vec<EdgeId>> {
        let cap = self.step_cap();
        let mut tick = || -> Result<()> {
            *steps += 1;
            if *steps > cap {
                return Err(TopologyError::TraversalDiverged { steps: cap }.into());
            }
            Ok(())
        };

        let mut clockwise = vec![start];
        let mut current = start;
        let mut closed = false;
        loop {
            tick()?;
            let rec = self.edge(current)?;
            let next = if rec.start == node {
                rec.right_links.pred
            } else {
                rec.left_links.pred
            };
            let Some(next) = next else { break };
            if next == start {
                closed = true;
                break;
            }
            let out = self.outgoing_of(node, next)?;
            if out == start {
                closed = true;
                break;
            }
            if clockwise.last() != Some(&out) {
                clockwise.push(out);
            }
            current = next;
        }
        if closed {
            return Ok(clockwise);
        }

        // Exterior wedge hit: extend counter-clockwise from the start.
        let mut counter = Vec::new();
        let mut current = start;
        loop {
            tick()?;
            let twin = self.twin(current)?;
            let Some(next) = self.edge(twin)?.right_links.succ else {
                break;
            };
            if clockwise.contains(&next) || counter.contains(&next) {
                break;
            }
            self.outgoing_of(node, next)?;
            counter.push(next);
            current = next;
        }
        counter.reverse();
        counter.extend(clockwise);
        Ok(counter)
    }
}

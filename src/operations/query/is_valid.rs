use std::collections::HashSet;

use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, EdgeRecord, FaceLinks, RegionId, Side, WingedEdge};

/// Validates the topological consistency of a winged-edge structure.
///
/// Checks twins, side assignment, face pointers, representative edges and
/// both traversals. Scoped to a single region with [`IsValid::region`].
#[derive(Debug, Default)]
pub struct IsValid {
    region: Option<RegionId>,
}

impl IsValid {
    /// Creates a new `IsValid` query over the whole structure.
    #[must_use]
    pub fn new() -> Self {
        Self { region: None }
    }

    /// Creates a new `IsValid` query restricted to one region's boundary.
    #[must_use]
    pub fn region(region: RegionId) -> Self {
        Self {
            region: Some(region),
        }
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn execute(&self, structure: &WingedEdge) -> Result<()> {
        if let Some(region) = self.region {
            return check_region(structure, region);
        }
        for (id, rec) in structure.edges() {
            check_edge(structure, id, rec)?;
        }
        check_nodes(structure)?;
        for region in structure.region_ids() {
            check_region(structure, region)?;
        }
        Ok(())
    }

    /// Returns `true` if [`execute`](Self::execute) finds nothing wrong.
    #[must_use]
    pub fn is_valid(&self, structure: &WingedEdge) -> bool {
        self.execute(structure).is_ok()
    }
}

fn invalid(msg: String) -> TopologyError {
    TopologyError::InvalidTopology(msg)
}

fn check_edge(structure: &WingedEdge, id: EdgeId, rec: &EdgeRecord) -> Result<()> {
    let twin = structure.edge(rec.twin)?;
    if twin.twin != id || twin.directed() != rec.directed().reversed() {
        return Err(invalid(format!("edge {id:?} and its twin disagree")).into());
    }
    if structure.find_edge(rec.start, rec.end) != Some(id) {
        return Err(invalid(format!("edge {id:?} missing from lookup")).into());
    }

    for side in [Side::Left, Side::Right] {
        let region = rec.region(side);
        let links = rec.links(side);
        structure.region(region)?;
        if region.is_exterior() {
            if links != FaceLinks::default() {
                return Err(invalid(format!("edge {id:?} has pointers on an exterior side")).into());
            }
            continue;
        }
        let (Some(pred), Some(succ)) = (links.pred, links.succ) else {
            return Err(invalid(format!("edge {id:?} lacks a pointer in {region}")).into());
        };
        let pred_rec = structure.edge(pred)?;
        let succ_rec = structure.edge(succ)?;
        if pred_rec.end != rec.start {
            return Err(invalid(format!("predecessor of {id:?} does not arrive at its start")).into());
        }
        if pred_rec.side_of(region).is_none() || succ_rec.side_of(region).is_none() {
            return Err(invalid(format!("pointers of {id:?} leave {region}")).into());
        }
    }
    Ok(())
}

fn check_nodes(structure: &WingedEdge) -> Result<()> {
    for node in structure.nodes() {
        if structure
            .outgoing(node)
            .iter()
            .any(|&e| !structure.edge(e).is_ok_and(|r| r.start == node))
        {
            return Err(invalid(format!("outgoing list of {node:?} is inconsistent")).into());
        }
        if let Some(e) = structure.node_edge(node) {
            if structure.edge(e)?.start != node {
                return Err(invalid(format!("representative edge of {node:?} does not start there")).into());
            }
        }
        let fan = structure.incident_edges(node)?;
        if fan.len() != structure.degree(node) {
            return Err(invalid(format!(
                "{} incident edges reported for {node:?} of degree {}",
                fan.len(),
                structure.degree(node)
            ))
            .into());
        }
    }
    Ok(())
}

fn check_region(structure: &WingedEdge, id: RegionId) -> Result<()> {
    let region = structure.region(id)?;
    if id.is_exterior() {
        return Ok(());
    }
    let start = structure
        .region_edge(id)
        .ok_or_else(|| invalid(format!("{id} has no representative edge")))?;
    let rec = structure.edge(start)?;
    if (region.at(0), region.at(1)) != (Some(rec.start), Some(rec.end)) || rec.right != id {
        return Err(invalid(format!("representative edge of {id} is off its boundary")).into());
    }

    let walk = structure.face_boundary(id)?;
    if walk.len() != region.len() {
        return Err(invalid(format!(
            "{id} has {} boundary nodes but its walk has {} edges",
            region.len(),
            walk.len()
        ))
        .into());
    }
    let mut seen = HashSet::with_capacity(walk.len());
    for e in walk {
        if !seen.insert(e) || structure.edge(e)?.side_of(id).is_none() {
            return Err(invalid(format!("walk of {id} revisits or leaves it at {e:?}")).into());
        }
    }
    Ok(())
}

use crate::error::{Result, TopologyError};
use crate::graph::NodeId;
use crate::topology::{EdgeId, FaceLinks, Region, RegionId, WingedEdge};

type NodePair = (NodeId, NodeId);

/// Resolves the predecessor and successor pointers of every directed edge on
/// each of its two sides. Exterior sides keep both pointers empty.
///
/// Requires regions already assigned and stored clockwise.
pub(crate) fn link_faces(structure: &mut WingedEdge) -> Result<()> {
    let mut resolved = Vec::with_capacity(structure.edges.len());
    for (id, rec) in &structure.edges {
        let left = face_links(structure, rec.start, rec.left)?;
        let right = face_links(structure, rec.start, rec.right)?;
        resolved.push((id, left, right));
    }
    for (id, left, right) in resolved {
        if let Some(rec) = structure.edges.get_mut(id) {
            rec.left_links = left;
            rec.right_links = right;
        }
    }
    Ok(())
}

/// Neighbors, in the ring of `region`, of an edge whose origin sits at ring
/// position `i`: the boundary edge arriving at the origin and the one
/// leaving the next ring node.
fn ring_neighbors(region: &Region, i: usize) -> Option<(NodePair, NodePair)> {
    let m = region.len();
    let pred = (region.at(i + m - 1)?, region.at(i)?);
    let succ = (region.at(i + 1)?, region.at(i + 2)?);
    Some((pred, succ))
}

fn face_links(structure: &WingedEdge, origin: NodeId, id: RegionId) -> Result<FaceLinks> {
    if id.is_exterior() {
        return Ok(FaceLinks::default());
    }
    let region = structure.region(id)?;
    let i = region.position(origin).ok_or_else(|| {
        TopologyError::InvalidTopology(format!("node {origin:?} is not on the boundary of {id}"))
    })?;
    let ((p0, p1), (s0, s1)) =
        ring_neighbors(region, i).ok_or_else(|| TopologyError::DegenerateRegion {
            region: id.0,
            reason: "empty boundary".to_owned(),
        })?;
    let lookup = |o: NodeId, d: NodeId| -> std::result::Result<EdgeId, TopologyError> {
        structure
            .find_edge(o, d)
            .ok_or(TopologyError::MissingEdge { region: id.0 })
    };
    Ok(FaceLinks {
        pred: Some(lookup(p0, p1)?),
        succ: Some(lookup(s0, s1)?),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    /// Position-dependent pointer rule over a closed boundary `r[0..=m]`.
    fn by_position(r: &[NodeId], i: usize) -> (NodePair, NodePair) {
        let m = r.len() - 1;
        if i == 0 {
            ((r[m - 1], r[0]), (r[1], r[2]))
        } else if i == m - 1 {
            ((r[i - 1], r[i]), (r[0], r[1]))
        } else {
            ((r[i - 1], r[i]), (r[i + 1], r[i + 2]))
        }
    }

    #[test]
    fn cyclic_rule_matches_positional_rule() {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        for m in 3..7 {
            let nodes: Vec<NodeId> = (0..m).map(|_| sm.insert(())).collect();
            let region = Region::closed(nodes);
            for i in 0..m {
                assert_eq!(
                    ring_neighbors(&region, i).unwrap(),
                    by_position(region.boundary(), i),
                    "ring of {m}, position {i}"
                );
            }
        }
    }

    #[test]
    fn exterior_region_has_no_neighbors() {
        assert!(ring_neighbors(&Region::exterior(), 0).is_none());
    }
}

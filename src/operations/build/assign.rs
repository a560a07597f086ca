use std::collections::HashSet;

use slotmap::SecondaryMap;
use tracing::trace;

use crate::error::{GraphError, Result, TopologyError};
use crate::graph::PlanarGraph;
use crate::math::polygon_2d::is_clockwise;
use crate::math::Point2;
use crate::topology::{EdgeId, Region, RegionId, Side, WingedEdge};

/// Records, for every directed edge, the region on each side.
///
/// A clockwise region `v0 v1 ... v0` lies to the right of each `vi -> vi+1`
/// and to the left of each `vi+1 -> vi`; a counter-clockwise one the other
/// way round. Counter-clockwise regions are reversed in place so that every
/// stored boundary is clockwise. Sides no region claims are exterior.
pub(crate) fn assign_faces(
    graph: &PlanarGraph,
    structure: &mut WingedEdge,
    regions: &mut [Region],
) -> Result<()> {
    let mut left: SecondaryMap<EdgeId, RegionId> = SecondaryMap::new();
    let mut right: SecondaryMap<EdgeId, RegionId> = SecondaryMap::new();

    for (index, region) in regions.iter_mut().enumerate().skip(1) {
        let id = RegionId(index);
        check_simple(index, region)?;

        let points = region
            .boundary()
            .iter()
            .map(|&n| graph.point(n))
            .collect::<std::result::Result<Vec<Point2>, GraphError>>()?;
        let clockwise = is_clockwise(&points);
        trace!(region = index, len = region.len(), clockwise, "assigning region");

        for (origin, dest) in region.edges() {
            let forward = structure
                .find_edge(origin, dest)
                .ok_or(TopologyError::MissingEdge { region: index })?;
            let backward = structure.twin(forward)?;
            if clockwise {
                claim(&mut right, Side::Right, forward, id)?;
                claim(&mut left, Side::Left, backward, id)?;
            } else {
                claim(&mut left, Side::Left, forward, id)?;
                claim(&mut right, Side::Right, backward, id)?;
            }
        }

        if !clockwise {
            *region = region.reversed();
        }
    }

    for (id, rec) in &mut structure.edges {
        rec.left = left.get(id).copied().unwrap_or(RegionId::EXTERIOR);
        rec.right = right.get(id).copied().unwrap_or(RegionId::EXTERIOR);
    }
    Ok(())
}

/// A region must be a closed ring of at least three distinct nodes.
fn check_simple(index: usize, region: &Region) -> std::result::Result<(), TopologyError> {
    let degenerate = |reason: &str| TopologyError::DegenerateRegion {
        region: index,
        reason: reason.to_owned(),
    };
    if region.len() < 3 {
        return Err(degenerate("fewer than three nodes"));
    }
    let mut seen = HashSet::with_capacity(region.len());
    if !region.ring().iter().all(|n| seen.insert(*n)) {
        return Err(degenerate("node repeated on boundary"));
    }
    Ok(())
}

fn claim(
    sides: &mut SecondaryMap<EdgeId, RegionId>,
    side: Side,
    edge: EdgeId,
    region: RegionId,
) -> std::result::Result<(), TopologyError> {
    match sides.insert(edge, region) {
        Some(existing) => Err(TopologyError::ConflictingRegion {
            side: match side {
                Side::Left => "left",
                Side::Right => "right",
            },
            existing: existing.0,
            incoming: region.0,
        }),
        None => Ok(()),
    }
}

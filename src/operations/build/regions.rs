use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use slotmap::SecondaryMap;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{NodeId, PlanarGraph};
use crate::math::polygon_2d::{direction_angle, signed_area_2d};
use crate::math::{Point2, TOLERANCE};
use crate::topology::Region;

/// Neighbors of each node, sorted counter-clockwise by angle.
type Rotation = SecondaryMap<NodeId, Vec<NodeId>>;

/// Block index of every directed link lying on a cycle.
type BlockIndex = HashMap<(NodeId, NodeId), usize>;

/// Extracts the regions of a connected planar graph.
///
/// Element 0 is the empty exterior placeholder. Elements `1..` are the
/// bounded faces of each biconnected block of the straight-line embedding,
/// each closed (first node repeated at the end) and wound clockwise.
/// Bridges and filaments bound no region. Tracing block by block keeps every
/// face a simple cycle, even when one cycle sits inside another and is
/// joined to it by a bridge or a shared node; together the faces form a
/// cycle basis of the graph.
///
/// # Errors
///
/// Returns `GraphError::NotConnected` for a disconnected graph and
/// `GraphError::NotPlanar` if the traced faces are inconsistent with a
/// planar embedding (crossing or overlapping links).
pub fn extract_regions(graph: &PlanarGraph) -> Result<Vec<Region>> {
    if !graph.is_connected() {
        let reached = graph
            .nodes()
            .next()
            .map_or(0, |(id, _)| graph.reachable_count(id));
        return Err(GraphError::NotConnected {
            reached,
            total: graph.num_nodes(),
        }
        .into());
    }

    // Step 1: Split into biconnected blocks. Single-link blocks (bridges,
    // filaments) never lie on a cycle.
    let blocks = biconnected_blocks(graph);
    let mut block_of = BlockIndex::new();
    for (b, links) in blocks.iter().enumerate() {
        if links.len() < 3 {
            continue;
        }
        for &(u, v) in links {
            block_of.insert((u, v), b);
            block_of.insert((v, u), b);
        }
    }

    // Step 2: Order each node's neighbors counter-clockwise.
    let rotation = rotation_system(graph)?;

    // Step 3: Trace every face walk of every block, face on the right.
    let walks = trace_faces(graph, &rotation, &block_of);

    // Step 4: Per block, the walk with the largest signed area is that
    // block's exterior.
    let mut areas = Vec::with_capacity(walks.len());
    let mut faces = vec![0usize; blocks.len()];
    let mut exterior: Vec<Option<(usize, f64)>> = vec![None; blocks.len()];
    for (i, (b, walk)) in walks.iter().enumerate() {
        let points = walk
            .iter()
            .map(|&n| graph.point(n))
            .collect::<std::result::Result<Vec<Point2>, GraphError>>()?;
        let area = signed_area_2d(&points);
        areas.push(area);
        faces[*b] += 1;
        if exterior[*b].is_none_or(|(_, best)| area > best) {
            exterior[*b] = Some((i, area));
        }
    }

    for (b, links) in blocks.iter().enumerate() {
        if faces[b] == 0 {
            continue;
        }
        let nodes: HashSet<NodeId> = links.iter().flat_map(|&(u, v)| [u, v]).collect();
        if nodes.len() + faces[b] != links.len() + 2 {
            return Err(GraphError::NotPlanar(format!(
                "{} nodes, {} links and {} faces violate Euler's formula",
                nodes.len(),
                links.len(),
                faces[b]
            ))
            .into());
        }
    }

    let mut regions = vec![Region::exterior()];
    for (i, (b, walk)) in walks.into_iter().enumerate() {
        if exterior[b].is_some_and(|(e, _)| e == i) {
            continue;
        }
        if areas[i] >= 0.0 {
            return Err(GraphError::NotPlanar(format!(
                "bounded face walk {i} is not wound clockwise (area {})",
                areas[i]
            ))
            .into());
        }
        regions.push(Region::closed(walk));
    }

    debug!(
        nodes = graph.num_nodes(),
        links = graph.num_links(),
        blocks = faces.iter().filter(|&&f| f > 0).count(),
        bounded = regions.len() - 1,
        "extracted regions"
    );
    Ok(regions)
}

/// Biconnected components as lists of links (iterative Tarjan). Bridges
/// come out as single-link blocks.
fn biconnected_blocks(graph: &PlanarGraph) -> Vec<Vec<(NodeId, NodeId)>> {
    let mut disc: SecondaryMap<NodeId, usize> = SecondaryMap::new();
    let mut low: SecondaryMap<NodeId, usize> = SecondaryMap::new();
    let mut pending: Vec<(NodeId, NodeId)> = Vec::new();
    let mut blocks = Vec::new();
    let mut time = 0;

    for (root, _) in graph.nodes() {
        if disc.contains_key(root) {
            continue;
        }
        disc.insert(root, time);
        low.insert(root, time);
        time += 1;

        // (node, parent, index of the next neighbor to visit)
        let mut stack: Vec<(NodeId, Option<NodeId>, usize)> = vec![(root, None, 0)];
        while let Some(&(v, parent, next)) = stack.last() {
            if let Some(&w) = graph.neighbors(v).get(next) {
                if let Some(top) = stack.last_mut() {
                    top.2 += 1;
                }
                if Some(w) == parent {
                    continue;
                }
                match disc.get(w).copied() {
                    None => {
                        pending.push((v, w));
                        disc.insert(w, time);
                        low.insert(w, time);
                        time += 1;
                        stack.push((w, Some(v), 0));
                    }
                    Some(dw) if dw < disc[v] => {
                        pending.push((v, w));
                        let lv = low[v].min(dw);
                        low[v] = lv;
                    }
                    Some(_) => {}
                }
                continue;
            }

            stack.pop();
            let Some(p) = parent else {
                continue;
            };
            let lp = low[p].min(low[v]);
            low[p] = lp;
            if low[v] >= disc[p] {
                let mut block = Vec::new();
                while let Some(link) = pending.pop() {
                    block.push(link);
                    if link == (p, v) {
                        break;
                    }
                }
                blocks.push(block);
            }
        }
    }
    blocks
}

/// Sorts each node's neighbors counter-clockwise by direction angle.
fn rotation_system(graph: &PlanarGraph) -> Result<Rotation> {
    let mut rotation = Rotation::new();
    for (v, _) in graph.nodes() {
        let origin = graph.point(v)?;
        let mut keyed = Vec::with_capacity(graph.degree(v));
        for &w in graph.neighbors(v) {
            keyed.push((direction_angle(&origin, &graph.point(w)?), w));
        }
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        if overlapping(&keyed) {
            return Err(GraphError::NotPlanar(format!("overlapping links at node {v:?}")).into());
        }
        rotation.insert(v, keyed.into_iter().map(|(_, w)| w).collect());
    }
    Ok(rotation)
}

/// Two sorted angles closer than `TOLERANCE`, including across the
/// `-pi`/`pi` seam.
fn overlapping(sorted: &[(f64, NodeId)]) -> bool {
    if sorted.windows(2).any(|w| (w[1].0 - w[0].0).abs() < TOLERANCE) {
        return true;
    }
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if sorted.len() > 1 => first.0 + TAU - last.0 < TOLERANCE,
        _ => false,
    }
}

/// Next half-edge of the face on the right of `u -> v` within the same
/// block: leave `v` towards the first block neighbor following `u`
/// counter-clockwise.
fn turn(
    rotation: &Rotation,
    block_of: &BlockIndex,
    (u, v): (NodeId, NodeId),
) -> Option<(NodeId, NodeId)> {
    let block = block_of.get(&(u, v))?;
    let around = rotation.get(v)?;
    let p = around.iter().position(|&w| w == u)?;
    let n = around.len();
    (1..=n)
        .map(|k| around[(p + k) % n])
        .find(|&w| block_of.get(&(v, w)) == Some(block))
        .map(|w| (v, w))
}

/// Traces all face walks, discovered in link insertion order.
///
/// Each walk is tagged with its block and lists the origin node of every
/// half-edge it contains.
fn trace_faces(
    graph: &PlanarGraph,
    rotation: &Rotation,
    block_of: &BlockIndex,
) -> Vec<(usize, Vec<NodeId>)> {
    let mut visited: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut walks = Vec::new();

    for (_, link) in graph.links() {
        for start in [(link.a, link.b), (link.b, link.a)] {
            let Some(&block) = block_of.get(&start) else {
                continue;
            };
            if visited.contains(&start) {
                continue;
            }
            let mut walk = Vec::new();
            let mut current = start;
            loop {
                visited.insert(current);
                walk.push(current.0);
                let Some(next) = turn(rotation, block_of, current) else {
                    break;
                };
                if next == start || visited.contains(&next) {
                    break;
                }
                current = next;
            }
            walks.push((block, walk));
        }
    }
    walks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WingedEdgeError;
    use crate::math::polygon_2d::is_clockwise;

    fn points(graph: &PlanarGraph, region: &Region) -> Vec<Point2> {
        region
            .boundary()
            .iter()
            .map(|&n| graph.point(n).unwrap())
            .collect()
    }

    #[test]
    fn square_with_diagonal_has_two_triangles() {
        let (g, n) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();

        assert_eq!(regions.len(), 3);
        assert!(regions[0].is_empty());
        for r in &regions[1..] {
            assert_eq!(r.len(), 3);
            assert_eq!(r.boundary().first(), r.boundary().last());
            assert!(r.position(n[0]).is_some());
            assert!(r.position(n[2]).is_some());
            assert!(is_clockwise(&points(&g, r)));
        }
        let with_b = regions[1..].iter().filter(|r| r.position(n[1]).is_some());
        let with_d = regions[1..].iter().filter(|r| r.position(n[3]).is_some());
        assert_eq!(with_b.count(), 1);
        assert_eq!(with_d.count(), 1);
    }

    #[test]
    fn triangle_has_one_region() {
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 0)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].len(), 3);
        assert_eq!(regions[1].boundary().len(), 4);
    }

    #[test]
    fn single_link_has_only_exterior() {
        let (g, _) = PlanarGraph::from_coords(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 1)]).unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions, vec![Region::exterior()]);
    }

    #[test]
    fn filaments_are_ignored() {
        // Triangle with a tail from one corner and a spur pointing inward.
        let (g, n) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (6.0, 0.0), (7.0, 1.0), (1.0, 1.0)],
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (0, 5)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].len(), 3);
        for tail in [n[3], n[4], n[5]] {
            assert!(regions[1].position(tail).is_none());
        }
    }

    #[test]
    fn grid_has_four_squares() {
        let (g, _) = PlanarGraph::from_coords(
            &[
                (0.0, 2.0),
                (1.0, 2.0),
                (2.0, 2.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (2.0, 1.0),
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
            ],
            &[
                (0, 1),
                (1, 2),
                (0, 3),
                (4, 1),
                (2, 5),
                (3, 4),
                (4, 5),
                (3, 6),
                (7, 4),
                (5, 8),
                (6, 7),
                (8, 7),
            ],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 5);
        assert!(regions[1..].iter().all(|r| r.len() == 4));
    }

    #[test]
    fn disconnected_graph_rejected() {
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (5.0, 5.0), (6.0, 5.0)],
            &[(0, 1), (2, 3)],
        )
        .unwrap();
        let err = extract_regions(&g).unwrap_err();
        assert!(matches!(
            err,
            WingedEdgeError::Graph(GraphError::NotConnected {
                reached: 2,
                total: 4
            })
        ));
    }

    #[test]
    fn crossing_diagonals_rejected() {
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)],
        )
        .unwrap();
        let err = extract_regions(&g).unwrap_err();
        assert!(matches!(err, WingedEdgeError::Graph(GraphError::NotPlanar(_))));
    }

    #[test]
    fn overlapping_links_rejected() {
        // 0-1 runs along 0-2.
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)],
            &[(0, 1), (0, 2), (1, 3), (2, 3), (0, 3)],
        )
        .unwrap();
        let err = extract_regions(&g).unwrap_err();
        assert!(matches!(err, WingedEdgeError::Graph(GraphError::NotPlanar(_))));
    }

    #[test]
    fn nested_cycle_joined_by_bridge() {
        // Triangle inside a triangle, linked by a single bridge 0-3.
        let (g, n) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (1.0, 1.0), (3.0, 1.0), (1.0, 3.0)],
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (0, 3)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 3);
        for r in &regions[1..] {
            assert_eq!(r.len(), 3);
            assert!(is_clockwise(&points(&g, r)));
        }
        assert!(regions[1].position(n[1]).is_some());
        assert!(regions[2].position(n[4]).is_some());
    }

    #[test]
    fn nested_cycle_sharing_a_node() {
        // Inner triangle touches the outer one at node 0 only.
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (3.0, 1.0), (1.0, 3.0)],
            &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 3);
        assert!(regions[1..].iter().all(|r| r.len() == 3));
    }

    #[test]
    fn dumbbell_has_two_regions() {
        let (g, n) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (5.0, 0.0), (6.0, 0.0), (5.0, 1.0)],
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (4, 5), (5, 3)],
        )
        .unwrap();
        let regions = extract_regions(&g).unwrap();
        assert_eq!(regions.len(), 3);
        assert!(regions[1].position(n[0]).is_some());
        assert!(regions[2].position(n[5]).is_some());
    }

    #[test]
    fn blocks_split_at_bridges_and_cut_nodes() {
        // Bowtie at node 0 plus a tail 2-5.
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (-2.0, 1.0), (-2.0, -1.0), (2.0, 1.0), (2.0, -1.0), (-3.0, -3.0)],
            &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0), (2, 5)],
        )
        .unwrap();
        let mut sizes: Vec<usize> = biconnected_blocks(&g).iter().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 3, 3]);
        assert_eq!(extract_regions(&g).unwrap().len(), 3);
    }

    #[test]
    fn overlapping_links_across_the_seam_rejected() {
        // Both 0-1 and 0-2 leave node 0 pointing along -x, one just below
        // the axis (angle near -pi) and one on it (angle pi).
        let (g, _) = PlanarGraph::from_coords(
            &[(0.0, 0.0), (-1.0, -1e-13), (-2.0, 0.0), (0.0, 1.0)],
            &[(0, 1), (0, 2), (0, 3), (1, 3), (2, 3)],
        )
        .unwrap();
        let err = extract_regions(&g).unwrap_err();
        assert!(matches!(err, WingedEdgeError::Graph(GraphError::NotPlanar(_))));
    }
}

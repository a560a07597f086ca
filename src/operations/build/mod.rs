mod assign;
mod link;
mod regions;

pub use regions::extract_regions;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{GraphError, Result};
use crate::graph::PlanarGraph;
use crate::math::{Vector2, TOLERANCE};
use crate::operations::query::IsValid;
use crate::topology::{DirectedEdge, EdgeId, EdgeRecord, FaceLinks, Region, RegionId, WingedEdge};

/// Parameters controlling winged-edge construction.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams {
    /// Links shorter than this are rejected as coincident endpoints.
    pub tolerance: f64,
    /// Run [`IsValid`] on the finished structure.
    pub validate: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            validate: true,
        }
    }
}

/// Finds the bounded regions of a connected planar graph.
#[derive(Debug, Default)]
pub struct ExtractRegions;

impl ExtractRegions {
    /// Creates a new `ExtractRegions` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation. See [`extract_regions`].
    ///
    /// # Errors
    ///
    /// Returns an error if the graph is disconnected or not planar.
    pub fn execute(&self, graph: &PlanarGraph) -> Result<Vec<Region>> {
        extract_regions(graph)
    }
}

/// Builds the winged-edge structure of a planar graph.
#[derive(Debug, Default)]
pub struct BuildWingedEdge {
    params: BuildParams,
    /// Caller-supplied bounded regions; extracted from the graph if `None`.
    regions: Option<Vec<Region>>,
}

impl BuildWingedEdge {
    /// Creates a new `BuildWingedEdge` operation.
    #[must_use]
    pub fn new(params: BuildParams) -> Self {
        Self {
            params,
            regions: None,
        }
    }

    /// Builds from hand-specified bounded regions instead of extracting them.
    ///
    /// `regions` must not include the exterior placeholder. Each may be
    /// wound either way; counter-clockwise ones are stored reversed.
    #[must_use]
    pub fn from_regions(params: BuildParams, regions: Vec<Region>) -> Self {
        Self {
            params,
            regions: Some(regions),
        }
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns an error if two linked nodes coincide, if region extraction
    /// fails, if the regions are inconsistent with the graph, or (with
    /// validation on) if the result fails [`IsValid`].
    pub fn execute(&self, graph: &PlanarGraph) -> Result<WingedEdge> {
        // Step 1: Angle ordering needs distinct link endpoints.
        check_link_lengths(graph, self.params.tolerance)?;

        // Step 2: Regions, exterior first.
        let mut regions = match &self.regions {
            Some(bounded) => std::iter::once(Region::exterior())
                .chain(bounded.iter().cloned())
                .collect(),
            None => extract_regions(graph)?,
        };

        // Step 3: Two directed edges per link.
        let mut structure = skeleton(graph);
        debug!(
            edges = structure.num_edges(),
            nodes = structure.num_nodes(),
            "created edge skeleton"
        );

        // Step 4: Left and right regions.
        assign::assign_faces(graph, &mut structure, &mut regions)?;

        // Step 5: Representative edge per region.
        structure.region_edge = regions
            .iter()
            .map(|r| match (r.at(0), r.at(1)) {
                (Some(a), Some(b)) => structure.find_edge(a, b),
                _ => None,
            })
            .collect();
        structure.regions = regions;

        // Step 6: Predecessor and successor pointers.
        link::link_faces(&mut structure)?;
        debug!(
            regions = structure.num_bounded_regions(),
            "linked face pointers"
        );

        if self.params.validate {
            if let Err(e) = IsValid::new().execute(&structure) {
                warn!(error = %e, "built structure failed validation");
                return Err(e);
            }
        }
        Ok(structure)
    }
}

fn check_link_lengths(graph: &PlanarGraph, tolerance: f64) -> Result<()> {
    for (_, link) in graph.links() {
        let d: Vector2 = graph.point(link.b)? - graph.point(link.a)?;
        if d.norm() <= tolerance {
            return Err(GraphError::CoincidentNodes(
                format!("{:?}", link.a),
                format!("{:?}", link.b),
                tolerance,
            )
            .into());
        }
    }
    Ok(())
}

/// The edge arena with twins and node indices; regions all exterior and no
/// face pointers yet.
fn skeleton(graph: &PlanarGraph) -> WingedEdge {
    let mut structure = WingedEdge {
        edges: SlotMap::with_capacity_and_key(2 * graph.num_links()),
        ..WingedEdge::default()
    };
    for (id, _) in graph.nodes() {
        structure.outgoing.insert(id, Vec::new());
    }

    let record = |start, end, twin| EdgeRecord {
        start,
        end,
        twin,
        left: RegionId::EXTERIOR,
        right: RegionId::EXTERIOR,
        left_links: FaceLinks::default(),
        right_links: FaceLinks::default(),
    };
    for (_, link) in graph.links() {
        let uv = structure
            .edges
            .insert(record(link.a, link.b, EdgeId::default()));
        let vu = structure.edges.insert(record(link.b, link.a, uv));
        if let Some(rec) = structure.edges.get_mut(uv) {
            rec.twin = vu;
        }

        for (id, start, end) in [(uv, link.a, link.b), (vu, link.b, link.a)] {
            structure.lookup.insert(DirectedEdge::new(start, end), id);
            if !structure.node_edge.contains_key(start) {
                structure.node_edge.insert(start, id);
            }
            if let Some(out) = structure.outgoing.get_mut(start) {
                out.push(id);
            }
        }
    }
    structure
}

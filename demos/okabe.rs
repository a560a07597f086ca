//! Winged-edge walk-through on the 3x3 grid network.
//!
//! ```text
//!   A---B---C   J
//!   |   |   | /
//!   D---E---F
//!   |   |   |
//!   G---H---I
//! ```
//!
//! J hangs off C and borders no region.
//!
//! Usage:
//! ```text
//! cargo run --example okabe
//! RUST_LOG=wingedge=trace cargo run --example okabe
//! ```

use wingedge::{BuildParams, BuildWingedEdge, NodeId, PlanarGraph, Result, WingedEdge};

const NAMES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for wingedge.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("wingedge=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let (graph, ids) = PlanarGraph::from_coords(
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
            (3.0, 3.0),
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
            (2, 9),
        ],
    )?;
    let we = BuildWingedEdge::new(BuildParams::default()).execute(&graph)?;

    let name = |n: NodeId| {
        ids.iter()
            .position(|&id| id == n)
            .map_or("?", |i| NAMES[i])
    };

    println!("Incident edges (clockwise):");
    for (i, &node) in ids.iter().enumerate() {
        let edges = we.incident_edges(node)?;
        println!("  {}: {}", NAMES[i], describe(&we, &edges, &name)?);
    }

    println!("Region boundaries (clockwise):");
    for region in we.region_ids() {
        let edges = we.face_boundary(region)?;
        println!("  {region}: {}", describe(&we, &edges, &name)?);
    }

    let adjacency = we.region_adjacency();
    println!("Region adjacency:");
    for region in we.region_ids() {
        let neighbors: Vec<String> = adjacency
            .neighbors(region)
            .iter()
            .map(|r| r.0.to_string())
            .collect();
        println!("  {}: {}", region.0, neighbors.join(" "));
    }
    Ok(())
}

fn describe(
    we: &WingedEdge,
    edges: &[wingedge::EdgeId],
    name: &impl Fn(NodeId) -> &'static str,
) -> Result<String> {
    let mut parts = Vec::with_capacity(edges.len());
    for &e in edges {
        let rec = we.edge(e)?;
        parts.push(format!("({},{})", name(rec.start), name(rec.end)));
    }
    Ok(parts.join(" "))
}

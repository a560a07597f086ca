use thiserror::Error;

/// Top-level error type for winged-edge construction and traversal.
#[derive(Debug, Error)]
pub enum WingedEdgeError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to the input planar graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("self-loop on node {0}")]
    SelfLoop(String),

    #[error("duplicate link between {0} and {1}")]
    DuplicateLink(String, String),

    #[error("nodes {0} and {1} are closer than {2}")]
    CoincidentNodes(String, String, f64),

    #[error("graph is not connected: {reached} of {total} nodes reachable")]
    NotConnected { reached: usize, total: usize },

    #[error("graph is not planar: {0}")]
    NotPlanar(String),
}

/// Errors related to the derived winged-edge topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("region {region} is degenerate: {reason}")]
    DegenerateRegion { region: usize, reason: String },

    #[error("region {region} uses a node pair that is not a link")]
    MissingEdge { region: usize },

    #[error("{side} side of an edge claimed by regions {existing} and {incoming}")]
    ConflictingRegion {
        side: &'static str,
        existing: usize,
        incoming: usize,
    },

    #[error("traversal did not return to its start within {steps} steps")]
    TraversalDiverged { steps: usize },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Convenience type alias for results using [`WingedEdgeError`].
pub type Result<T> = std::result::Result<T, WingedEdgeError>;

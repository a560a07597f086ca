pub mod error;
pub mod graph;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, WingedEdgeError};
pub use graph::{NodeId, PlanarGraph};
pub use operations::build::{BuildParams, BuildWingedEdge};
pub use topology::{EdgeId, RegionId, WingedEdge};

mod edges;
mod centre;

pub use edges::{Edges, EdgesError};
pub use centre::representative;

/// Variable-width axis over `f64` coordinates, as used by every histogram in
/// the workspace.
pub type Axis = ndhistogram::axis::Variable<f64>;

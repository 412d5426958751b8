mod component;
mod options;
mod render;
mod state;
mod types;
mod widget;

pub use component::ForceGraphCanvas;
pub use options::GraphOptions;
pub use types::{GraphData, GraphEdge, GraphNode};

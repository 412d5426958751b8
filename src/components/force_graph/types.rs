/// Renderer-ready node.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	/// Pre-escaped HTML shown while hovering the node.
	pub tooltip: String,
	pub group: String,
	pub color: String,
}

/// Renderer-ready edge; both endpoints are known node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

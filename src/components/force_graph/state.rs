use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::options::GraphOptions;
use super::types::GraphData;

const STEP: f32 = 0.016;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub tooltip: String,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer leaves the click slop.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub options: GraphOptions,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	edge_labels: HashMap<(DefaultNodeIdx, DefaultNodeIdx), String>,
	nodes: HashMap<DefaultNodeIdx, NodeInfo>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, options: GraphOptions, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(options.physics.parameters());
		let mut id_to_idx = HashMap::new();
		let mut nodes = HashMap::new();
		let mut edges = Vec::new();
		let mut edge_labels = HashMap::new();

		let spread = 40.0 + 12.0 * (data.nodes.len() as f64).sqrt();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let info = NodeInfo {
				id: node.id.clone(),
				label: node.label.clone(),
				tooltip: node.tooltip.clone(),
				color: node.color.clone(),
			};
			let idx = graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: info.clone(),
			});
			id_to_idx.insert(node.id.clone(), idx);
			nodes.insert(idx, info);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
				if !edge.label.is_empty() {
					edge_labels.insert((src, tgt), edge.label.clone());
				}
			}
		}

		let mut state = Self {
			graph,
			options,
			edges,
			edge_labels,
			nodes,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.stabilize(options.physics.stabilization_ticks);
		state
	}

	/// Advance the layout without drawing so the first frame is already settled.
	pub fn stabilize(&mut self, ticks: u32) {
		for _ in 0..ticks {
			self.graph.update(STEP);
		}
	}

	pub fn node(&self, idx: DefaultNodeIdx) -> Option<&NodeInfo> {
		self.nodes.get(&idx)
	}

	pub fn edge_label(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> Option<&str> {
		self.edge_labels.get(&(src, tgt)).map(String::as_str)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit = self.options.hit_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// hit radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the previous highlight around for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Begin a press at screen position `(x, y)`: grab the node under the
	/// pointer, or start panning.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Pointer moved to `(x, y)`. Returns the hovered node, if any.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<DefaultNodeIdx> {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			if (sx * sx + sy * sy).sqrt() > self.options.click_slop {
				self.drag.moved = true;
			}
			if let (Some(idx), true) = (self.drag.node_idx, self.drag.moved) {
				let (dx, dy) = (sx / self.transform.k, sy / self.transform.k);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
		self.hover.node
	}

	/// End the current press. Returns the node that was clicked, i.e. pressed
	/// and released without being dragged.
	pub fn release(&mut self) -> Option<DefaultNodeIdx> {
		let clicked = match (self.drag.active, self.drag.node_idx) {
			(true, Some(idx)) if !self.drag.moved => Some(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom by one wheel notch around screen position `(x, y)`.
	pub fn zoom(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphEdge, GraphNode};

	fn data() -> GraphData {
		let node = |id: &str| GraphNode {
			id: id.into(),
			label: id.to_uppercase(),
			tooltip: String::new(),
			group: "Other".into(),
			color: "#95A5A6".into(),
		};
		GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			edges: vec![
				GraphEdge {
					id: "edge_a_b_0".into(),
					source: "a".into(),
					target: "b".into(),
					label: "related".into(),
				},
				GraphEdge {
					id: "edge_b_c_1".into(),
					source: "b".into(),
					target: "c".into(),
					label: String::new(),
				},
			],
		}
	}

	fn state() -> ForceGraphState {
		let mut options = GraphOptions::default();
		options.physics.stabilization_ticks = 0;
		ForceGraphState::new(&data(), options, 800.0, 600.0)
	}

	fn screen_pos(s: &ForceGraphState, id: &str) -> (f64, f64) {
		let mut pos = (0.0, 0.0);
		s.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = (
					node.x() as f64 * s.transform.k + s.transform.x,
					node.y() as f64 * s.transform.k + s.transform.y,
				);
			}
		});
		pos
	}

	#[test]
	fn press_and_release_in_place_is_a_click() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "b");
		s.press(x, y);
		s.pointer_move(x + 1.0, y);
		let clicked = s.release().unwrap();
		assert_eq!(s.node(clicked).unwrap().id, "b");
	}

	#[test]
	fn dragging_is_not_a_click() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "a");
		s.press(x, y);
		s.pointer_move(x + 40.0, y + 40.0);
		assert!(s.release().is_none());
	}

	#[test]
	fn background_press_pans() {
		let mut s = state();
		s.press(5.0, 5.0);
		s.pointer_move(25.0, 15.0);
		assert!(s.release().is_none());
		assert_eq!((s.transform.x, s.transform.y), (420.0, 310.0));
	}

	#[test]
	fn hover_highlights_neighbors() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "b");
		let hovered = s.pointer_move(x, y).unwrap();
		assert_eq!(s.hover.neighbors.len(), 2);
		assert!(s.is_hovered(hovered));
		s.leave();
		assert!(s.hover.node.is_none());
	}

	#[test]
	fn only_non_empty_edge_labels_are_kept() {
		let s = state();
		let mut labels = Vec::new();
		s.graph.visit_edges(|n1, n2, _| {
			labels.push(s.edge_label(n1.index(), n2.index()).map(str::to_string));
		});
		labels.sort();
		assert_eq!(labels, vec![None, Some("related".to_string())]);
	}
}

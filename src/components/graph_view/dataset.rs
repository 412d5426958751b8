use std::collections::HashSet;
use std::fmt;

use log::warn;

use crate::api::{Edge, Graph, GraphNodeRecord};
use crate::components::force_graph::{GraphData, GraphEdge, GraphNode};
use crate::escape::escape_html;

pub const DEFAULT_GROUP: &str = "Other";
pub const NEUTRAL_COLOR: &str = "#95A5A6";

/// Category names as the glossary service spells them.
const CATEGORY_COLORS: &[(&str, &str)] = &[
	("Концепция", "#3498DB"),
	("Технология", "#4A90E2"),
	("Архитектура", "#9B59B6"),
	("API", "#F39C12"),
	("Функциональность", "#E74C3C"),
	("Дизайн", "#1ABC9C"),
	("Безопасность", "#E91E63"),
	("Инструмент", "#34495E"),
	("Характеристика", "#50C878"),
	("Конфигурация", "#607D8B"),
];

pub fn category_color(category: Option<&str>) -> &'static str {
	category
		.and_then(|c| CATEGORY_COLORS.iter().find(|(name, _)| *name == c))
		.map_or(NEUTRAL_COLOR, |&(_, color)| color)
}

/// Why an edge was left out of the rendered set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
	MissingEndpoint,
	UnknownNode { from: String, to: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedEdge {
	pub index: usize,
	pub reason: DropReason,
}

impl fmt::Display for DroppedEdge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.reason {
			DropReason::MissingEndpoint => write!(f, "edge #{} has no endpoint pair", self.index),
			DropReason::UnknownNode { from, to } => write!(
				f,
				"edge #{} ({from} -> {to}) references a node that does not exist",
				self.index
			),
		}
	}
}

/// Counters for the stats readout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub nodes: usize,
	pub edges: usize,
	pub dropped: usize,
}

impl fmt::Display for GraphStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Nodes: {}, Edges: {}", self.nodes, self.edges)?;
		if self.dropped > 0 {
			write!(f, " ({} skipped)", self.dropped)?;
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	pub data: GraphData,
	pub dropped: Vec<DroppedEdge>,
	pub stats: GraphStats,
}

/// Distinct `(group, color)` pairs, sorted by group.
pub fn legend(data: &GraphData) -> Vec<(String, String)> {
	let mut entries: Vec<(String, String)> = data
		.nodes
		.iter()
		.map(|n| (n.group.clone(), n.color.clone()))
		.collect();
	entries.sort();
	entries.dedup_by(|a, b| a.0 == b.0);
	entries
}

fn tooltip(node: &GraphNodeRecord) -> String {
	let mut html = format!(
		"<strong>{}</strong><br><br>{}",
		escape_html(&node.title),
		escape_html(&node.definition)
	);
	if let Some(source) = node.source.as_deref().filter(|s| !s.is_empty()) {
		html.push_str(&format!("<br><br>Source: {}", escape_html(source)));
	}
	html
}

fn render_node(node: &GraphNodeRecord) -> GraphNode {
	let category = node.category.as_deref().filter(|c| !c.is_empty());
	GraphNode {
		id: node.id.clone(),
		label: node.title.clone(),
		tooltip: tooltip(node),
		group: category.unwrap_or(DEFAULT_GROUP).to_string(),
		color: category_color(category).to_string(),
	}
}

fn render_edge(index: usize, edge: &Edge, ids: &HashSet<&str>) -> Result<GraphEdge, DroppedEdge> {
	let (Some(from), Some(to)) = (edge.from.as_deref(), edge.to.as_deref()) else {
		return Err(DroppedEdge {
			index,
			reason: DropReason::MissingEndpoint,
		});
	};
	if !ids.contains(from) || !ids.contains(to) {
		return Err(DroppedEdge {
			index,
			reason: DropReason::UnknownNode {
				from: from.to_string(),
				to: to.to_string(),
			},
		});
	}
	Ok(GraphEdge {
		id: format!("edge_{from}_{to}_{index}"),
		source: from.to_string(),
		target: to.to_string(),
		label: edge.label.clone().unwrap_or_default(),
	})
}

/// Turn an API graph into a validated renderer dataset. Edges whose endpoints
/// are missing or unknown are logged and skipped.
pub fn build(graph: &Graph) -> Dataset {
	let nodes: Vec<GraphNode> = graph.nodes.iter().map(render_node).collect();
	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

	let mut edges = Vec::with_capacity(graph.edges.len());
	let mut dropped = Vec::new();
	for (index, edge) in graph.edges.iter().enumerate() {
		match render_edge(index, edge, &ids) {
			Ok(e) => edges.push(e),
			Err(d) => {
				warn!("skipping {d}");
				dropped.push(d);
			}
		}
	}

	let stats = GraphStats {
		nodes: graph.nodes.len(),
		edges: graph.edges.len(),
		dropped: dropped.len(),
	};
	Dataset {
		data: GraphData { nodes, edges },
		dropped,
		stats,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, category: Option<&str>) -> GraphNodeRecord {
		GraphNodeRecord {
			id: id.into(),
			title: id.to_uppercase(),
			definition: format!("about {id}"),
			source: None,
			category: category.map(Into::into),
		}
	}

	fn edge(from: Option<&str>, to: Option<&str>) -> Edge {
		Edge {
			from: from.map(Into::into),
			to: to.map(Into::into),
			label: Some("related".into()),
		}
	}

	fn sample() -> Graph {
		Graph {
			nodes: vec![
				node("pwa", Some("Концепция")),
				node("https", Some("Безопасность")),
				node("perf", Some("Метрика")),
				node("misc", None),
			],
			edges: vec![
				edge(Some("pwa"), Some("https")),
				edge(Some("pwa"), Some("ghost")),
				edge(None, Some("pwa")),
				edge(Some("perf"), Some("pwa")),
				edge(Some("pwa"), Some("https")),
			],
		}
	}

	#[test]
	fn every_rendered_edge_has_both_endpoints() {
		let ds = build(&sample());
		let ids: HashSet<_> = ds.data.nodes.iter().map(|n| n.id.as_str()).collect();
		for e in &ds.data.edges {
			assert!(ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
		}
		assert_eq!(ds.data.edges.len() + ds.dropped.len(), sample().edges.len());
	}

	#[test]
	fn dropped_edges_name_their_reason() {
		let ds = build(&sample());
		assert_eq!(
			ds.dropped,
			vec![
				DroppedEdge {
					index: 1,
					reason: DropReason::UnknownNode {
						from: "pwa".into(),
						to: "ghost".into()
					},
				},
				DroppedEdge {
					index: 2,
					reason: DropReason::MissingEndpoint
				},
			]
		);
		assert_eq!(ds.stats.to_string(), "Nodes: 4, Edges: 5 (2 skipped)");
	}

	#[test]
	fn duplicate_pairs_get_distinct_ids() {
		let ds = build(&sample());
		let ids: Vec<_> = ds.data.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["edge_pwa_https_0", "edge_perf_pwa_3", "edge_pwa_https_4"]);
	}

	#[test]
	fn nodes_get_group_and_color_from_category() {
		let ds = build(&sample());
		let by_id = |id: &str| ds.data.nodes.iter().find(|n| n.id == id).unwrap();
		assert_eq!(by_id("pwa").color, "#3498DB");
		assert_eq!(by_id("pwa").group, "Концепция");
		assert_eq!(by_id("perf").color, NEUTRAL_COLOR);
		assert_eq!(by_id("perf").group, "Метрика");
		assert_eq!(by_id("misc").color, NEUTRAL_COLOR);
		assert_eq!(by_id("misc").group, DEFAULT_GROUP);
		assert_eq!(by_id("misc").label, "MISC");
	}

	#[test]
	fn legend_lists_each_group_once() {
		let ds = build(&sample());
		let groups: Vec<_> = legend(&ds.data).into_iter().map(|(g, _)| g).collect();
		assert_eq!(groups, vec!["Other", "Безопасность", "Концепция", "Метрика"]);
	}

	#[test]
	fn tooltip_is_escaped_and_mentions_source() {
		let mut n = node("x", None);
		n.title = "<b>R&D</b>".into();
		n.source = Some("https://example.com/?a=1&b=2".into());
		let html = tooltip(&n);
		assert!(html.starts_with("<strong>&lt;b&gt;R&amp;D&lt;/b&gt;</strong>"));
		assert!(html.ends_with("Source: https://example.com/?a=1&amp;b=2"));
		assert!(!tooltip(&node("y", None)).contains("Source"));
	}

	#[test]
	fn non_text_endpoint_is_skipped_not_fatal() {
		let g: Graph = serde_json::from_str(
			r#"{"nodes": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}],
				"edges": [{"from": "a", "to": "b"}, {"from": 7, "to": "b"}]}"#,
		)
		.unwrap();
		let ds = build(&g);
		assert_eq!(ds.data.edges.len(), 1);
		assert_eq!(ds.data.edges[0].source, "a");
		assert_eq!(
			ds.dropped,
			vec![DroppedEdge {
				index: 1,
				reason: DropReason::MissingEndpoint
			}]
		);
	}

	#[test]
	fn clean_graph_reports_plain_stats() {
		let g = Graph {
			nodes: vec![node("a", None), node("b", None)],
			edges: vec![edge(Some("a"), Some("b"))],
		};
		let ds = build(&g);
		assert!(ds.dropped.is_empty());
		assert_eq!(ds.stats.to_string(), "Nodes: 2, Edges: 1");
	}
}

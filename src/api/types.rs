use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full glossary entry as returned by `GET /terms/{keyword}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
	pub keyword: String,
	pub title: String,
	#[serde(default)]
	pub definition: String,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub related_terms: Vec<String>,
}

impl Term {
	/// Keywords compare case-insensitively.
	pub fn is(&self, keyword: &str) -> bool {
		self.keyword.to_lowercase() == keyword.to_lowercase()
	}

	/// Category to show as a badge. A blank category counts as none.
	pub fn badge(&self) -> Option<&str> {
		self.category.as_deref().filter(|c| !c.is_empty())
	}
}

/// Entry of `GET /terms`. Servers that inline full records fill `definition`
/// and friends; the stock endpoint only sends the first three fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TermSummary {
	pub keyword: String,
	pub title: String,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub definition: Option<String>,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub related_terms: Option<Vec<String>>,
}

impl TermSummary {
	/// The full record, if the list payload already carried one.
	pub fn into_full(self) -> Result<Term, TermSummary> {
		match self.definition {
			Some(definition) => Ok(Term {
				keyword: self.keyword,
				title: self.title,
				definition,
				source: self.source,
				category: self.category,
				related_terms: self.related_terms.unwrap_or_default(),
			}),
			None => Err(self),
		}
	}
}

/// Body of `POST /terms`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTerm {
	pub keyword: String,
	pub title: String,
	pub definition: String,
	pub source: Option<String>,
	pub category: Option<String>,
	pub related_terms: Vec<String>,
}

/// Body of `PUT /terms/{keyword}`; the keyword itself never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermUpdate {
	pub title: String,
	pub definition: String,
	pub source: Option<String>,
	pub category: Option<String>,
	pub related_terms: Vec<String>,
}

impl From<NewTerm> for TermUpdate {
	fn from(t: NewTerm) -> Self {
		Self {
			title: t.title,
			definition: t.definition,
			source: t.source,
			category: t.category,
			related_terms: t.related_terms,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphNodeRecord {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub definition: String,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
}

/// Reads a field that should be text. Anything else (a number, an object,
/// `null`) reads as absent so one malformed edge cannot reject the payload.
fn lenient_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(de)? {
		Value::String(s) => Some(s),
		_ => None,
	})
}

/// Edge exactly as it comes over the wire: endpoints under either
/// `from`/`to` or `from_id`/`to_id`.
#[derive(Clone, Debug, Default, Deserialize)]
struct WireEdge {
	#[serde(default, deserialize_with = "lenient_text")]
	from: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	from_id: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	to: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	to_id: Option<String>,
	#[serde(default, deserialize_with = "lenient_text")]
	label: Option<String>,
}

impl WireEdge {
	/// An entry that is not even an object keeps its slot with no endpoints,
	/// so it is reported as dropped instead of vanishing.
	fn read(value: Value) -> Self {
		serde_json::from_value(value).unwrap_or_default()
	}
}

/// Canonical edge. Endpoints stay optional; validation against the node set
/// happens when the dataset is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Edge {
	pub from: Option<String>,
	pub to: Option<String>,
	pub label: Option<String>,
}

impl From<WireEdge> for Edge {
	fn from(w: WireEdge) -> Self {
		let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
		Self {
			from: non_empty(w.from).or_else(|| non_empty(w.from_id)),
			to: non_empty(w.to).or_else(|| non_empty(w.to_id)),
			label: non_empty(w.label),
		}
	}
}

#[derive(Deserialize)]
struct WireGraph {
	#[serde(default)]
	nodes: Vec<GraphNodeRecord>,
	#[serde(default)]
	edges: Vec<Value>,
}

/// Payload of `GET /graph` with edges already normalized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "WireGraph")]
pub struct Graph {
	pub nodes: Vec<GraphNodeRecord>,
	pub edges: Vec<Edge>,
}

impl From<WireGraph> for Graph {
	fn from(w: WireGraph) -> Self {
		Self {
			nodes: w.nodes,
			edges: w
				.edges
				.into_iter()
				.map(|e| Edge::from(WireEdge::read(e)))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn both_endpoint_conventions_normalize() {
		let graph: Graph = serde_json::from_str(
			r#"{
				"nodes": [{"id": "pwa", "title": "PWA", "definition": "d"}],
				"edges": [
					{"from": "pwa", "to": "https", "label": "related"},
					{"from_id": "pwa", "to_id": "cache-api"},
					{"from": "pwa", "to_id": "lighthouse"},
					{"to": "pwa"},
					{"from": "", "from_id": "x", "to": "y", "label": ""}
				]
			}"#,
		)
		.unwrap();

		let pairs: Vec<_> = graph
			.edges
			.iter()
			.map(|e| (e.from.as_deref(), e.to.as_deref()))
			.collect();
		assert_eq!(
			pairs,
			vec![
				(Some("pwa"), Some("https")),
				(Some("pwa"), Some("cache-api")),
				(Some("pwa"), Some("lighthouse")),
				(None, Some("pwa")),
				(Some("x"), Some("y")),
			]
		);
		assert_eq!(graph.edges[0].label.as_deref(), Some("related"));
		assert_eq!(graph.edges[4].label, None);
	}

	#[test]
	fn malformed_edges_do_not_reject_the_graph() {
		let graph: Graph = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "a", "title": "A", "definition": "d"},
					{"id": "b", "title": "B", "definition": "d"}
				],
				"edges": [
					{"from": "a", "to": "b"},
					{"from": 7, "to": "b"},
					{"from_id": "a", "to_id": {"id": "b"}, "label": 3},
					"a->b"
				]
			}"#,
		)
		.unwrap();

		let pairs: Vec<_> = graph
			.edges
			.iter()
			.map(|e| (e.from.as_deref(), e.to.as_deref(), e.label.as_deref()))
			.collect();
		assert_eq!(
			pairs,
			vec![
				(Some("a"), Some("b"), None),
				(None, Some("b"), None),
				(Some("a"), None, None),
				(None, None, None),
			]
		);
	}

	#[test]
	fn list_payload_with_definitions_is_already_full() {
		let items: Vec<TermSummary> = serde_json::from_str(
			r#"[
				{"id": "pwa", "keyword": "pwa", "title": "PWA", "category": "Концепция"},
				{"keyword": "https", "title": "HTTPS", "definition": "secure", "related_terms": ["pwa"]}
			]"#,
		)
		.unwrap();

		let mut it = items.into_iter();
		assert!(it.next().unwrap().into_full().is_err());
		let full = it.next().unwrap().into_full().unwrap();
		assert_eq!(full.definition, "secure");
		assert_eq!(full.related_terms, vec!["pwa".to_string()]);
	}

	#[test]
	fn update_body_has_no_keyword_and_keeps_null_source() {
		let update = TermUpdate::from(NewTerm {
			keyword: "pwa".into(),
			title: "PWA".into(),
			definition: "d".into(),
			source: None,
			category: Some("Концепция".into()),
			related_terms: vec![],
		});
		let json = serde_json::to_value(&update).unwrap();
		assert!(json.get("keyword").is_none());
		assert!(json["source"].is_null());
		assert_eq!(json["related_terms"], serde_json::json!([]));
	}

	#[test]
	fn blank_category_shows_no_badge() {
		let mut term = Term {
			category: Some(String::new()),
			..Term::default()
		};
		assert_eq!(term.badge(), None);
		term.category = None;
		assert_eq!(term.badge(), None);
		term.category = Some("Метрика".into());
		assert_eq!(term.badge(), Some("Метрика"));
	}

	#[test]
	fn keyword_lookup_ignores_case() {
		let term = Term {
			keyword: "Service-Worker".into(),
			..Term::default()
		};
		assert!(term.is("service-worker"));
		assert!(!term.is("service"));
	}
}

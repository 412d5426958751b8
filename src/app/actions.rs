//! User-facing flows. Each one catches its own failures, logs them and shows
//! a single alert, so callers only ever apply what came back.

use futures::future::try_join_all;
use log::{error, info};

use super::prompt::Prompt;
use crate::api::{GlossaryBackend, Graph, Term, TermUpdate};
use crate::components::modal::TermForm;
use crate::components::nav::View;
use crate::error::ApiError;

pub const LOAD_TERMS_FAILED: &str = "Failed to load terms";
pub const LOAD_TERM_FAILED: &str = "Failed to load term";
pub const LOAD_GRAPH_FAILED: &str = "Failed to load graph";
pub const SAVE_FAILED: &str = "Failed to save term";
pub const DELETE_FAILED: &str = "Failed to delete term";

/// Fresh data to swap in after a mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Refresh {
	pub terms: Option<Vec<Term>>,
	pub graph: Option<Graph>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submitted {
	/// The server refused the write; the dialog stays open with its input.
	Rejected,
	Saved(Refresh),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Deleted {
	Declined,
	Failed,
	Deleted(Refresh),
}

/// Fetch the list and complete every entry that came without a definition in
/// one concurrent batch, keeping list order.
pub async fn fetch_terms<B: GlossaryBackend>(backend: &B) -> Result<Vec<Term>, ApiError> {
	let mut terms = Vec::new();
	let mut missing = Vec::new();
	for summary in backend.list_terms().await? {
		match summary.into_full() {
			Ok(term) => terms.push(Some(term)),
			Err(summary) => {
				missing.push((terms.len(), summary.keyword));
				terms.push(None);
			}
		}
	}

	let fetched = try_join_all(missing.iter().map(|(_, kw)| backend.get_term(kw))).await?;
	for ((slot, _), term) in missing.into_iter().zip(fetched) {
		terms[slot] = Some(term);
	}
	Ok(terms.into_iter().flatten().collect())
}

pub async fn load_terms<B: GlossaryBackend>(backend: &B, prompt: &impl Prompt) -> Option<Vec<Term>> {
	match fetch_terms(backend).await {
		Ok(terms) => {
			info!("loaded {} terms", terms.len());
			Some(terms)
		}
		Err(e) => {
			error!("loading terms: {e}");
			prompt.alert(LOAD_TERMS_FAILED);
			None
		}
	}
}

pub async fn load_term<B: GlossaryBackend>(
	backend: &B,
	prompt: &impl Prompt,
	keyword: &str,
) -> Option<Term> {
	backend
		.get_term(keyword)
		.await
		.inspect_err(|e| {
			error!("loading term {keyword}: {e}");
			prompt.alert(LOAD_TERM_FAILED);
		})
		.ok()
}

pub async fn load_graph<B: GlossaryBackend>(backend: &B, prompt: &impl Prompt) -> Option<Graph> {
	match backend.get_graph().await {
		Ok(graph) => {
			info!(
				"loaded graph: {} nodes, {} edges",
				graph.nodes.len(),
				graph.edges.len()
			);
			Some(graph)
		}
		Err(e) => {
			error!("loading graph: {e}");
			prompt.alert(LOAD_GRAPH_FAILED);
			None
		}
	}
}

/// Reload the glossary, and the graph too while it is on screen.
pub async fn refresh<B: GlossaryBackend>(backend: &B, prompt: &impl Prompt, view: View) -> Refresh {
	let terms = load_terms(backend, prompt).await;
	let graph = match view {
		View::Graph => load_graph(backend, prompt).await,
		View::Glossary => None,
	};
	Refresh { terms, graph }
}

/// Create the term, or update `editing` when set.
pub async fn submit_term<B: GlossaryBackend>(
	backend: &B,
	prompt: &impl Prompt,
	editing: Option<&str>,
	form: &TermForm,
	view: View,
) -> Submitted {
	let term = form.to_new_term();
	let result = match editing {
		Some(keyword) => backend.update_term(keyword, &TermUpdate::from(term)).await,
		None => backend.create_term(&term).await,
	};
	match result {
		Ok(saved) => {
			info!("saved term {}", saved.keyword);
			Submitted::Saved(refresh(backend, prompt, view).await)
		}
		Err(e) => {
			error!("saving term: {e}");
			prompt.alert(&e.user_message(SAVE_FAILED));
			Submitted::Rejected
		}
	}
}

pub fn delete_question(keyword: &str) -> String {
	format!("Are you sure you want to delete the term \"{keyword}\"?")
}

/// Ask first; only an accepted confirmation reaches the server.
pub async fn delete_term<B: GlossaryBackend>(
	backend: &B,
	prompt: &impl Prompt,
	keyword: &str,
	view: View,
) -> Deleted {
	if !prompt.confirm(&delete_question(keyword)) {
		return Deleted::Declined;
	}
	match backend.delete_term(keyword).await {
		Ok(()) => {
			info!("deleted term {keyword}");
			Deleted::Deleted(refresh(backend, prompt, view).await)
		}
		Err(e) => {
			error!("deleting term {keyword}: {e}");
			prompt.alert(DELETE_FAILED);
			Deleted::Failed
		}
	}
}

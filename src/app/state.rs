use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use super::actions::{self, Deleted, Refresh, Submitted};
use super::prompt::BrowserPrompt;
use crate::api::{GlossaryApi, Term};
use crate::components::glossary::{categories, retain_selection};
use crate::components::graph_view::dataset::{self, Dataset};
use crate::components::modal::{DialogEvent, DialogState, EditorMode, TermForm};
use crate::components::nav::View;

/// Create/edit dialog.
#[derive(Clone, Copy)]
pub struct TermEditor {
	pub dialog: RwSignal<DialogState>,
	pub mode: RwSignal<EditorMode>,
	pub form: RwSignal<TermForm>,
}

/// Read-only detail dialog.
#[derive(Clone, Copy)]
pub struct TermDetail {
	pub dialog: RwSignal<DialogState>,
	pub term: RwSignal<Option<Term>>,
}

fn send(dialog: RwSignal<DialogState>, event: DialogEvent) {
	dialog.update(|d| *d = d.on(event));
}

impl TermEditor {
	pub fn send(&self, event: DialogEvent) {
		send(self.dialog, event);
	}
}

impl TermDetail {
	pub fn send(&self, event: DialogEvent) {
		send(self.dialog, event);
	}
}

/// Everything the views share. The API is the source of truth: collections
/// here are only ever replaced wholesale after a fetch.
#[derive(Clone)]
pub struct AppState {
	api: GlossaryApi,
	pub view: RwSignal<View>,
	pub terms: RwSignal<Vec<Term>>,
	pub categories: Memo<Vec<String>>,
	pub search: RwSignal<String>,
	pub category: RwSignal<String>,
	pub graph: RwSignal<Option<Dataset>>,
	pub editor: TermEditor,
	pub detail: TermDetail,
}

impl AppState {
	pub fn new(api: GlossaryApi) -> Self {
		let terms = RwSignal::new(Vec::new());
		Self {
			api,
			view: RwSignal::new(View::default()),
			terms,
			categories: Memo::new(move |_| terms.with(|t| categories(t))),
			search: RwSignal::new(String::new()),
			category: RwSignal::new(String::new()),
			graph: RwSignal::new(None),
			editor: TermEditor {
				dialog: RwSignal::new(DialogState::Closed),
				mode: RwSignal::new(EditorMode::Create),
				form: RwSignal::new(TermForm::default()),
			},
			detail: TermDetail {
				dialog: RwSignal::new(DialogState::Closed),
				term: RwSignal::new(None),
			},
		}
	}

	fn replace_terms(&self, terms: Vec<Term>) {
		let selected = self.category.get_untracked();
		let kept = retain_selection(&categories(&terms), &selected);
		self.detail.term.update(|shown| {
			if let Some(cur) = shown {
				if let Some(fresh) = terms.iter().find(|t| t.is(&cur.keyword)) {
					*cur = fresh.clone();
				}
			}
		});
		self.terms.set(terms);
		if kept != selected {
			self.category.set(kept);
		}
	}

	fn apply(&self, refresh: Refresh) {
		if let Some(terms) = refresh.terms {
			self.replace_terms(terms);
		}
		if let Some(graph) = refresh.graph {
			self.graph.set(Some(dataset::build(&graph)));
		}
	}

	pub fn load_terms(&self) {
		let state = self.clone();
		spawn_local(async move {
			if let Some(terms) = actions::load_terms(&state.api, &BrowserPrompt).await {
				state.replace_terms(terms);
			}
		});
	}

	pub fn load_graph(&self) {
		let state = self.clone();
		spawn_local(async move {
			if let Some(graph) = actions::load_graph(&state.api, &BrowserPrompt).await {
				state.graph.set(Some(dataset::build(&graph)));
			}
		});
	}

	pub fn switch_view(&self, view: View) {
		info!("switching to {view:?}");
		self.view.set(view);
		if view.loads_on_enter() {
			self.load_graph();
		}
	}

	pub fn open_create(&self) {
		self.editor.form.set(TermForm::default());
		self.editor.mode.set(EditorMode::Create);
		self.editor.send(DialogEvent::Trigger);
	}

	pub fn open_edit(&self, keyword: String) {
		self.editor.form.set(TermForm::default());
		self.editor.mode.set(EditorMode::Loading(keyword.clone()));
		self.editor.send(DialogEvent::Trigger);

		let state = self.clone();
		spawn_local(async move {
			let loaded = actions::load_term(&state.api, &BrowserPrompt, &keyword).await;
			// the dialog may have been closed or reopened for another term meanwhile
			let pending = state.editor.mode.with_untracked(|m| *m == EditorMode::Loading(keyword.clone()));
			if !pending {
				return;
			}
			match loaded {
				Some(term) => {
					state.editor.form.set(TermForm::from_term(&term));
					state.editor.mode.set(EditorMode::Edit(term.keyword));
				}
				None => state.editor.send(DialogEvent::CloseControl),
			}
		});
	}

	pub fn submit(&self) {
		let Some(target) = self.editor.mode.with_untracked(|m| m.target().map(|t| t.map(str::to_string)))
		else {
			return;
		};
		let form = self.editor.form.get_untracked();
		let view = self.view.get_untracked();
		let state = self.clone();
		spawn_local(async move {
			let out =
				actions::submit_term(&state.api, &BrowserPrompt, target.as_deref(), &form, view).await;
			if let Submitted::Saved(refresh) = out {
				state.editor.send(DialogEvent::Saved);
				state.apply(refresh);
			}
		});
	}

	/// Show `keyword` in the detail dialog, replacing whatever it shows now.
	pub fn show_detail(&self, keyword: String) {
		let state = self.clone();
		spawn_local(async move {
			if let Some(term) = actions::load_term(&state.api, &BrowserPrompt, &keyword).await {
				state.detail.term.set(Some(term));
				state.detail.send(DialogEvent::Trigger);
			}
		});
	}

	pub fn delete(&self, keyword: String) {
		let view = self.view.get_untracked();
		let state = self.clone();
		spawn_local(async move {
			if let Deleted::Deleted(refresh) =
				actions::delete_term(&state.api, &BrowserPrompt, &keyword, view).await
			{
				state.apply(refresh);
			}
		});
	}
}

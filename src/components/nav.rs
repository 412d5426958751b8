use leptos::prelude::*;

use crate::app::AppState;

/// The two mutually exclusive top-level views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
	#[default]
	Glossary,
	Graph,
}

impl View {
	pub const ALL: [View; 2] = [View::Glossary, View::Graph];

	pub fn label(self) -> &'static str {
		match self {
			View::Glossary => "Glossary",
			View::Graph => "Graph",
		}
	}

	/// Whether entering this view has to fetch fresh data.
	pub fn loads_on_enter(self) -> bool {
		matches!(self, View::Graph)
	}
}

#[component]
pub fn NavBar() -> impl IntoView {
	let state = expect_context::<AppState>();
	let current = state.view;

	View::ALL
		.into_iter()
		.map(|view| {
			let state = state.clone();
			view! {
				<button
					class="nav-btn"
					class:active=move || current.get() == view
					on:click=move |_| state.switch_view(view)
				>
					{view.label()}
				</button>
			}
		})
		.collect_view()
}

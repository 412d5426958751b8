use leptos::prelude::*;

use crate::api::GlossaryApi;
use crate::app::AppState;
use crate::components::glossary::GlossaryView;
use crate::components::graph_view::GraphView;
use crate::components::modal::{DetailDialog, TermDialog};
use crate::components::nav::{NavBar, View};
use crate::config::ApiConfig;

#[component]
fn Shell() -> impl IntoView {
	let view = expect_context::<AppState>().view;

	// both views stay mounted; switching only changes which one is visible
	view! {
		<header class="app-header">
			<h1>"Glossary"</h1>
			<nav>
				<NavBar />
			</nav>
		</header>
		<main>
			<section id="glossary-view" class="view" class:active=move || view.get() == View::Glossary>
				<GlossaryView />
			</section>
			<section id="graph-view" class="view" class:active=move || view.get() == View::Graph>
				<GraphView />
			</section>
		</main>
		<TermDialog />
		<DetailDialog />
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let app = ApiConfig::from_window().map(|config| {
		let state = AppState::new(GlossaryApi::new(config));
		provide_context(state.clone());
		state.load_terms();
		view! { <Shell /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>{app}</ErrorBoundary>
	}
}

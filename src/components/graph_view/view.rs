use leptos::prelude::*;

use super::dataset::legend;
use crate::app::AppState;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphOptions};

/// Stats readout, legend and the relationship graph.
#[component]
pub fn GraphView() -> impl IntoView {
	let state = expect_context::<AppState>();
	let graph = state.graph;

	let data = Signal::derive(move || {
		graph.with(|g| g.as_ref().map(|ds| ds.data.clone()).unwrap_or_default())
	});
	let stats = move || graph.with(|g| g.as_ref().map(|ds| ds.stats.to_string()));
	let skipped = move || {
		graph.with(|g| {
			g.as_ref()
				.map(|ds| {
					ds.dropped
						.iter()
						.map(ToString::to_string)
						.collect::<Vec<_>>()
						.join("\n")
				})
				.unwrap_or_default()
		})
	};

	let on_node_click = {
		let state = state.clone();
		Callback::new(move |id: String| state.show_detail(id))
	};

	view! {
		<div class="graph-controls">
			<button id="refresh-graph-btn" class="btn-primary" on:click=move |_| state.load_graph()>
				"Refresh graph"
			</button>
			<span id="graph-stats" title=skipped>
				{move || stats().unwrap_or_default()}
			</span>
			<ul class="graph-legend">
				{move || {
					data.with(|d: &GraphData| legend(d))
						.into_iter()
						.map(|(group, color)| {
							view! {
								<li>
									<span class="legend-swatch" style:background-color=color></span>
									{group}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
		<div id="graph-container">
			<ForceGraphCanvas data=data on_node_click=on_node_click options=GraphOptions::default() />
		</div>
	}
}

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::dialog::DialogEvent;
use crate::api::Term;
use crate::app::AppState;

fn details(state: AppState, term: Term) -> impl IntoView {
	let detail = state.detail;
	let badge = term.badge().map(str::to_string);
	let Term {
		keyword,
		title,
		definition,
		source,
		related_terms,
		..
	} = term;

	let related = (!related_terms.is_empty()).then(|| {
		let links = related_terms
			.into_iter()
			.map(|rt| {
				let state = state.clone();
				let target = rt.clone();
				view! {
					<a
						href="#"
						class="related-term-tag"
						on:click=move |ev: MouseEvent| {
							ev.prevent_default();
							state.show_detail(target.clone());
						}
					>
						{rt}
					</a>
				}
			})
			.collect_view();
		view! {
			<div class="term-related">
				<h3>"Related terms:"</h3>
				<div class="related-terms">{links}</div>
			</div>
		}
	});

	let edit = {
		let (state, keyword) = (state.clone(), keyword.clone());
		move |_: MouseEvent| {
			detail.send(DialogEvent::CloseControl);
			state.open_edit(keyword.clone());
		}
	};
	let delete = {
		let keyword = keyword.clone();
		move |_: MouseEvent| {
			detail.send(DialogEvent::CloseControl);
			state.delete(keyword.clone());
		}
	};

	view! {
		<div class="term-title">{title}</div>
		<div class="term-keyword">{keyword}</div>
		{badge.map(|c| view! { <div><span class="term-category">{c}</span></div> })}
		<div class="term-definition">{definition}</div>
		{source
			.filter(|s| !s.is_empty())
			.map(|s| {
				let href = s.clone();
				view! {
					<div class="term-source">
						"Source: "
						<a href=href target="_blank" rel="noopener noreferrer">{s}</a>
					</div>
				}
			})}
		{related}
		<div class="form-actions">
			<button class="btn-edit" on:click=edit>"Edit"</button>
			<button class="btn-delete" on:click=delete>"Delete"</button>
		</div>
	}
}

/// Read-only view of one term. Following a related link swaps the content in
/// place instead of stacking another dialog.
#[component]
pub fn DetailDialog() -> impl IntoView {
	let state = expect_context::<AppState>();
	let detail = state.detail;

	view! {
		<div
			id="view-term-modal"
			class="modal"
			class:active=move || detail.dialog.get().is_open()
			on:click=move |_| detail.send(DialogEvent::ClickOutside)
		>
			<div class="modal-content" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<span class="close-view" on:click=move |_| detail.send(DialogEvent::CloseControl)>
					"\u{00d7}"
				</span>
				<div id="term-details">
					{move || detail.term.get().map(|term| details(state.clone(), term))}
				</div>
			</div>
		</div>
	}
}

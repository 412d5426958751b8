use leptos::prelude::*;
use web_sys::MouseEvent;

use super::filter::TermFilter;
use crate::api::Term;
use crate::app::AppState;

#[component]
fn TermCard(term: Term) -> impl IntoView {
	let state = expect_context::<AppState>();
	let badge = term.badge().map(str::to_string);
	let Term {
		keyword,
		title,
		definition,
		..
	} = term;

	let open_detail = {
		let (state, keyword) = (state.clone(), keyword.clone());
		move |_: MouseEvent| state.show_detail(keyword.clone())
	};
	// action buttons must not also open the detail view
	let edit = {
		let (state, keyword) = (state.clone(), keyword.clone());
		move |ev: MouseEvent| {
			ev.stop_propagation();
			state.open_edit(keyword.clone());
		}
	};
	let delete = {
		let keyword = keyword.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			state.delete(keyword.clone());
		}
	};

	view! {
		<div class="term-card" on:click=open_detail>
			<div class="term-card-header">
				<div>
					<div class="term-title">{title}</div>
					<div class="term-keyword">{keyword}</div>
				</div>
				{badge.map(|c| view! { <span class="term-category">{c}</span> })}
			</div>
			<div class="term-definition">{definition}</div>
			<div class="term-actions">
				<button class="btn-edit" on:click=edit>"Edit"</button>
				<button class="btn-delete" on:click=delete>"Delete"</button>
			</div>
		</div>
	}
}

/// Search box, category selector and the filtered card list.
#[component]
pub fn GlossaryView() -> impl IntoView {
	let state = expect_context::<AppState>();
	let AppState {
		terms,
		categories,
		search,
		category,
		..
	} = state.clone();

	let filtered = move || {
		let filter = TermFilter::new(&search.get(), &category.get());
		terms.with(|all| filter.apply(all).cloned().collect::<Vec<_>>())
	};

	view! {
		<div class="glossary-controls">
			<input
				id="search-input"
				type="search"
				placeholder="Search by keyword or title..."
				prop:value=move || search.get()
				on:input=move |ev| search.set(event_target_value(&ev))
			/>
			<select
				id="category-filter"
				prop:value=move || category.get()
				on:change=move |ev| category.set(event_target_value(&ev))
			>
				<option value="">"All categories"</option>
				{move || {
					categories
						.get()
						.into_iter()
						.map(|c| {
							let selected = category.get_untracked() == c;
							let value = c.clone();
							view! { <option value=value selected=selected>{c}</option> }
						})
						.collect_view()
				}}
			</select>
			<button id="add-term-btn" class="btn-primary" on:click=move |_| state.open_create()>
				"Add term"
			</button>
		</div>
		<div id="terms-list">
			{move || {
				let list = filtered();
				if list.is_empty() {
					view! { <p class="terms-empty">"No terms found"</p> }.into_any()
				} else {
					list.into_iter()
						.map(|term| view! { <TermCard term=term /> })
						.collect_view()
						.into_any()
				}
			}}
		</div>
	}
}

use leptos::prelude::*;
use web_sys::{MouseEvent, SubmitEvent};

use super::dialog::DialogEvent;
use super::form::FormField;
use crate::app::AppState;

#[component]
fn FormInput(field: FormField) -> impl IntoView {
	let editor = expect_context::<AppState>().editor;
	let form = editor.form;
	let value = move || form.with(|f| field.get(f).to_string());
	let on_input = move |ev| form.update(|f| field.set(f, event_target_value(&ev)));
	let disabled = move || field == FormField::Keyword && editor.mode.with(|m| m.keyword_locked());

	let input = if field.multiline() {
		view! {
			<textarea
				id=field.id()
				rows="5"
				required=field.required()
				prop:value=value
				on:input=on_input
			/>
		}
		.into_any()
	} else {
		view! {
			<input
				id=field.id()
				type="text"
				required=field.required()
				prop:value=value
				prop:disabled=disabled
				on:input=on_input
			/>
		}
		.into_any()
	};

	view! {
		<div class="form-group">
			<label for=field.id()>{field.label()}</label>
			{input}
		</div>
	}
}

/// Shared create/edit dialog.
#[component]
pub fn TermDialog() -> impl IntoView {
	let state = expect_context::<AppState>();
	let editor = state.editor;

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		state.submit();
	};
	let close = move |_: MouseEvent| editor.send(DialogEvent::CloseControl);

	view! {
		<div
			id="term-modal"
			class="modal"
			class:active=move || editor.dialog.get().is_open()
			on:click=move |_| editor.send(DialogEvent::ClickOutside)
		>
			<div class="modal-content" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<span class="close" on:click=close>"\u{00d7}"</span>
				<h2 id="modal-title">{move || editor.mode.with(|m| m.heading())}</h2>
				<form id="term-form" on:submit=on_submit>
					{FormField::ALL.into_iter().map(|field| view! { <FormInput field=field /> }).collect_view()}
					<div class="form-actions">
						<button type="submit" class="btn-primary">"Save"</button>
						<button type="button" id="cancel-btn" class="btn-secondary" on:click=close>
							"Cancel"
						</button>
					</div>
				</form>
			</div>
		</div>
	}
}

use crate::api::{NewTerm, Term};

/// Raw contents of the create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermForm {
	pub keyword: String,
	pub title: String,
	pub definition: String,
	pub source: String,
	pub category: String,
	/// Comma-separated keywords.
	pub related: String,
}

/// Split a comma-separated keyword list, dropping blank entries.
pub fn parse_related(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

fn optional(value: &str) -> Option<String> {
	(!value.is_empty()).then(|| value.to_string())
}

/// Inputs of the create/edit form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
	Keyword,
	Title,
	Definition,
	Source,
	Category,
	Related,
}

impl FormField {
	pub const ALL: [FormField; 6] = [
		FormField::Keyword,
		FormField::Title,
		FormField::Definition,
		FormField::Source,
		FormField::Category,
		FormField::Related,
	];

	pub fn label(self) -> &'static str {
		match self {
			FormField::Keyword => "Keyword",
			FormField::Title => "Title",
			FormField::Definition => "Definition",
			FormField::Source => "Source",
			FormField::Category => "Category",
			FormField::Related => "Related terms (comma-separated)",
		}
	}

	pub fn id(self) -> &'static str {
		match self {
			FormField::Keyword => "term-keyword",
			FormField::Title => "term-title",
			FormField::Definition => "term-definition",
			FormField::Source => "term-source",
			FormField::Category => "term-category",
			FormField::Related => "term-related",
		}
	}

	pub fn required(self) -> bool {
		matches!(self, FormField::Keyword | FormField::Title | FormField::Definition)
	}

	pub fn multiline(self) -> bool {
		self == FormField::Definition
	}

	pub fn get(self, form: &TermForm) -> &str {
		match self {
			FormField::Keyword => &form.keyword,
			FormField::Title => &form.title,
			FormField::Definition => &form.definition,
			FormField::Source => &form.source,
			FormField::Category => &form.category,
			FormField::Related => &form.related,
		}
	}

	pub fn set(self, form: &mut TermForm, value: String) {
		let slot = match self {
			FormField::Keyword => &mut form.keyword,
			FormField::Title => &mut form.title,
			FormField::Definition => &mut form.definition,
			FormField::Source => &mut form.source,
			FormField::Category => &mut form.category,
			FormField::Related => &mut form.related,
		};
		*slot = value;
	}
}

/// What the create/edit dialog is currently doing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
	#[default]
	Create,
	/// Waiting for the term being edited to arrive.
	Loading(String),
	Edit(String),
}

impl EditorMode {
	/// The identifier cannot change once the term exists.
	pub fn keyword_locked(&self) -> bool {
		!matches!(self, EditorMode::Create)
	}

	/// Where a submission goes: `Some(None)` creates, `Some(Some(k))` updates
	/// `k`, `None` means the form is not ready yet.
	pub fn target(&self) -> Option<Option<&str>> {
		match self {
			EditorMode::Create => Some(None),
			EditorMode::Loading(_) => None,
			EditorMode::Edit(keyword) => Some(Some(keyword.as_str())),
		}
	}

	pub fn heading(&self) -> &'static str {
		match self {
			EditorMode::Create => "Add term",
			_ => "Edit term",
		}
	}
}

impl TermForm {
	pub fn from_term(term: &Term) -> Self {
		Self {
			keyword: term.keyword.clone(),
			title: term.title.clone(),
			definition: term.definition.clone(),
			source: term.source.clone().unwrap_or_default(),
			category: term.category.clone().unwrap_or_default(),
			related: term.related_terms.join(", "),
		}
	}

	/// Field values go out as typed; only empty optional fields become `null`.
	pub fn to_new_term(&self) -> NewTerm {
		NewTerm {
			keyword: self.keyword.clone(),
			title: self.title.clone(),
			definition: self.definition.clone(),
			source: optional(&self.source),
			category: optional(&self.category),
			related_terms: parse_related(&self.related),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::TermUpdate;

	#[test]
	fn related_list_is_trimmed_and_blank_entries_dropped() {
		assert_eq!(
			parse_related(" pwa, service-worker ,, ,https"),
			vec!["pwa", "service-worker", "https"]
		);
		assert!(parse_related("").is_empty());
		assert!(parse_related(" , ").is_empty());
	}

	#[test]
	fn every_field_reads_back_what_was_set() {
		let mut form = TermForm::default();
		for (i, field) in FormField::ALL.into_iter().enumerate() {
			field.set(&mut form, format!("value {i}"));
		}
		for (i, field) in FormField::ALL.into_iter().enumerate() {
			assert_eq!(field.get(&form), format!("value {i}"), "{field:?}");
		}
		assert_eq!(form.related, "value 5");
	}

	#[test]
	fn editor_mode_controls_lock_and_target() {
		assert!(!EditorMode::Create.keyword_locked());
		assert_eq!(EditorMode::Create.target(), Some(None));

		let loading = EditorMode::Loading("pwa".into());
		assert!(loading.keyword_locked());
		assert_eq!(loading.target(), None);

		let edit = EditorMode::Edit("pwa".into());
		assert!(edit.keyword_locked());
		assert_eq!(edit.target(), Some(Some("pwa")));
		assert_eq!(edit.heading(), "Edit term");
	}

	#[test]
	fn edit_round_trip_keeps_values_verbatim() {
		let term = Term {
			keyword: "pwa".into(),
			title: "  Progressive Web App ".into(),
			definition: "line one\nline two".into(),
			source: None,
			category: Some("Концепция".into()),
			related_terms: vec!["https".into(), "cache-api".into()],
		};
		let form = TermForm::from_term(&term);
		assert_eq!(form.related, "https, cache-api");
		assert_eq!(form.source, "");

		let update = TermUpdate::from(form.to_new_term());
		assert_eq!(update.title, term.title);
		assert_eq!(update.definition, term.definition);
		assert_eq!(update.source, None);
		assert_eq!(update.category, term.category);
		assert_eq!(update.related_terms, term.related_terms);
	}
}

use std::collections::BTreeSet;

use crate::api::Term;

/// Current search box and category selector contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermFilter {
	search: String,
	category: Option<String>,
}

impl TermFilter {
	/// An empty `category` means "all categories".
	pub fn new(search: &str, category: &str) -> Self {
		Self {
			search: search.to_lowercase(),
			category: (!category.is_empty()).then(|| category.to_string()),
		}
	}

	pub fn matches(&self, term: &Term) -> bool {
		let text_ok = self.search.is_empty()
			|| term.keyword.to_lowercase().contains(&self.search)
			|| term.title.to_lowercase().contains(&self.search);
		let category_ok = match &self.category {
			Some(c) => term.category.as_deref() == Some(c.as_str()),
			None => true,
		};
		text_ok && category_ok
	}

	/// Lazily filtered view over `terms`, in their original order. Clone the
	/// iterator to walk it again.
	pub fn apply<'a>(&'a self, terms: &'a [Term]) -> impl Iterator<Item = &'a Term> + Clone + 'a {
		terms.iter().filter(move |t| self.matches(t))
	}
}

/// Sorted distinct non-empty categories across `terms`.
pub fn categories(terms: &[Term]) -> Vec<String> {
	terms
		.iter()
		.filter_map(|t| t.category.as_deref())
		.filter(|c| !c.is_empty())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_string)
		.collect()
}

/// Keep `current` if the rebuilt option list still offers it, otherwise fall
/// back to "all categories".
pub fn retain_selection(options: &[String], current: &str) -> String {
	if options.iter().any(|c| c == current) {
		current.to_string()
	} else {
		String::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn term(keyword: &str, title: &str, category: Option<&str>) -> Term {
		Term {
			keyword: keyword.into(),
			title: title.into(),
			category: category.map(Into::into),
			..Term::default()
		}
	}

	fn sample() -> Vec<Term> {
		vec![
			term("pwa", "Progressive Web Application (PWA)", Some("Концепция")),
			term("service-worker", "Service Worker", Some("Технология")),
			term("cache-api", "Cache API", Some("API")),
			term("background-sync", "Background Sync", Some("API")),
			term("https", "HTTPS", Some("Безопасность")),
			term("misc", "Misc", None),
			term("blank", "Blank", Some("")),
		]
	}

	#[test]
	fn empty_filter_is_identity() {
		let terms = sample();
		let filter = TermFilter::new("", "");
		let out: Vec<_> = filter.apply(&terms).cloned().collect();
		assert_eq!(out, terms);
	}

	#[test]
	fn search_matches_keyword_or_title_ignoring_case() {
		let terms = sample();
		for needle in ["WORKER", "api", "Sync", "s", "zzz"] {
			let filter = TermFilter::new(needle, "");
			let lower = needle.to_lowercase();
			let hit = |t: &Term| {
				t.keyword.to_lowercase().contains(&lower) || t.title.to_lowercase().contains(&lower)
			};
			let kept: Vec<_> = filter.apply(&terms).collect();
			assert!(kept.iter().all(|t| hit(t)), "{needle}");
			let excluded = terms.iter().filter(|t| !kept.contains(t));
			assert!(excluded.into_iter().all(|t| !hit(t)), "{needle}");
		}
	}

	#[test]
	fn search_and_category_are_conjunctive() {
		let terms = sample();
		let filter = TermFilter::new("c", "API");
		let keywords: Vec<_> = filter.apply(&terms).map(|t| t.keyword.as_str()).collect();
		assert_eq!(keywords, vec!["cache-api", "background-sync"]);

		let filter = TermFilter::new("https", "API");
		assert_eq!(filter.apply(&terms).count(), 0);
	}

	#[test]
	fn view_is_restartable() {
		let terms = sample();
		let filter = TermFilter::new("a", "");
		let view = filter.apply(&terms);
		assert_eq!(view.clone().count(), view.count());
	}

	#[test]
	fn categories_are_sorted_and_distinct() {
		let cats = categories(&sample());
		assert_eq!(cats, vec!["API", "Безопасность", "Концепция", "Технология"]);
		assert!(categories(&[]).is_empty());
	}

	#[test]
	fn selection_survives_only_if_still_offered() {
		let cats = categories(&sample());
		assert_eq!(retain_selection(&cats, "API"), "API");
		assert_eq!(retain_selection(&cats, "Дизайн"), "");
		assert_eq!(retain_selection(&cats, ""), "");
	}
}

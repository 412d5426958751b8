/// Make arbitrary text safe to splice into HTML markup.
pub fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::escape_html;

	#[test]
	fn markup_is_neutralised() {
		assert_eq!(
			escape_html(r#"<a href="x" onclick='y()'>R&D</a>"#),
			"&lt;a href=&quot;x&quot; onclick=&#39;y()&#39;&gt;R&amp;D&lt;/a&gt;"
		);
	}

	#[test]
	fn plain_and_non_ascii_text_is_untouched() {
		assert_eq!(escape_html("Прогрессивное веб-приложение"), "Прогрессивное веб-приложение");
		assert_eq!(escape_html(""), "");
	}
}

use serde_json::Value;
use thiserror::Error;

/// Failure of a single call against the glossary API.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Network failure or a body that could not be decoded.
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),
	/// Non-success status with a human-readable `detail` in the body.
	#[error("{detail} (status {status})")]
	Rejected { status: u16, detail: String },
	/// Non-success status without a usable `detail`.
	#[error("request failed with status {0}")]
	Status(u16),
	#[error("invalid API address: {0}")]
	Address(#[from] url::ParseError),
}

impl ApiError {
	/// Build the error for a non-success response from its raw body.
	pub fn from_status(status: u16, body: &str) -> Self {
		match serde_json::from_str::<Value>(body)
			.ok()
			.and_then(|v| v.get("detail").and_then(detail_text))
		{
			Some(detail) => ApiError::Rejected { status, detail },
			None => ApiError::Status(status),
		}
	}

	/// Text to show the user: the server's detail when present, `fallback` otherwise.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			ApiError::Rejected { detail, .. } => detail.clone(),
			_ => fallback.to_string(),
		}
	}
}

/// `detail` is either a plain message or a list of validation errors carrying `msg`.
fn detail_text(detail: &Value) -> Option<String> {
	match detail {
		Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
		Value::Array(items) => {
			let msgs: Vec<&str> = items
				.iter()
				.filter_map(|item| item.get("msg").and_then(Value::as_str))
				.collect();
			(!msgs.is_empty()).then(|| msgs.join("; "))
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn string_detail_becomes_the_message() {
		let err = ApiError::from_status(400, r#"{"detail": "Term 'pwa' already exists"}"#);
		assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
		assert_eq!(err.user_message("Failed to save"), "Term 'pwa' already exists");
	}

	#[test]
	fn validation_list_is_joined() {
		let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"},
			{"loc": ["body", "definition"], "msg": "too short"}]}"#;
		let err = ApiError::from_status(422, body);
		assert_eq!(err.user_message("x"), "field required; too short");
	}

	#[test]
	fn missing_or_non_json_detail_falls_back() {
		for body in ["<html>Bad gateway</html>", "{}", r#"{"detail": ""}"#, r#"{"detail": 5}"#] {
			let err = ApiError::from_status(502, body);
			assert!(matches!(err, ApiError::Status(502)), "{body}");
			assert_eq!(err.user_message("Failed to save"), "Failed to save");
		}
	}
}

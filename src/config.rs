use url::Url;

use crate::error::ApiError;

/// Base path of the glossary API, overridable at build time.
const DEFAULT_API_BASE: &str = match option_env!("GLOSSARY_API_BASE") {
	Some(base) => base,
	None => "/api",
};

/// Origin used when there is no browser window to resolve against.
const FALLBACK_ORIGIN: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct ApiConfig {
	pub base: Url,
}

impl ApiConfig {
	/// Resolve `base` against `origin`. The result always ends in `/` so that
	/// endpoint paths join underneath it.
	pub fn new(origin: &str, base: &str) -> Result<Self, ApiError> {
		let mut base = Url::parse(origin)?.join(base)?;
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}
		Ok(Self { base })
	}

	/// Configuration for the page the app is served from.
	pub fn from_window() -> Result<Self, ApiError> {
		let origin = web_sys::window()
			.and_then(|w| w.location().origin().ok())
			.filter(|o| o.starts_with("http"))
			.unwrap_or_else(|| FALLBACK_ORIGIN.to_string());
		Self::new(&origin, DEFAULT_API_BASE)
	}

	pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
		Ok(self.base.join(path)?)
	}
}

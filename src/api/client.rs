use log::{debug, error};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::types::{Graph, NewTerm, Term, TermSummary, TermUpdate};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// The operations the UI needs from the glossary service.
#[allow(async_fn_in_trait)]
pub trait GlossaryBackend {
	async fn list_terms(&self) -> Result<Vec<TermSummary>, ApiError>;
	async fn get_term(&self, keyword: &str) -> Result<Term, ApiError>;
	async fn create_term(&self, term: &NewTerm) -> Result<Term, ApiError>;
	async fn update_term(&self, keyword: &str, update: &TermUpdate) -> Result<Term, ApiError>;
	async fn delete_term(&self, keyword: &str) -> Result<(), ApiError>;
	async fn get_graph(&self) -> Result<Graph, ApiError>;
}

/// HTTP gateway: one request per call against the configured base.
#[derive(Clone, Debug)]
pub struct GlossaryApi {
	client: Client,
	config: ApiConfig,
}

impl GlossaryApi {
	pub fn new(config: ApiConfig) -> Self {
		Self {
			client: Client::new(),
			config,
		}
	}

	fn term_path(keyword: &str) -> String {
		format!("terms/{}", utf8_percent_encode(keyword, NON_ALPHANUMERIC))
	}

	fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
		let url = self.config.endpoint(path)?;
		debug!("{method} {url}");
		Ok(self.client.request(method, url))
	}

	async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
		let resp = req.send().await.inspect_err(|e| error!("transport: {e}"))?;
		let status = resp.status();
		if status.is_success() {
			return Ok(resp);
		}
		let body = resp.text().await.unwrap_or_default();
		let err = ApiError::from_status(status.as_u16(), &body);
		error!("{err}");
		Err(err)
	}

	async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
		Ok(self.send(req).await?.json().await?)
	}
}

impl GlossaryBackend for GlossaryApi {
	async fn list_terms(&self) -> Result<Vec<TermSummary>, ApiError> {
		self.json(self.request(Method::GET, "terms")?).await
	}

	async fn get_term(&self, keyword: &str) -> Result<Term, ApiError> {
		self.json(self.request(Method::GET, &Self::term_path(keyword))?)
			.await
	}

	async fn create_term(&self, term: &NewTerm) -> Result<Term, ApiError> {
		self.json(self.request(Method::POST, "terms")?.json(term))
			.await
	}

	async fn update_term(&self, keyword: &str, update: &TermUpdate) -> Result<Term, ApiError> {
		self.json(
			self.request(Method::PUT, &Self::term_path(keyword))?
				.json(update),
		)
		.await
	}

	async fn delete_term(&self, keyword: &str) -> Result<(), ApiError> {
		self.send(self.request(Method::DELETE, &Self::term_path(keyword))?)
			.await
			.map(|_| ())
	}

	async fn get_graph(&self) -> Result<Graph, ApiError> {
		self.json(self.request(Method::GET, "graph")?).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keywords_are_encoded_as_one_segment() {
		assert_eq!(GlossaryApi::term_path("pwa"), "terms/pwa");
		assert_eq!(GlossaryApi::term_path("a/b c"), "terms/a%2Fb%20c");

		let cfg = ApiConfig::new("http://localhost:8000", "/api").unwrap();
		let url = cfg.endpoint(&GlossaryApi::term_path("web-app?x")).unwrap();
		assert_eq!(url.as_str(), "http://localhost:8000/api/terms/web%2Dapp%3Fx");
	}
}

//! Client for the read-only content store.
//!
//! Uses web-sys fetch for WASM, reqwest for native.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{Paragraph, Project};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
	#[error("request failed: {0}")]
	Request(String),
	#[error("content store answered HTTP {0}")]
	Status(u16),
	#[error("could not decode response: {0}")]
	Decode(String),
}

/// Explicitly constructed handle to the content store; cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentClient {
	base_url: String,
}

impl ContentClient {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Paragraphs for one concept node, in the order the store returns them.
	pub async fn node_paragraphs(&self, node_id: &str) -> Result<Vec<Paragraph>, ContentError> {
		self.get(&node_path(node_id)).await
	}

	pub async fn projects(&self) -> Result<Vec<Project>, ContentError> {
		self.get("/api/projects").await
	}

	/// Every paragraph joined with its node title.
	pub async fn all_paragraphs(&self) -> Result<Vec<Paragraph>, ContentError> {
		self.get("/api").await
	}

	#[cfg(target_arch = "wasm32")]
	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ContentError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen_futures::JsFuture;
		use web_sys::{Request, RequestInit, RequestMode, Response};

		let url = self.url(path);

		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_mode(RequestMode::Cors);

		let request = Request::new_with_str_and_init(&url, &opts)
			.map_err(|e| ContentError::Request(format!("{e:?}")))?;

		let window = web_sys::window().ok_or_else(|| ContentError::Request("no window".into()))?;
		let resp_value = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| ContentError::Request(format!("{e:?}")))?;

		let resp: Response = resp_value
			.dyn_into()
			.map_err(|_| ContentError::Request("response is not a Response".into()))?;

		if !resp.ok() {
			return Err(ContentError::Status(resp.status()));
		}

		let json = JsFuture::from(
			resp.json()
				.map_err(|e| ContentError::Decode(format!("{e:?}")))?,
		)
		.await
		.map_err(|e| ContentError::Decode(format!("{e:?}")))?;

		serde_wasm_bindgen::from_value(json).map_err(|e| ContentError::Decode(e.to_string()))
	}

	#[cfg(not(target_arch = "wasm32"))]
	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ContentError> {
		let response = reqwest::Client::new()
			.get(self.url(path))
			.send()
			.await
			.map_err(|e| ContentError::Request(e.to_string()))?;

		if !response.status().is_success() {
			return Err(ContentError::Status(response.status().as_u16()));
		}

		let body = response
			.text()
			.await
			.map_err(|e| ContentError::Request(e.to_string()))?;
		serde_json::from_str(&body).map_err(|e| ContentError::Decode(e.to_string()))
	}
}

fn node_path(node_id: &str) -> String {
	format!("/api/{}", node_id.trim())
}

pub mod analytics;
pub mod authorization;
pub mod configuration;
pub mod network;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client, Response, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

pub const TENANT_HEADER: &str = "x-tenant-id";

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(api_key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

/// Non-success statuses become [`Error::Status`] carrying the response body.
pub(crate) async fn read_json(res: Response) -> Result<Value> {
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Status { status: status.as_u16(), body });
	}

	Ok(res.json().await?)
}

pub(crate) fn is_not_found(res: &Response) -> bool {
	res.status() == StatusCode::NOT_FOUND
}

use serde_json::Value;

use atv_config::ProviderConfig;

use crate::{Error, Result, TENANT_HEADER};

pub async fn is_user_authorized(
	cfg: &ProviderConfig,
	tenant_id: i32,
	username: &str,
	device_type: &str,
	device_id: &str,
) -> Result<bool> {
	let url = format!("{}/authorization", cfg.api_base);
	let body = serde_json::json!({
		"username": username,
		"deviceIdentifiers": [{ "id": device_id, "type": device_type }],
	});
	let res = crate::client(cfg.timeout_ms)?
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.header(TENANT_HEADER, tenant_id.to_string())
		.json(&body)
		.send()
		.await?;
	let json = crate::read_json(res).await?;

	parse_authorization_response(json)
}

fn parse_authorization_response(json: Value) -> Result<bool> {
	json.as_bool().or_else(|| json.get("authorized").and_then(Value::as_bool)).ok_or_else(|| {
		Error::InvalidResponse {
			message: "Authorization response is missing the authorized flag.".to_string(),
		}
	})
}

use serde_json::Value;

use atv_config::ConfigurationProviderConfig;
use atv_domain::PlatformConfiguration;

use crate::{Result, TENANT_HEADER};

/// `Ok(None)` when the tenant has no configuration of this type.
pub async fn get_configuration(
	cfg: &ConfigurationProviderConfig,
	tenant_id: i32,
	config_type: &str,
) -> Result<Option<PlatformConfiguration>> {
	let url = format!("{}/configuration", cfg.api_base);
	let res = crate::client(cfg.timeout_ms)?
		.get(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.header(TENANT_HEADER, tenant_id.to_string())
		.query(&[("type", config_type)])
		.send()
		.await?;

	if crate::is_not_found(&res) {
		return Ok(None);
	}

	let json = crate::read_json(res).await?;

	parse_configuration_response(json)
}

fn parse_configuration_response(json: Value) -> Result<Option<PlatformConfiguration>> {
	if json.is_null() {
		return Ok(None);
	}

	Ok(Some(serde_json::from_value(json)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn null_body_means_no_configuration() {
		assert!(parse_configuration_response(Value::Null).expect("parse failed").is_none());
	}

	#[test]
	fn missing_entries_default_to_empty() {
		let cfg = parse_configuration_response(serde_json::json!({ "type": "android_tv" }))
			.expect("parse failed")
			.expect("Expected configuration.");

		assert!(cfg.entries.is_empty());
	}
}

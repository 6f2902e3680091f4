use serde_json::Value;

use atv_config::ProviderConfig;
use atv_domain::{RawRecord, SearchResultEntry, SortField};

use crate::{Error, Result};

pub async fn count(cfg: &ProviderConfig, tenant_id: i32, table: &str, query: &str) -> Result<u64> {
	let body = serde_json::json!({ "tenantId": tenant_id, "tableName": table, "query": query });
	let json = post(cfg, "/search_count", &body).await?;

	parse_count_response(json)
}

pub async fn search(
	cfg: &ProviderConfig,
	tenant_id: i32,
	table: &str,
	query: &str,
	start: u64,
	count: u64,
	sort: &[SortField],
) -> Result<Vec<SearchResultEntry>> {
	let body = serde_json::json!({
		"tenantId": tenant_id,
		"tableName": table,
		"query": query,
		"start": start,
		"count": count,
		"sortBy": sort,
	});
	let json = post(cfg, "/search", &body).await?;

	parse_search_response(json)
}

pub async fn fetch(
	cfg: &ProviderConfig,
	tenant_id: i32,
	table: &str,
	ids: &[String],
) -> Result<Vec<RawRecord>> {
	let body = serde_json::json!({ "tenantId": tenant_id, "tableName": table, "ids": ids });
	let json = post(cfg, "/records", &body).await?;

	parse_records_response(json)
}

async fn post(cfg: &ProviderConfig, path: &str, body: &Value) -> Result<Value> {
	let url = format!("{}{}", cfg.api_base, path);

	tracing::debug!(%url, "Sending analytics request.");

	let res = crate::client(cfg.timeout_ms)?
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(body)
		.send()
		.await?;

	crate::read_json(res).await
}

fn parse_count_response(json: Value) -> Result<u64> {
	json.as_u64()
		.or_else(|| json.get("count").and_then(Value::as_u64))
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search count response must be a non-negative integer.".to_string(),
		})
}

fn parse_search_response(json: Value) -> Result<Vec<SearchResultEntry>> {
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut map) => match map.remove("results") {
			Some(Value::Array(items)) => items,
			_ => {
				return Err(Error::InvalidResponse {
					message: "Search response is missing results array.".to_string(),
				});
			},
		},
		_ => {
			return Err(Error::InvalidResponse {
				message: "Search response must be an array.".to_string(),
			});
		},
	};

	items.into_iter().map(|item| serde_json::from_value(item).map_err(Error::from)).collect()
}

fn parse_records_response(json: Value) -> Result<Vec<RawRecord>> {
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut map) => match map.remove("records") {
			Some(Value::Array(items)) => items,
			_ => {
				return Err(Error::InvalidResponse {
					message: "Records response is missing records array.".to_string(),
				});
			},
		},
		_ => {
			return Err(Error::InvalidResponse {
				message: "Records response must be an array.".to_string(),
			});
		},
	};

	items.into_iter().map(|item| serde_json::from_value(item).map_err(Error::from)).collect()
}

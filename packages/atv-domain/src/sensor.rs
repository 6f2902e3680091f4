//! Analytics records flattened into the sensor record shape returned to API callers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::search::SearchResultEntry;

/// Record as returned by the analytics fetch call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
	pub id: String,
	#[serde(default)]
	pub table_name: Option<String>,
	/// Epoch milliseconds.
	#[serde(default)]
	pub timestamp: i64,
	#[serde(default)]
	pub values: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
	Null,
	Boolean(bool),
	Integer(i64),
	Float(f64),
	Timestamp(#[serde(with = "crate::time_serde")] OffsetDateTime),
	Text(String),
}
impl SensorValue {
	/// Strings holding an RFC 3339 instant become [`SensorValue::Timestamp`]. Arrays and objects
	/// are kept as their JSON text.
	pub fn from_json(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(flag) => Self::Boolean(flag),
			Value::Number(number) => number
				.as_i64()
				.map(Self::Integer)
				.or_else(|| number.as_f64().map(Self::Float))
				.unwrap_or_else(|| Self::Text(number.to_string())),
			Value::String(text) => match OffsetDateTime::parse(&text, &Rfc3339) {
				Ok(ts) => Self::Timestamp(ts),
				Err(_) => Self::Text(text),
			},
			other => Self::Text(other.to_string()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
	pub id: String,
	pub table: Option<String>,
	pub timestamp: i64,
	pub values: BTreeMap<String, SensorValue>,
}
impl SensorRecord {
	pub fn from_raw(raw: RawRecord) -> Self {
		let values =
			raw.values.into_iter().map(|(name, value)| (name, SensorValue::from_json(value))).collect();

		Self { id: raw.id, table: raw.table_name, timestamp: raw.timestamp, values }
	}
}

/// Records in rank order plus the ranked identifiers that had no fetched record.
#[derive(Debug, Default)]
pub struct RankedRecords {
	pub records: Vec<SensorRecord>,
	pub missing: Vec<String>,
}

/// Duplicate identifiers overwrite earlier ones.
pub fn index_by_id<I>(records: I) -> HashMap<String, SensorRecord>
where
	I: IntoIterator<Item = RawRecord>,
{
	let mut by_id = HashMap::new();

	for raw in records {
		let record = SensorRecord::from_raw(raw);

		by_id.insert(record.id.clone(), record);
	}

	by_id
}

pub fn order_by_rank(
	by_id: &HashMap<String, SensorRecord>,
	entries: &[SearchResultEntry],
) -> RankedRecords {
	let mut ranked = RankedRecords { records: Vec::with_capacity(entries.len()), missing: Vec::new() };

	for entry in entries {
		match by_id.get(&entry.id) {
			Some(record) => ranked.records.push(record.clone()),
			None => ranked.missing.push(entry.id.clone()),
		}
	}

	ranked
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(id: &str, values: Value) -> RawRecord {
		serde_json::from_value(serde_json::json!({
			"id": id,
			"tableName": "ORG_HOMEAUTOMATION_ANDROIDTV_TEMPERATURE",
			"timestamp": 1_700_000_000_000_i64,
			"values": values,
		}))
		.expect("Failed to build raw record.")
	}

	fn entry(id: &str) -> SearchResultEntry {
		SearchResultEntry { id: id.to_string(), score: 1.0 }
	}

	#[test]
	fn converts_scalar_values() {
		let record = SensorRecord::from_raw(raw(
			"a",
			serde_json::json!({
				"meta_deviceId": "tv-1",
				"temperature": 21.5,
				"count": 3,
				"online": true,
				"meta_time": "2024-05-01T10:00:00Z",
				"note": null,
				"tags": ["x", "y"],
			}),
		));

		assert_eq!(record.id, "a");
		assert_eq!(record.table.as_deref(), Some("ORG_HOMEAUTOMATION_ANDROIDTV_TEMPERATURE"));
		assert_eq!(record.values["meta_deviceId"], SensorValue::Text("tv-1".to_string()));
		assert_eq!(record.values["temperature"], SensorValue::Float(21.5));
		assert_eq!(record.values["count"], SensorValue::Integer(3));
		assert_eq!(record.values["online"], SensorValue::Boolean(true));
		assert!(matches!(record.values["meta_time"], SensorValue::Timestamp(_)));
		assert_eq!(record.values["note"], SensorValue::Null);
		assert_eq!(record.values["tags"], SensorValue::Text("[\"x\",\"y\"]".to_string()));
	}

	#[test]
	fn later_duplicate_overwrites_earlier() {
		let by_id = index_by_id(vec![
			raw("a", serde_json::json!({ "v": 1 })),
			raw("a", serde_json::json!({ "v": 2 })),
		]);

		assert_eq!(by_id.len(), 1);
		assert_eq!(by_id["a"].values["v"], SensorValue::Integer(2));
	}

	#[test]
	fn orders_by_rank_and_reports_missing() {
		let by_id = index_by_id(vec![
			raw("a", serde_json::json!({})),
			raw("b", serde_json::json!({})),
			raw("c", serde_json::json!({})),
		]);
		let ranked = order_by_rank(&by_id, &[entry("c"), entry("x"), entry("a"), entry("b")]);
		let ids: Vec<&str> = ranked.records.iter().map(|record| record.id.as_str()).collect();

		assert_eq!(ids, vec!["c", "a", "b"]);
		assert_eq!(ranked.missing, vec!["x".to_string()]);
	}

	#[test]
	fn sensor_values_serialize_untagged() {
		let ts = OffsetDateTime::from_unix_timestamp(0).expect("Valid timestamp.");
		let json = serde_json::to_value(vec![
			SensorValue::Integer(7),
			SensorValue::Timestamp(ts),
			SensorValue::Text("on".to_string()),
		])
		.expect("Failed to serialize values.");

		assert_eq!(json, serde_json::json!([7, "1970-01-01T00:00:00Z", "on"]));
	}
}

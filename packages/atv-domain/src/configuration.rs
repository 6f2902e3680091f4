use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEntry {
	pub name: String,
	#[serde(default)]
	pub content_type: Option<String>,
	#[serde(default)]
	pub value: Value,
}
impl ConfigurationEntry {
	pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
		Self { name: name.into(), content_type: None, value: value.into() }
	}

	/// `None` for null values. Non-string scalars are rendered as JSON text.
	pub fn value_text(&self) -> Option<String> {
		match &self.value {
			Value::Null => None,
			Value::String(text) => Some(text.clone()),
			other => Some(other.to_string()),
		}
	}
}

/// Tenant-scoped platform configuration for one configuration type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlatformConfiguration {
	#[serde(default, rename = "type")]
	pub config_type: String,
	#[serde(default, rename = "configuration")]
	pub entries: Vec<ConfigurationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOverride {
	pub value: String,
	/// Number of entries carrying the key with a usable value.
	pub matches: usize,
}

/// Scans every entry; the last matching entry wins.
pub fn find_override(entries: &[ConfigurationEntry], key: &str) -> Option<EntryOverride> {
	let mut found = None;
	let mut matches = 0;

	for entry in entries.iter().filter(|entry| entry.name == key) {
		let Some(value) = entry.value_text() else {
			continue;
		};

		matches += 1;
		found = Some(value);
	}

	found.map(|value| EntryOverride { value, matches })
}

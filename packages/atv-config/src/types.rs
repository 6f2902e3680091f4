use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_CONFIG_TYPE: &str = "android_tv";
pub const DEFAULT_DEVICE_TYPE: &str = "android_tv";
pub const DEFAULT_MQTT_ENDPOINT: &str = "tcp://${mqtt.broker.host}:${mqtt.broker.port}";
pub const DEFAULT_MQTT_OVERRIDE_KEY: &str = "ANDROID_SENSE_MQTT_EP";
pub const DEFAULT_LOCALHOST_TOKEN: &str = "localhost";

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub analytics: ProviderConfig,
	pub configuration: ConfigurationProviderConfig,
	/// Optional. Without it device access is not checked before stats queries.
	pub authorization: Option<ProviderConfig>,
	#[serde(default)]
	pub mqtt: Mqtt,
	#[serde(default)]
	pub device: Device,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
	pub api_base: String,
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigurationProviderConfig {
	pub api_base: String,
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Platform configuration type holding the tenant's broker override.
	#[serde(default = "default_config_type")]
	pub config_type: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Mqtt {
	/// Endpoint template. `${name}` references are expanded from `properties`, then from the
	/// process environment.
	pub default_endpoint: String,
	/// Token replaced with the detected local address.
	pub localhost_token: String,
	/// Platform configuration entry name that overrides the computed endpoint.
	pub override_key: String,
	pub properties: HashMap<String, String>,
}
impl Default for Mqtt {
	fn default() -> Self {
		Self {
			default_endpoint: DEFAULT_MQTT_ENDPOINT.to_string(),
			localhost_token: DEFAULT_LOCALHOST_TOKEN.to_string(),
			override_key: DEFAULT_MQTT_OVERRIDE_KEY.to_string(),
			properties: default_mqtt_properties(),
		}
	}
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Device {
	pub device_type: String,
	/// Sensor type to analytics table name.
	pub sensor_tables: HashMap<String, String>,
	/// Optional. Upper bound for `to - from` on stats queries, in milliseconds.
	pub max_stats_window_ms: Option<i64>,
}
impl Default for Device {
	fn default() -> Self {
		Self {
			device_type: DEFAULT_DEVICE_TYPE.to_string(),
			sensor_tables: HashMap::new(),
			max_stats_window_ms: None,
		}
	}
}

fn default_config_type() -> String {
	DEFAULT_CONFIG_TYPE.to_string()
}

fn default_mqtt_properties() -> HashMap<String, String> {
	HashMap::from([
		("mqtt.broker.host".to_string(), DEFAULT_LOCALHOST_TOKEN.to_string()),
		("mqtt.broker.port".to_string(), "1883".to_string()),
	])
}

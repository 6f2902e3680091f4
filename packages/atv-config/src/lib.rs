mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, ConfigurationProviderConfig, DEFAULT_CONFIG_TYPE, DEFAULT_DEVICE_TYPE,
	DEFAULT_LOCALHOST_TOKEN, DEFAULT_MQTT_ENDPOINT, DEFAULT_MQTT_OVERRIDE_KEY, Device, Mqtt,
	ProviderConfig, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in
		[("service.http_bind", &cfg.service.http_bind), ("service.log_level", &cfg.service.log_level)]
	{
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	validate_provider("analytics", &cfg.analytics.api_base, cfg.analytics.timeout_ms)?;
	validate_provider(
		"configuration",
		&cfg.configuration.api_base,
		cfg.configuration.timeout_ms,
	)?;

	if let Some(authorization) = cfg.authorization.as_ref() {
		validate_provider("authorization", &authorization.api_base, authorization.timeout_ms)?;
	}

	if cfg.configuration.config_type.trim().is_empty() {
		return Err(Error::Validation {
			message: "configuration.config_type must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("mqtt.default_endpoint", &cfg.mqtt.default_endpoint),
		("mqtt.localhost_token", &cfg.mqtt.localhost_token),
		("mqtt.override_key", &cfg.mqtt.override_key),
		("device.device_type", &cfg.device.device_type),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (sensor, table) in &cfg.device.sensor_tables {
		if sensor.trim().is_empty() || table.trim().is_empty() {
			return Err(Error::Validation {
				message: "device.sensor_tables keys and values must be non-empty.".to_string(),
			});
		}
	}

	if let Some(window) = cfg.device.max_stats_window_ms
		&& window <= 0
	{
		return Err(Error::Validation {
			message: "device.max_stats_window_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_provider(label: &str, api_base: &str, timeout_ms: u64) -> Result<()> {
	if api_base.trim().is_empty() {
		return Err(Error::Validation { message: format!("{label}.api_base must be non-empty.") });
	}
	if timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{label}.timeout_ms must be greater than zero."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	trim_api_base(&mut cfg.analytics.api_base);
	trim_api_base(&mut cfg.configuration.api_base);

	if cfg.analytics.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.analytics.api_key = None;
	}
	if cfg.configuration.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.configuration.api_key = None;
	}

	if let Some(authorization) = cfg.authorization.as_mut() {
		trim_api_base(&mut authorization.api_base);

		if authorization.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
			authorization.api_key = None;
		}
	}
}

fn trim_api_base(api_base: &mut String) {
	let trimmed = api_base.trim().trim_end_matches('/').to_string();

	*api_base = trimmed;
}

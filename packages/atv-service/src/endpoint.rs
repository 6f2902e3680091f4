use std::net::IpAddr;

use atv_domain::{TenantContext, configuration, endpoint};

use crate::{AtvService, Error, NetworkEnvironment, Result};

pub const LOCALHOST: &str = "localhost";

impl AtvService {
	/// Broker endpoint for `tenant`.
	///
	/// Precedence, later wins: the configured template with `${name}` properties expanded, the
	/// localhost token replaced by the detected local address, then the tenant's platform
	/// configuration override. Address detection failure falls back to `localhost`.
	pub async fn resolve_mqtt_endpoint(&self, tenant: &TenantContext) -> Result<String> {
		let mqtt = &self.cfg.mqtt;
		let network = self.registry.require_network()?;
		let expansion =
			endpoint::expand_properties(&mqtt.default_endpoint, |name| network.property(name));

		if !expansion.unresolved.is_empty() {
			tracing::warn!(
				unresolved = ?expansion.unresolved,
				"Endpoint template references undefined properties."
			);
		}

		let host = server_host(network);
		let mut resolved = endpoint::substitute_host(&expansion.value, &mqtt.localhost_token, &host);
		let config_type = self.cfg.configuration.config_type.as_str();
		let platform = self
			.registry
			.require_configuration()?
			.get_configuration(tenant.tenant_id, config_type)
			.await
			.map_err(|source| Error::Configuration { config_type: config_type.to_string(), source })?;

		if let Some(platform) = platform
			&& let Some(found) = configuration::find_override(&platform.entries, &mqtt.override_key)
		{
			if found.matches > 1 {
				tracing::warn!(
					tenant_id = tenant.tenant_id,
					key = %mqtt.override_key,
					matches = found.matches,
					"Multiple endpoint overrides configured; using the last one."
				);
			}

			tracing::info!(tenant_id = tenant.tenant_id, "Using tenant MQTT endpoint override.");

			resolved = found.value;
		}

		Ok(resolved)
	}
}

/// Detected local address, or `localhost` when detection fails.
pub fn server_host(network: &dyn NetworkEnvironment) -> String {
	match network.local_ip_address() {
		Ok(IpAddr::V6(ip)) => format!("[{ip}]"),
		Ok(ip) => ip.to_string(),
		Err(err) => {
			tracing::warn!(error = %err, "Failed retrieving the local address; using localhost.");

			LOCALHOST.to_string()
		},
	}
}

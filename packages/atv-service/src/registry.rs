use std::{fmt, sync::Arc};

use atv_config::Config;

use crate::{
	AnalyticsApi, ConfigurationApi, DeviceAccessAuthorization, Error, HttpAnalytics,
	HttpAuthorization, HttpConfiguration, NetworkEnvironment, Result, SystemNetwork,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
	Analytics,
	Configuration,
	Network,
	Authorization,
}
impl Capability {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Analytics => "Analytics api",
			Self::Configuration => "Tenant configuration management",
			Self::Network => "Network environment",
			Self::Authorization => "Device access authorization",
		}
	}
}
impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Collaborators resolved once at startup, one handle per capability.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
	analytics: Option<Arc<dyn AnalyticsApi>>,
	configuration: Option<Arc<dyn ConfigurationApi>>,
	network: Option<Arc<dyn NetworkEnvironment>>,
	authorization: Option<Arc<dyn DeviceAccessAuthorization>>,
}
impl ServiceRegistry {
	/// HTTP collaborators for every configured capability. Authorization is registered only when
	/// the config carries an `[authorization]` section.
	pub fn from_config(cfg: &Config) -> Self {
		let registry = Self::default()
			.with_analytics(Arc::new(HttpAnalytics::new(cfg.analytics.clone())))
			.with_configuration(Arc::new(HttpConfiguration::new(cfg.configuration.clone())))
			.with_network(Arc::new(SystemNetwork::new(cfg.mqtt.properties.clone())));

		match cfg.authorization.clone() {
			Some(authorization) =>
				registry.with_authorization(Arc::new(HttpAuthorization::new(authorization))),
			None => registry,
		}
	}

	pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsApi>) -> Self {
		self.analytics = Some(analytics);

		self
	}

	pub fn with_configuration(mut self, configuration: Arc<dyn ConfigurationApi>) -> Self {
		self.configuration = Some(configuration);

		self
	}

	pub fn with_network(mut self, network: Arc<dyn NetworkEnvironment>) -> Self {
		self.network = Some(network);

		self
	}

	pub fn with_authorization(mut self, authorization: Arc<dyn DeviceAccessAuthorization>) -> Self {
		self.authorization = Some(authorization);

		self
	}

	pub fn require_analytics(&self) -> Result<&dyn AnalyticsApi> {
		self.analytics.as_deref().ok_or_else(|| unavailable(Capability::Analytics))
	}

	pub fn require_configuration(&self) -> Result<&dyn ConfigurationApi> {
		self.configuration.as_deref().ok_or_else(|| unavailable(Capability::Configuration))
	}

	pub fn require_network(&self) -> Result<&dyn NetworkEnvironment> {
		self.network.as_deref().ok_or_else(|| unavailable(Capability::Network))
	}

	pub fn require_authorization(&self) -> Result<&dyn DeviceAccessAuthorization> {
		self.authorization().ok_or_else(|| unavailable(Capability::Authorization))
	}

	/// Authorization is optional; `None` means device access is not checked.
	pub fn authorization(&self) -> Option<&dyn DeviceAccessAuthorization> {
		self.authorization.as_deref()
	}

	pub fn has(&self, capability: Capability) -> bool {
		match capability {
			Capability::Analytics => self.analytics.is_some(),
			Capability::Configuration => self.configuration.is_some(),
			Capability::Network => self.network.is_some(),
			Capability::Authorization => self.authorization.is_some(),
		}
	}
}

fn unavailable(capability: Capability) -> Error {
	let err = Error::ServiceUnavailable { capability };

	tracing::error!(%capability, "{err}");

	err
}

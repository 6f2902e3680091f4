pub mod endpoint;
pub mod events;
pub mod registry;
pub mod stats;

mod error;

pub use error::{Error, QueryOperation, Result};
pub use events::DeviceEventsRequest;
pub use registry::{Capability, ServiceRegistry};
pub use stats::{DeviceStatsRequest, device_stats_query};

use std::{collections::HashMap, future::Future, net::IpAddr, pin::Pin};

use atv_config::{Config, ConfigurationProviderConfig, ProviderConfig};
use atv_domain::{PlatformConfiguration, RawRecord, SearchResultEntry, SortField};
use atv_providers::{analytics, authorization, configuration, network};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct SearchArgs<'a> {
	pub tenant_id: i32,
	pub table: &'a str,
	pub query: &'a str,
	pub start: u64,
	pub count: u64,
	pub sort: &'a [SortField],
}

/// Read-only analytics search backend.
pub trait AnalyticsApi
where
	Self: Send + Sync,
{
	fn count<'a>(
		&'a self,
		tenant_id: i32,
		table: &'a str,
		query: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<u64>>;

	fn search<'a>(
		&'a self,
		args: SearchArgs<'a>,
	) -> BoxFuture<'a, atv_providers::Result<Vec<SearchResultEntry>>>;

	fn fetch<'a>(
		&'a self,
		tenant_id: i32,
		table: &'a str,
		ids: &'a [String],
	) -> BoxFuture<'a, atv_providers::Result<Vec<RawRecord>>>;
}

/// Tenant platform configuration store.
pub trait ConfigurationApi
where
	Self: Send + Sync,
{
	fn get_configuration<'a>(
		&'a self,
		tenant_id: i32,
		config_type: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<Option<PlatformConfiguration>>>;
}

pub trait NetworkEnvironment
where
	Self: Send + Sync,
{
	fn local_ip_address(&self) -> atv_providers::Result<IpAddr>;

	fn property(&self, name: &str) -> Option<String>;
}

pub trait DeviceAccessAuthorization
where
	Self: Send + Sync,
{
	fn is_user_authorized<'a>(
		&'a self,
		tenant_id: i32,
		username: &'a str,
		device_type: &'a str,
		device_id: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<bool>>;
}

pub struct HttpAnalytics {
	cfg: ProviderConfig,
}
impl HttpAnalytics {
	pub fn new(cfg: ProviderConfig) -> Self {
		Self { cfg }
	}
}
impl AnalyticsApi for HttpAnalytics {
	fn count<'a>(
		&'a self,
		tenant_id: i32,
		table: &'a str,
		query: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<u64>> {
		Box::pin(analytics::count(&self.cfg, tenant_id, table, query))
	}

	fn search<'a>(
		&'a self,
		args: SearchArgs<'a>,
	) -> BoxFuture<'a, atv_providers::Result<Vec<SearchResultEntry>>> {
		Box::pin(analytics::search(
			&self.cfg,
			args.tenant_id,
			args.table,
			args.query,
			args.start,
			args.count,
			args.sort,
		))
	}

	fn fetch<'a>(
		&'a self,
		tenant_id: i32,
		table: &'a str,
		ids: &'a [String],
	) -> BoxFuture<'a, atv_providers::Result<Vec<RawRecord>>> {
		Box::pin(analytics::fetch(&self.cfg, tenant_id, table, ids))
	}
}

pub struct HttpConfiguration {
	cfg: ConfigurationProviderConfig,
}
impl HttpConfiguration {
	pub fn new(cfg: ConfigurationProviderConfig) -> Self {
		Self { cfg }
	}
}
impl ConfigurationApi for HttpConfiguration {
	fn get_configuration<'a>(
		&'a self,
		tenant_id: i32,
		config_type: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<Option<PlatformConfiguration>>> {
		Box::pin(configuration::get_configuration(&self.cfg, tenant_id, config_type))
	}
}

pub struct HttpAuthorization {
	cfg: ProviderConfig,
}
impl HttpAuthorization {
	pub fn new(cfg: ProviderConfig) -> Self {
		Self { cfg }
	}
}
impl DeviceAccessAuthorization for HttpAuthorization {
	fn is_user_authorized<'a>(
		&'a self,
		tenant_id: i32,
		username: &'a str,
		device_type: &'a str,
		device_id: &'a str,
	) -> BoxFuture<'a, atv_providers::Result<bool>> {
		Box::pin(authorization::is_user_authorized(
			&self.cfg,
			tenant_id,
			username,
			device_type,
			device_id,
		))
	}
}

/// Host network plus the configured property table.
pub struct SystemNetwork {
	properties: HashMap<String, String>,
}
impl SystemNetwork {
	pub fn new(properties: HashMap<String, String>) -> Self {
		Self { properties }
	}
}
impl NetworkEnvironment for SystemNetwork {
	fn local_ip_address(&self) -> atv_providers::Result<IpAddr> {
		network::local_ip_address()
	}

	fn property(&self, name: &str) -> Option<String> {
		network::system_property(&self.properties, name)
	}
}

pub struct AtvService {
	pub cfg: Config,
	pub registry: ServiceRegistry,
}
impl AtvService {
	pub fn new(cfg: Config) -> Self {
		let registry = ServiceRegistry::from_config(&cfg);

		Self { cfg, registry }
	}

	pub fn with_registry(cfg: Config, registry: ServiceRegistry) -> Self {
		Self { cfg, registry }
	}
}

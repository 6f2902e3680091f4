use std::sync::Arc;

use atv_service::AtvService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<AtvService>,
}
impl AppState {
	/// Wires the HTTP collaborators described by `config`.
	pub fn new(config: atv_config::Config) -> Self {
		Self::from_service(AtvService::new(config))
	}

	pub fn from_service(service: AtvService) -> Self {
		Self { service: Arc::new(service) }
	}
}

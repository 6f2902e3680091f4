use std::fmt;

use crate::registry::Capability;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperation {
	Count,
	Search,
	Fetch,
}
impl QueryOperation {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Count => "count",
			Self::Search => "search",
			Self::Fetch => "fetch",
		}
	}
}
impl fmt::Display for QueryOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Access denied: {message}")]
	AccessDenied { message: String },
	#[error("{capability} service has not initialized.")]
	ServiceUnavailable { capability: Capability },
	#[error("Analytics {operation} failed: {source}")]
	BackendQuery { operation: QueryOperation, source: atv_providers::Error },
	#[error("Failed to read {config_type} platform configuration: {source}")]
	Configuration { config_type: String, source: atv_providers::Error },
	#[error("Device access authorization failed: {source}")]
	Authorization { source: atv_providers::Error },
}
impl Error {
	pub(crate) fn backend(operation: QueryOperation) -> impl FnOnce(atv_providers::Error) -> Self {
		move |source| Self::BackendQuery { operation, source }
	}
}

use serde::{Deserialize, Serialize};

/// Caller identity and tenant scope, passed explicitly to every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
	pub tenant_id: i32,
	pub tenant_domain: String,
	pub username: String,
}
impl TenantContext {
	pub fn new(
		tenant_id: i32,
		tenant_domain: impl Into<String>,
		username: impl Into<String>,
	) -> Self {
		Self { tenant_id, tenant_domain: tenant_domain.into(), username: username.into() }
	}

	/// Username without its `@<tenant_domain>` suffix.
	pub fn authenticated_user(&self) -> &str {
		if self.tenant_domain.is_empty() {
			return &self.username;
		}

		let suffix = format!("@{}", self.tenant_domain);

		self.username.strip_suffix(suffix.as_str()).unwrap_or(self.username.as_str())
	}
}

use atv_domain::{SensorRecord, SortField, TenantContext};

use crate::{AtvService, DeviceEventsRequest, Error, Result};

pub const TIME_FIELD: &str = "meta_time";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeviceStatsRequest {
	pub device_id: String,
	pub sensor_type: String,
	/// Epoch milliseconds, inclusive.
	pub from: i64,
	/// Epoch milliseconds, inclusive.
	pub to: i64,
}

pub fn device_stats_query(device_id: &str, device_type: &str, from: i64, to: i64) -> String {
	format!(
		"meta_deviceId:{device_id} AND meta_deviceType:{device_type} AND {TIME_FIELD} : [{from} TO {to}]"
	)
}

impl AtvService {
	/// Sensor events of one device in `[from, to]`, oldest first.
	pub async fn device_stats(
		&self,
		tenant: &TenantContext,
		req: &DeviceStatsRequest,
	) -> Result<Option<Vec<SensorRecord>>> {
		let device_id = req.device_id.trim();

		if device_id.is_empty() {
			return Err(Error::InvalidRequest { message: "device_id is required.".to_string() });
		}
		if !device_id.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')) {
			return Err(Error::InvalidRequest {
				message: "device_id may only contain letters, digits, '-', '_' and '.'.".to_string(),
			});
		}
		if req.from > req.to {
			return Err(Error::InvalidRequest {
				message: "from must not be later than to.".to_string(),
			});
		}
		if let Some(max) = self.cfg.device.max_stats_window_ms
			&& req.to.saturating_sub(req.from) > max
		{
			return Err(Error::InvalidRequest {
				message: format!("Stats window must not exceed {max} ms."),
			});
		}

		let sensor_type = req.sensor_type.trim();
		let Some(table) = self.cfg.device.sensor_tables.get(sensor_type) else {
			return Err(Error::InvalidRequest {
				message: format!("Unknown sensor type {sensor_type:?}."),
			});
		};

		self.authorize_device(tenant, device_id).await?;

		let device_type = self.cfg.device.device_type.as_str();
		let events = DeviceEventsRequest {
			table: table.clone(),
			query: device_stats_query(device_id, device_type, req.from, req.to),
			sort: vec![SortField::asc(TIME_FIELD)],
		};

		self.events_for_device(tenant, &events).await
	}

	async fn authorize_device(&self, tenant: &TenantContext, device_id: &str) -> Result<()> {
		let Some(authorization) = self.registry.authorization() else {
			return Ok(());
		};
		let user = tenant.authenticated_user();
		let allowed = authorization
			.is_user_authorized(tenant.tenant_id, user, &self.cfg.device.device_type, device_id)
			.await
			.map_err(|source| Error::Authorization { source })?;

		if !allowed {
			tracing::warn!(tenant_id = tenant.tenant_id, user, device_id, "Device access denied.");

			return Err(Error::AccessDenied {
				message: format!("User {user} is not authorized to access device {device_id}."),
			});
		}

		Ok(())
	}
}

use atv_domain::{SensorRecord, SortField, TenantContext, search, sensor};

use crate::{AtvService, Error, QueryOperation, Result, SearchArgs};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeviceEventsRequest {
	pub table: String,
	pub query: String,
	#[serde(default)]
	pub sort: Vec<SortField>,
}

impl AtvService {
	/// Every record matching `req.query`, in the rank order of the analytics search.
	///
	/// `Ok(None)` is the no-data signal: the backend counted zero matches and neither search nor
	/// fetch was issued. Ranked identifiers missing from the fetch response are dropped. The
	/// count and the search are separate reads, so a table written to in between may yield more
	/// or fewer entries than counted.
	pub async fn events_for_device(
		&self,
		tenant: &TenantContext,
		req: &DeviceEventsRequest,
	) -> Result<Option<Vec<SensorRecord>>> {
		let table = req.table.trim();

		if table.is_empty() {
			return Err(Error::InvalidRequest { message: "table is required.".to_string() });
		}

		let analytics = self.registry.require_analytics()?;
		let tenant_id = tenant.tenant_id;
		let count = analytics
			.count(tenant_id, table, &req.query)
			.await
			.map_err(Error::backend(QueryOperation::Count))?;

		if count == 0 {
			tracing::debug!(tenant_id, table, "No events matched.");

			return Ok(None);
		}

		let entries = analytics
			.search(SearchArgs {
				tenant_id,
				table,
				query: &req.query,
				start: 0,
				count,
				sort: &req.sort,
			})
			.await
			.map_err(Error::backend(QueryOperation::Search))?;

		if entries.len() as u64 != count {
			tracing::debug!(
				tenant_id,
				table,
				count,
				returned = entries.len(),
				"Search returned a different number of entries than counted."
			);
		}
		if entries.is_empty() {
			return Ok(Some(Vec::new()));
		}

		let ids = search::record_ids(&entries);
		let raw = analytics
			.fetch(tenant_id, table, &ids)
			.await
			.map_err(Error::backend(QueryOperation::Fetch))?;
		let by_id = sensor::index_by_id(raw);
		let ranked = sensor::order_by_rank(&by_id, &entries);

		if !ranked.missing.is_empty() {
			tracing::warn!(
				tenant_id,
				table,
				missing = ranked.missing.len(),
				"Dropping ranked events with no fetched record."
			);
		}

		tracing::debug!(tenant_id, table, returned = ranked.records.len(), "Fetched events.");

		Ok(Some(ranked.records))
	}
}

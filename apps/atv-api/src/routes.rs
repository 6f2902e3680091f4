use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use atv_domain::{SensorRecord, TenantContext};
use atv_service::{DeviceEventsRequest, DeviceStatsRequest, Error as ServiceError};

use crate::state::AppState;

pub const HEADER_TENANT_ID: &str = "x-tenant-id";
pub const HEADER_TENANT_DOMAIN: &str = "x-tenant-domain";
pub const HEADER_USERNAME: &str = "x-username";

#[derive(Debug, Deserialize)]
pub struct StatsParams {
	pub sensor_type: String,
	pub from: i64,
	pub to: i64,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
	pub records: Vec<SensorRecord>,
}

#[derive(Debug, Serialize)]
pub struct EndpointResponse {
	pub endpoint: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();

		match err {
			ServiceError::InvalidRequest { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::AccessDenied { .. } =>
				Self::new(StatusCode::FORBIDDEN, "ACCESS_DENIED", message),
			ServiceError::ServiceUnavailable { .. } =>
				Self::new(StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message),
			ServiceError::BackendQuery { .. } => {
				tracing::error!(error = %message, "Analytics query failed.");

				Self::new(StatusCode::BAD_GATEWAY, "BACKEND_QUERY_FAILED", message)
			},
			ServiceError::Configuration { .. } => {
				tracing::error!(error = %message, "Platform configuration lookup failed.");

				Self::new(StatusCode::BAD_GATEWAY, "CONFIGURATION_FAILED", message)
			},
			ServiceError::Authorization { .. } => {
				tracing::error!(error = %message, "Device access check failed.");

				Self::new(StatusCode::BAD_GATEWAY, "AUTHORIZATION_FAILED", message)
			},
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(rejection.status(), "INVALID_REQUEST", rejection.body_text())
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/events", post(events))
		.route("/v1/devices/{device_id}/stats", get(device_stats))
		.route("/v1/mqtt/endpoint", get(mqtt_endpoint))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn events(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<DeviceEventsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
	let tenant = tenant_context(&headers)?;
	let Json(payload) = payload?;
	let records = state.service.events_for_device(&tenant, &payload).await?;

	Ok(records_response(records))
}

async fn device_stats(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(device_id): Path<String>,
	params: Result<Query<StatsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
	let tenant = tenant_context(&headers)?;
	let Query(params) = params?;
	let req = DeviceStatsRequest {
		device_id,
		sensor_type: params.sensor_type,
		from: params.from,
		to: params.to,
	};
	let records = state.service.device_stats(&tenant, &req).await?;

	Ok(records_response(records))
}

async fn mqtt_endpoint(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<EndpointResponse>, ApiError> {
	let tenant = tenant_context(&headers)?;
	let endpoint = state.service.resolve_mqtt_endpoint(&tenant).await?;

	Ok(Json(EndpointResponse { endpoint }))
}

/// No data is `204 No Content`; an empty search page is still `200` with no records.
fn records_response(records: Option<Vec<SensorRecord>>) -> Response {
	match records {
		Some(records) => Json(EventsResponse { records }).into_response(),
		None => StatusCode::NO_CONTENT.into_response(),
	}
}

fn tenant_context(headers: &HeaderMap) -> Result<TenantContext, ApiError> {
	let tenant_id = required_header(headers, HEADER_TENANT_ID)?;
	let tenant_id = tenant_id.parse::<i32>().map_err(|_| {
		ApiError::new(
			StatusCode::BAD_REQUEST,
			"INVALID_TENANT",
			format!("{HEADER_TENANT_ID} must be an integer."),
		)
	})?;
	let tenant_domain = required_header(headers, HEADER_TENANT_DOMAIN)?;
	let username = required_header(headers, HEADER_USERNAME)?;

	Ok(TenantContext::new(tenant_id, tenant_domain, username))
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, ApiError> {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.ok_or_else(|| {
			ApiError::new(StatusCode::BAD_REQUEST, "INVALID_TENANT", format!("{name} is required."))
		})
}

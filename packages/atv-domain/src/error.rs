pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid sort field {raw:?}; expected `field` or `field:asc|desc`.")]
	InvalidSortField { raw: String },
}

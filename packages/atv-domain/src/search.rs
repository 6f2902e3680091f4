use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier plus score as ranked by the analytics search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultEntry {
	pub id: String,
	#[serde(default)]
	pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
	#[default]
	Asc,
	Desc,
}
impl SortOrder {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}
}

/// Accepts either the backend object `{field, sortType}` or the text form `field[:asc|desc]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SortFieldRepr")]
pub struct SortField {
	pub field: String,
	#[serde(rename = "sortType")]
	pub order: SortOrder,
}
impl SortField {
	pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
		Self { field: field.into(), order }
	}

	pub fn asc(field: impl Into<String>) -> Self {
		Self::new(field, SortOrder::Asc)
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self::new(field, SortOrder::Desc)
	}
}
impl FromStr for SortField {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let invalid = || Error::InvalidSortField { raw: raw.to_string() };
		let (field, order) = match raw.split_once(':') {
			Some((field, order)) => {
				let order = match order.trim().to_ascii_lowercase().as_str() {
					"asc" => SortOrder::Asc,
					"desc" => SortOrder::Desc,
					_ => return Err(invalid()),
				};

				(field.trim(), order)
			},
			None => (raw.trim(), SortOrder::Asc),
		};

		if field.is_empty() {
			return Err(invalid());
		}

		Ok(Self::new(field, order))
	}
}
impl TryFrom<SortFieldRepr> for SortField {
	type Error = Error;

	fn try_from(repr: SortFieldRepr) -> Result<Self, Self::Error> {
		match repr {
			SortFieldRepr::Text(raw) => raw.parse(),
			SortFieldRepr::Object { field, order } => {
				if field.trim().is_empty() {
					return Err(Error::InvalidSortField { raw: field });
				}

				Ok(Self::new(field.trim(), order))
			},
		}
	}
}
impl fmt::Display for SortField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.field, self.order.as_str().to_ascii_lowercase())
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SortFieldRepr {
	Text(String),
	Object {
		field: String,
		#[serde(default, rename = "sortType")]
		order: SortOrder,
	},
}

pub fn record_ids(entries: &[SearchResultEntry]) -> Vec<String> {
	entries.iter().map(|entry| entry.id.clone()).collect()
}

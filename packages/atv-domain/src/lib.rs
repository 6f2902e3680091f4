pub mod configuration;
pub mod endpoint;
pub mod search;
pub mod sensor;
pub mod tenant;
pub mod time_serde;

mod error;

pub use configuration::{ConfigurationEntry, EntryOverride, PlatformConfiguration};
pub use error::{Error, Result};
pub use search::{SearchResultEntry, SortField, SortOrder};
pub use sensor::{RankedRecords, RawRecord, SensorRecord, SensorValue};
pub use tenant::TenantContext;

//! Financial movements (revenues and expenses) of the selected period.
//!
//! # Modules
//!
//! - `types` - `Movement`, `MovementKind`, `MovementTotals`
//! - `normalize` - Omie and BomControle records into `Movement`
//! - `cache` - Per-range TTL cache of full result sets
//! - `filter` - Local filters and pagination
//! - `payables` - Title status badges and page summary

pub mod cache;
mod fields;
pub mod filter;
pub mod normalize;
pub mod payables;
pub mod types;

#[cfg(test)]
mod props;

pub use cache::{CacheEntry, MovementCache};
pub use fields::parse_date;
pub use filter::{MovementFilter, filter, filter_page};
pub use normalize::{UpstreamSource, normalize, normalize_all};
pub use payables::{PayablesSummary, SettlementFilter, TitleStatus};
pub use types::{Movement, MovementKind, MovementTotals, categories};

//! Core client logic for Finnza.
//!
//! This crate contains pure logic with ZERO HTTP dependencies. Normalized
//! domain types, caching, filtering and categorization rules live here.
//!
//! # Modules
//!
//! - `movement` - Financial movements, normalization, cache and filters
//! - `contract` - Contracts, charges and kanban categorization
//! - `date_range` - Date range picker state machine
//! - `debounce` - Search input debouncing
//! - `request` - Stale response guard
//! - `clock` - Injectable time source

pub mod clock;
pub mod contract;
pub mod date_range;
pub mod debounce;
pub mod movement;
pub mod request;

pub use clock::{Clock, ManualClock, SystemClock};
pub use date_range::{DateRange, DateRangeError, DateRangePicker};
pub use debounce::Debouncer;
pub use request::{RequestTicket, RequestTracker};

//! Period selection for the movements page.
//!
//! # Modules
//!
//! - `range` - Committed `DateRange` and its cache key
//! - `picker` - Two-click range picker state machine
//! - `calendar` - Month grid and pt-BR labels
//! - `error` - Parse errors for ISO input

pub mod calendar;
pub mod error;
pub mod picker;
pub mod range;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarDay, calendar_days, month_label};
pub use error::DateRangeError;
pub use picker::{DateRangePicker, PickerState};
pub use range::DateRange;

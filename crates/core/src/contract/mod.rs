//! Customer contracts, their charges and the kanban categorization.
//!
//! # Modules
//!
//! - `types` - `Contract`, `Charge` and their status enums
//! - `categorize` - Priority-ordered category rules
//! - `board` - Category totals and kanban columns

pub mod board;
pub mod categorize;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use board::{CategoryTotal, CategoryTotals, KanbanBoard, KanbanColumn};
pub use categorize::{categorize, count_late_charges};
pub use types::{Charge, ChargeStatus, ChargeSummary, Contract, ContractCategory, ContractStatus};

//! Contract categorization for the kanban board.
//!
//! Rules are evaluated in priority order and the first match wins. A
//! missing due date is neither before nor on/after today, so every rule
//! that looks at the contract due date is skipped for undated contracts.

use chrono::NaiveDate;

use super::types::{ChargeStatus, Contract, ContractCategory, ContractStatus};

/// Number of late charges of `contract` as of `today`.
#[must_use]
pub fn count_late_charges(contract: &Contract, today: NaiveDate) -> usize {
    contract.charges.iter().filter(|c| c.is_late(today)).count()
}

/// Places `contract` in exactly one kanban column as of `today`.
#[must_use]
pub fn categorize(contract: &Contract, today: NaiveDate) -> ContractCategory {
    if let Some(category) = contract.category {
        return category;
    }

    let late = count_late_charges(contract, today);
    if late >= 2 {
        return ContractCategory::Delinquent;
    }
    if late == 1 {
        return ContractCategory::Late;
    }

    let due_before_today = contract.due_date.is_some_and(|d| d < today);
    let due_from_today = contract.due_date.is_some_and(|d| d >= today);

    match contract.status {
        ContractStatus::Overdue => return ContractCategory::Late,
        ContractStatus::Signed if due_before_today => return ContractCategory::Late,
        ContractStatus::Paid => return ContractCategory::Current,
        _ => {}
    }

    let charges = &contract.charges;
    if !charges.is_empty() {
        let any_settled = charges.iter().any(|c| c.is_settled());
        let all_pending = charges.iter().all(|c| c.status == ChargeStatus::Pending);
        if any_settled || (all_pending && due_from_today) {
            return ContractCategory::Current;
        }
    }

    if contract.status == ContractStatus::Signed && due_from_today {
        return ContractCategory::Current;
    }

    ContractCategory::Pending
}

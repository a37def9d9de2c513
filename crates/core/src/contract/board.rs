//! Category totals and the kanban board.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categorize::categorize;
use super::types::{Contract, ContractCategory};

/// Count and value of one group of contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Number of contracts.
    pub count: u64,
    /// Sum of contract values.
    pub value: Decimal,
}

impl CategoryTotal {
    fn add(&mut self, value: Decimal) {
        self.count += 1;
        self.value += value;
    }
}

/// Totals per category plus the overall total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// `em-dia`.
    pub current: CategoryTotal,
    /// `pendente`.
    pub pending: CategoryTotal,
    /// `em-atraso`.
    pub late: CategoryTotal,
    /// `inadimplente`.
    pub delinquent: CategoryTotal,
    /// Every contract.
    pub overall: CategoryTotal,
}

impl CategoryTotals {
    /// Categorizes and sums `contracts` as of `today`.
    #[must_use]
    pub fn from_contracts(contracts: &[Contract], today: NaiveDate) -> Self {
        let mut totals = Self::default();
        for contract in contracts {
            totals
                .get_mut(categorize(contract, today))
                .add(contract.value);
            totals.overall.add(contract.value);
        }
        totals
    }

    /// Total of one category.
    #[must_use]
    pub const fn get(&self, category: ContractCategory) -> CategoryTotal {
        match category {
            ContractCategory::Current => self.current,
            ContractCategory::Pending => self.pending,
            ContractCategory::Late => self.late,
            ContractCategory::Delinquent => self.delinquent,
        }
    }

    fn get_mut(&mut self, category: ContractCategory) -> &mut CategoryTotal {
        match category {
            ContractCategory::Current => &mut self.current,
            ContractCategory::Pending => &mut self.pending,
            ContractCategory::Late => &mut self.late,
            ContractCategory::Delinquent => &mut self.delinquent,
        }
    }
}

/// One kanban column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    /// Category shown in this column.
    pub category: ContractCategory,
    /// Contracts in input order.
    pub contracts: Vec<Contract>,
    /// Count and value of the column.
    pub total: CategoryTotal,
}

/// The four-column contract board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanBoard {
    /// Columns in [`ContractCategory::BOARD_ORDER`].
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Distributes `contracts` over the columns as of `today`.
    #[must_use]
    pub fn build(contracts: &[Contract], today: NaiveDate) -> Self {
        let mut columns: Vec<KanbanColumn> = ContractCategory::BOARD_ORDER
            .iter()
            .map(|&category| KanbanColumn {
                category,
                contracts: Vec::new(),
                total: CategoryTotal::default(),
            })
            .collect();

        for contract in contracts {
            let category = categorize(contract, today);
            if let Some(column) = columns.iter_mut().find(|c| c.category == category) {
                column.total.add(contract.value);
                column.contracts.push(contract.clone());
            }
        }
        Self { columns }
    }

    /// Column for `category`.
    #[must_use]
    pub fn column(&self, category: ContractCategory) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.category == category)
    }
}

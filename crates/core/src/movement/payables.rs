//! Payable and receivable titles (`contas-pagar` / `contas-receber`).
//!
//! Titles are normalized [`Movement`]s; this module adds the badge
//! classification, the status filter and the page summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Movement;

/// Badge shown next to a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStatus {
    /// Settled title.
    Paid,
    /// Past due.
    Overdue,
    /// Due today.
    DueToday,
    /// Not yet due.
    Upcoming,
    /// Upstream gave nothing recognizable.
    Unknown,
}

impl TitleStatus {
    /// Classifies a title from its settled flag and status text.
    #[must_use]
    pub fn classify(title: &Movement) -> Self {
        if title.settled {
            return Self::Paid;
        }
        let status = title.status.to_uppercase();
        if status.contains("ATRASADO") {
            Self::Overdue
        } else if status.contains("VENCE HOJE") {
            Self::DueToday
        } else if status.contains("A VENCER") || status.contains("PENDENTE") {
            Self::Upcoming
        } else {
            Self::Unknown
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::Upcoming => "upcoming",
            Self::Unknown => "unknown",
        }
    }
}

/// Label shown in the status column: the upstream text when present.
#[must_use]
pub fn status_label(title: &Movement) -> String {
    if !title.status.is_empty() {
        title.status.clone()
    } else if title.settled {
        "Pago".to_string()
    } else {
        "Pendente".to_string()
    }
}

/// Status filter of the payables page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementFilter {
    /// Every title.
    #[default]
    All,
    /// Settled titles only.
    Paid,
    /// Open titles only.
    Pending,
}

impl SettlementFilter {
    /// Parses `"pago"` / `"pendente"`; anything else means all.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pago" | "paid" => Self::Paid,
            "pendente" | "pending" => Self::Pending,
            _ => Self::All,
        }
    }
}

/// Filters titles by settlement and a free-text search over the
/// counterparty, document, installment, note and status.
#[must_use]
pub fn filter_titles(titles: &[Movement], status: SettlementFilter, search: &str) -> Vec<Movement> {
    let needle = search.trim().to_lowercase();
    titles
        .iter()
        .filter(|t| match status {
            SettlementFilter::All => true,
            SettlementFilter::Paid => t.settled,
            SettlementFilter::Pending => !t.settled,
        })
        .filter(|t| {
            needle.is_empty()
                || [
                    &t.counterparty,
                    &t.name,
                    &t.installment_number,
                    &t.note,
                    &t.status,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Summary cards of the payables page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayablesSummary {
    /// Number of titles.
    pub count: usize,
    /// Sum of every title.
    pub total: Decimal,
    /// Sum of settled titles.
    pub paid: Decimal,
    /// Sum of open titles.
    pub pending: Decimal,
}

impl PayablesSummary {
    /// Sums `titles`.
    #[must_use]
    pub fn from_movements(titles: &[Movement]) -> Self {
        titles.iter().fold(
            Self {
                count: titles.len(),
                ..Self::default()
            },
            |mut acc, t| {
                acc.total += t.amount;
                if t.settled {
                    acc.paid += t.amount;
                } else {
                    acc.pending += t.amount;
                }
                acc
            },
        )
    }
}

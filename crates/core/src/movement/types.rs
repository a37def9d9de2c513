//! Movement domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Money coming in (`receita`).
    Revenue,
    /// Money going out (`despesa`).
    Expense,
}

impl MovementKind {
    /// Returns the kind matching a debit flag.
    #[must_use]
    pub const fn from_debit(is_debit: bool) -> Self {
        if is_debit { Self::Expense } else { Self::Revenue }
    }

    /// Whether movements of this kind are debits.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::Expense)
    }

    /// Query-string value used by the backend (`receita` / `despesa`).
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Revenue => "receita",
            Self::Expense => "despesa",
        }
    }

    /// Parses both the backend and the English spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "receita" | "revenue" => Some(Self::Revenue),
            "despesa" | "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// One financial transaction or installment, normalized from any upstream.
///
/// Missing upstream fields become empty strings, zero, or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Upstream identifier of the installment.
    pub id: String,
    /// `true` for expenses, `false` for revenue.
    pub is_debit: bool,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Accounting (competence) date.
    pub accounting_date: Option<NaiveDate>,
    /// Settlement date, once paid.
    pub settlement_date: Option<NaiveDate>,
    /// Amount in reais.
    pub amount: Decimal,
    /// Document label.
    pub name: String,
    /// Free-text note.
    pub note: String,
    /// Client or supplier name.
    pub counterparty: String,
    /// Financial category name.
    pub category: String,
    /// Upstream status text (e.g. `ATRASADO`, `A VENCER`).
    pub status: String,
    /// Installment number as text (`"4"`).
    pub installment_number: String,
    /// Total installments, when known.
    pub installment_count: Option<u32>,
    /// Payment method name.
    pub payment_method: String,
    /// Whether the title has been paid.
    pub settled: bool,
}

impl Movement {
    /// Kind of this movement.
    #[must_use]
    pub const fn kind(&self) -> MovementKind {
        MovementKind::from_debit(self.is_debit)
    }

    /// `"4/13"` style installment label, or the bare number.
    #[must_use]
    pub fn installment_label(&self) -> String {
        match self.installment_count {
            Some(count) if !self.installment_number.is_empty() => {
                format!("{}/{count}", self.installment_number)
            }
            _ => self.installment_number.clone(),
        }
    }
}

/// Aggregate totals of a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    /// Sum of revenue amounts.
    pub revenue: Decimal,
    /// Sum of expense amounts.
    pub expense: Decimal,
    /// `revenue - expense`.
    pub net: Decimal,
}

impl MovementTotals {
    /// Builds totals from revenue and expense, deriving the net.
    #[must_use]
    pub fn new(revenue: Decimal, expense: Decimal) -> Self {
        Self {
            revenue,
            expense,
            net: revenue - expense,
        }
    }

    /// Sums the movements locally.
    #[must_use]
    pub fn from_movements(movements: &[Movement]) -> Self {
        let (revenue, expense) =
            movements
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(rev, exp), mov| {
                    if mov.is_debit {
                        (rev, exp + mov.amount)
                    } else {
                        (rev + mov.amount, exp)
                    }
                });
        Self::new(revenue, expense)
    }

    /// Prefers the aggregates the server computed over the whole range.
    ///
    /// A missing expense counts as zero and a missing net is derived. Without
    /// a revenue figure the server totals are ignored and the movements are
    /// summed locally.
    #[must_use]
    pub fn resolve(
        revenue: Option<Decimal>,
        expense: Option<Decimal>,
        net: Option<Decimal>,
        movements: &[Movement],
    ) -> Self {
        match revenue {
            Some(revenue) => {
                let expense = expense.unwrap_or(Decimal::ZERO);
                Self {
                    revenue,
                    expense,
                    net: net.unwrap_or(revenue - expense),
                }
            }
            None => Self::from_movements(movements),
        }
    }
}

/// Unique, non-empty category names, sorted.
#[must_use]
pub fn categories(movements: &[Movement]) -> Vec<String> {
    let set: std::collections::BTreeSet<&str> = movements
        .iter()
        .map(|m| m.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

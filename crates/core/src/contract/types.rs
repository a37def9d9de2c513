//! Contract domain types.
//!
//! Status enums accept both the backend spelling (`EM_DIA`, `VENCIDO`) and
//! the lowercase UI spelling (`em-dia`, `vencido`).

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// Awaiting signature.
    #[default]
    Pending,
    /// Signed and running (`EM_DIA` on the backend).
    Signed,
    /// Past its due date.
    Overdue,
    /// Fully paid.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl ContractStatus {
    /// Returns the UI spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Signed => "assinado",
            Self::Overdue => "vencido",
            Self::Paid => "pago",
            Self::Cancelled => "cancelado",
        }
    }

    /// Returns the spelling used in `/api/contratos/status/{status}`.
    #[must_use]
    pub const fn as_backend(self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::Signed => "ASSINADO",
            Self::Overdue => "VENCIDO",
            Self::Paid => "PAGO",
            Self::Cancelled => "CANCELADO",
        }
    }

    /// Parses any known spelling. Unknown text counts as [`Self::Pending`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ASSINADO" | "EM_DIA" => Self::Signed,
            "VENCIDO" => Self::Overdue,
            "PAGO" => Self::Paid,
            "CANCELADO" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kanban column a contract falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractCategory {
    /// `em-dia`: running normally.
    #[serde(rename = "em-dia")]
    Current,
    /// `pendente`: not started or awaiting a first charge.
    #[serde(rename = "pendente")]
    Pending,
    /// `em-atraso`: exactly one late charge, or past due.
    #[serde(rename = "em-atraso")]
    Late,
    /// `inadimplente`: two or more late charges.
    #[serde(rename = "inadimplente")]
    Delinquent,
}

impl ContractCategory {
    /// Columns in board order.
    pub const BOARD_ORDER: [Self; 4] = [Self::Current, Self::Late, Self::Pending, Self::Delinquent];

    /// Returns the UI spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "em-dia",
            Self::Pending => "pendente",
            Self::Late => "em-atraso",
            Self::Delinquent => "inadimplente",
        }
    }

    /// Column title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "Em Dia",
            Self::Pending => "Pendente",
            Self::Late => "Em Atraso",
            Self::Delinquent => "Inadimplente",
        }
    }

    /// Parses the backend (`EM_ATRASO`) or UI (`em-atraso`) spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "em-dia" => Some(Self::Current),
            "pendente" => Some(Self::Pending),
            "em-atraso" => Some(Self::Late),
            "inadimplente" => Some(Self::Delinquent),
            _ => None,
        }
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Charge status as reported by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    /// Issued, not paid.
    Pending,
    /// Paid.
    Received,
    /// Past due.
    Overdue,
    /// Refunded.
    Refunded,
    /// Cash receipt that was undone.
    ReceivedInCashUndone,
    /// Chargeback opened.
    ChargebackRequested,
    /// Chargeback under dispute.
    ChargebackDispute,
    /// Chargeback being reversed.
    AwaitingChargebackReversal,
    /// Sent to collection.
    DunningRequested,
    /// Recovered through collection.
    DunningReceived,
    /// Held for risk analysis.
    AwaitingRiskAnalysis,
    /// Anything the provider adds later.
    #[serde(other)]
    Unknown,
}

impl ChargeStatus {
    /// Parses the provider spelling; unrecognized text is [`Self::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "RECEIVED" => Self::Received,
            "OVERDUE" => Self::Overdue,
            "REFUNDED" => Self::Refunded,
            "RECEIVED_IN_CASH_UNDONE" => Self::ReceivedInCashUndone,
            "CHARGEBACK_REQUESTED" => Self::ChargebackRequested,
            "CHARGEBACK_DISPUTE" => Self::ChargebackDispute,
            "AWAITING_CHARGEBACK_REVERSAL" => Self::AwaitingChargebackReversal,
            "DUNNING_REQUESTED" => Self::DunningRequested,
            "DUNNING_RECEIVED" => Self::DunningReceived,
            "AWAITING_RISK_ANALYSIS" => Self::AwaitingRiskAnalysis,
            _ => Self::Unknown,
        }
    }

    /// Statuses that count a charge as late regardless of its date.
    #[must_use]
    pub const fn is_late_status(self) -> bool {
        matches!(
            self,
            Self::Overdue | Self::DunningRequested | Self::ChargebackRequested
        )
    }
}

/// One billed installment of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// Backend id.
    pub id: String,
    /// Billed value.
    pub value: Decimal,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Payment date, once paid.
    pub payment_date: Option<NaiveDate>,
    /// Provider status.
    pub status: ChargeStatus,
    /// Installment number.
    pub installment: Option<u32>,
}

impl Charge {
    /// `RECEIVED` or `RECEIVED_IN_CASH_UNDONE`.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(
            self.status,
            ChargeStatus::Received | ChargeStatus::ReceivedInCashUndone
        )
    }

    /// Paid, or recovered through collection.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.is_paid() || matches!(self.status, ChargeStatus::DunningReceived)
    }

    /// `PENDING` with a due date strictly before `today`.
    #[must_use]
    pub fn is_pending_past_due(&self, today: NaiveDate) -> bool {
        self.status == ChargeStatus::Pending && self.due_date.is_some_and(|d| d < today)
    }

    /// Counts toward the late-charge total used by categorization.
    #[must_use]
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.status.is_late_status() || self.is_pending_past_due(today)
    }

    /// Drives the red badge on the charge list.
    #[must_use]
    pub fn is_overdue_for_display(&self, today: NaiveDate) -> bool {
        self.is_late(today) || self.status == ChargeStatus::ChargebackDispute
    }
}

/// A customer contract with its charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Backend id.
    pub id: String,
    /// Contract title.
    pub title: String,
    /// Customer display name.
    pub counterparty: String,
    /// Contract value.
    pub value: Decimal,
    /// Contract due date.
    pub due_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: ContractStatus,
    /// Billed installments.
    pub charges: Vec<Charge>,
    /// Category computed by the backend, when it sent one.
    pub category: Option<ContractCategory>,
}

/// Per-contract charge breakdown shown in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSummary {
    /// Settled charges.
    pub paid: usize,
    /// Charges flagged overdue for display.
    pub overdue: usize,
    /// `PENDING` charges not yet overdue.
    pub pending: usize,
    /// Charges sorted by due date, undated last.
    pub charges: Vec<Charge>,
}

impl ChargeSummary {
    /// Builds the summary for `charges` as of `today`.
    #[must_use]
    pub fn from_charges(charges: &[Charge], today: NaiveDate) -> Self {
        let mut sorted = charges.to_vec();
        sorted.sort_by_key(|c| (c.due_date.is_none(), c.due_date, c.installment));

        Self {
            paid: charges.iter().filter(|c| c.is_paid()).count(),
            overdue: charges
                .iter()
                .filter(|c| c.is_overdue_for_display(today))
                .count(),
            pending: charges
                .iter()
                .filter(|c| c.status == ChargeStatus::Pending && !c.is_pending_past_due(today))
                .count(),
            charges: sorted,
        }
    }
}

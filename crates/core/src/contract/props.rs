//! Property-based tests for contract categorization.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::types::fixtures::{charge, contract};
use super::*;

fn arb_charge_status() -> impl Strategy<Value = ChargeStatus> {
    prop_oneof![
        Just(ChargeStatus::Pending),
        Just(ChargeStatus::Received),
        Just(ChargeStatus::Overdue),
        Just(ChargeStatus::Refunded),
        Just(ChargeStatus::ReceivedInCashUndone),
        Just(ChargeStatus::ChargebackRequested),
        Just(ChargeStatus::ChargebackDispute),
        Just(ChargeStatus::AwaitingChargebackReversal),
        Just(ChargeStatus::DunningRequested),
        Just(ChargeStatus::DunningReceived),
        Just(ChargeStatus::AwaitingRiskAnalysis),
        Just(ChargeStatus::Unknown),
    ]
}

fn arb_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![
        Just(None),
        (-120i64..120).prop_map(|offset| Some(today() + Duration::days(offset))),
    ]
}

fn arb_contract() -> impl Strategy<Value = Contract> {
    (
        prop_oneof![
            Just("pendente"),
            Just("assinado"),
            Just("EM_DIA"),
            Just("vencido"),
            Just("pago"),
            Just("cancelado"),
        ],
        arb_date(),
        prop::collection::vec((arb_charge_status(), arb_date()), 0..6),
    )
        .prop_map(|(status, due, charges)| {
            let charges = charges.into_iter().map(|(s, d)| charge(s, d)).collect();
            contract(status, due, charges)
        })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Feeding a computed category back in as the server category
    /// changes nothing.
    #[test]
    fn prop_categorize_is_idempotent(c in arb_contract()) {
        let first = categorize(&c, today());
        let mut tagged = c.clone();
        tagged.category = Some(first);
        prop_assert_eq!(categorize(&tagged, today()), first);
        prop_assert_eq!(categorize(&c, today()), first);
    }

    /// Two or more late charges always means delinquent.
    #[test]
    fn prop_two_late_is_delinquent(c in arb_contract()) {
        if count_late_charges(&c, today()) >= 2 {
            prop_assert_eq!(categorize(&c, today()), ContractCategory::Delinquent);
        }
    }

    /// Every contract lands in exactly one column.
    #[test]
    fn prop_board_partitions_contracts(cs in prop::collection::vec(arb_contract(), 0..20)) {
        let board = KanbanBoard::build(&cs, today());
        let placed: usize = board.columns.iter().map(|col| col.contracts.len()).sum();
        prop_assert_eq!(placed, cs.len());

        let totals = CategoryTotals::from_contracts(&cs, today());
        for col in &board.columns {
            prop_assert_eq!(col.total, totals.get(col.category));
        }
    }
}

//! Categorization rule table and board tests.

use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal_macros::dec;

use super::types::fixtures::{charge, contract};
use super::*;

const TODAY: (i32, u32, u32) = (2025, 3, 18);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

fn past() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 1, 10)
}

fn future() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 6, 10)
}

use ChargeStatus as C;
use ContractCategory as K;

#[rstest]
#[case::two_overdue_signed_is_delinquent("assinado", future(), vec![C::Overdue, C::Overdue], K::Delinquent)]
#[case::dunning_and_chargeback("pago", future(), vec![C::DunningRequested, C::ChargebackRequested], K::Delinquent)]
#[case::one_late_charge("assinado", future(), vec![C::Overdue, C::Received], K::Late)]
#[case::overdue_status_no_charges("vencido", past(), vec![], K::Late)]
#[case::signed_past_due("assinado", past(), vec![], K::Late)]
#[case::paid_status("pago", past(), vec![], K::Current)]
#[case::some_settled("pendente", future(), vec![C::DunningReceived, C::Refunded], K::Current)]
#[case::all_pending_future_due("pendente", future(), vec![C::Pending, C::Pending], K::Current)]
#[case::all_pending_no_due("pendente", None, vec![C::Pending], K::Pending)]
#[case::signed_future_due("EM_DIA", future(), vec![], K::Current)]
#[case::pending_status("pendente", future(), vec![], K::Pending)]
#[case::cancelled_defaults_pending("cancelado", past(), vec![C::Refunded], K::Pending)]
#[case::signed_without_due_date("assinado", None, vec![], K::Pending)]
fn test_categorize_rules(
    #[case] status: &str,
    #[case] due: Option<NaiveDate>,
    #[case] statuses: Vec<ChargeStatus>,
    #[case] expected: ContractCategory,
) {
    let charges = statuses.into_iter().map(|s| charge(s, future())).collect();
    let c = contract(status, due, charges);
    assert_eq!(categorize(&c, today()), expected);
}

#[test]
fn test_pending_charge_past_due_counts_as_late() {
    let c = contract(
        "assinado",
        future(),
        vec![charge(C::Pending, past()), charge(C::Pending, NaiveDate::from_ymd_opt(2025, 3, 17))],
    );
    assert_eq!(count_late_charges(&c, today()), 2);
    assert_eq!(categorize(&c, today()), K::Delinquent);
}

#[test]
fn test_pending_charge_due_today_is_not_late() {
    let c = contract("pendente", past(), vec![charge(C::Pending, Some(today()))]);
    assert_eq!(count_late_charges(&c, today()), 0);
    // All pending but the contract itself is past due.
    assert_eq!(categorize(&c, today()), K::Pending);
}

#[test]
fn test_server_category_wins() {
    let mut c = contract("vencido", past(), vec![charge(C::Overdue, past()), charge(C::Overdue, past())]);
    c.category = Some(K::Current);
    assert_eq!(categorize(&c, today()), K::Current);
}

#[test]
fn test_category_totals() {
    let mut a = contract("pago", past(), vec![]);
    a.value = dec!(1500);
    let mut b = contract("vencido", past(), vec![]);
    b.value = dec!(300.50);
    let mut c = contract("pendente", future(), vec![]);
    c.value = dec!(200);

    let totals = CategoryTotals::from_contracts(&[a, b, c], today());
    assert_eq!(totals.current.count, 1);
    assert_eq!(totals.current.value, dec!(1500));
    assert_eq!(totals.get(K::Late).value, dec!(300.50));
    assert_eq!(totals.pending.count, 1);
    assert_eq!(totals.delinquent, CategoryTotal::default());
    assert_eq!(totals.overall.count, 3);
    assert_eq!(totals.overall.value, dec!(2000.50));
}

#[test]
fn test_kanban_columns_in_order() {
    let contracts = vec![
        contract("pendente", future(), vec![]),
        contract("assinado", future(), vec![C::Overdue, C::Overdue].into_iter().map(|s| charge(s, past())).collect()),
        contract("pago", past(), vec![]),
    ];
    let board = KanbanBoard::build(&contracts, today());

    let order: Vec<_> = board.columns.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(order, vec!["em-dia", "em-atraso", "pendente", "inadimplente"]);
    assert_eq!(board.column(K::Current).unwrap().contracts.len(), 1);
    assert!(board.column(K::Late).unwrap().contracts.is_empty());
    assert_eq!(board.column(K::Pending).unwrap().total.count, 1);
    assert_eq!(board.column(K::Delinquent).unwrap().total.value, dec!(1000));

    let placed: usize = board.columns.iter().map(|c| c.contracts.len()).sum();
    assert_eq!(placed, contracts.len());
}

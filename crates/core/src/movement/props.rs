//! Property-based tests for the movement cache and local filtering.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use finnza_shared::types::PageRequest;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::clock::ManualClock;
use crate::date_range::DateRange;
use crate::movement::cache::MovementCache;
use crate::movement::filter::{MovementFilter, filter_page};
use crate::movement::types::{Movement, MovementKind, MovementTotals, fixtures};

const CATEGORIES: [&str; 3] = ["Vendas", "Aluguel", "Impostos"];
const WORDS: [&str; 4] = ["Energia", "ACME", "Consultoria", "Central"];

fn arb_movement() -> impl Strategy<Value = Movement> {
    (
        any::<u16>(),
        any::<bool>(),
        0i64..1_000_000,
        0usize..CATEGORIES.len(),
        0usize..WORDS.len(),
        0usize..WORDS.len(),
    )
        .prop_map(|(id, debit, cents, cat, name, party)| {
            let mut m = fixtures::movement(&id.to_string(), debit, Decimal::new(cents, 2));
            m.category = CATEGORIES[cat].to_string();
            m.name = WORDS[name].to_string();
            m.counterparty = WORDS[party].to_lowercase();
            m
        })
}

fn arb_filter() -> impl Strategy<Value = MovementFilter> {
    (
        prop_oneof![
            Just(None),
            Just(Some(MovementKind::Revenue)),
            Just(Some(MovementKind::Expense))
        ],
        prop_oneof![Just(None), (0usize..CATEGORIES.len()).prop_map(Some)],
        prop_oneof![Just(None), Just(Some("en".to_string())), Just(Some("ACME".to_string()))],
    )
        .prop_map(|(kind, cat, search_text)| MovementFilter {
            kind,
            category: cat.map(|i| CATEGORIES[i].to_string()),
            search_text,
        })
}

fn arb_range() -> impl Strategy<Value = DateRange> {
    (0i64..400, 0i64..60).prop_map(|(offset, len)| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        DateRange::between(base, base + Duration::days(len))
    })
}

/// Reference query: what the backend would return for the same filters.
fn direct_query(data: &[Movement], f: &MovementFilter, page: u32, per_page: u32) -> Vec<Movement> {
    let search = f.search_text.as_ref().map(|s| s.to_lowercase());
    data.iter()
        .filter(|m| f.kind.is_none_or(|k| m.is_debit == k.is_debit()))
        .filter(|m| f.category.as_ref().is_none_or(|c| &m.category == c))
        .filter(|m| {
            search.as_ref().is_none_or(|s| {
                m.name.to_lowercase().contains(s)
                    || m.counterparty.to_lowercase().contains(s)
                    || m.note.to_lowercase().contains(s)
            })
        })
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .cloned()
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A page served from a fresh entry equals the direct query.
    #[test]
    fn prop_cached_page_equals_direct_query(
        data in prop::collection::vec(arb_movement(), 0..80),
        criteria in arb_filter(),
        page in 1u32..6,
        per_page in 1u32..25,
    ) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 18, 9, 0, 0).unwrap());
        let cache = MovementCache::with_clock(300, 10, clock.clone());
        let range = DateRange::unbounded();
        cache.put(&range, data.clone(), MovementTotals::from_movements(&data));
        clock.advance(Duration::seconds(120));

        let entry = cache.get(&range).unwrap();
        let served = filter_page(&entry.movements, &criteria, PageRequest::new(page, per_page));
        prop_assert_eq!(served.data, direct_query(&data, &criteria, page, per_page));
    }

    /// Writing one range never changes another range's entry.
    #[test]
    fn prop_entries_are_independent(
        r1 in arb_range(),
        r2 in arb_range(),
        first in prop::collection::vec(arb_movement(), 0..10),
        second in prop::collection::vec(arb_movement(), 0..10),
    ) {
        prop_assume!(r1 != r2);
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 18, 9, 0, 0).unwrap());
        let cache = MovementCache::with_clock(300, 10, clock);

        cache.put(&r1, first.clone(), MovementTotals::from_movements(&first));
        cache.put(&r2, second.clone(), MovementTotals::from_movements(&second));
        cache.invalidate_range(&r2);

        let entry = cache.get(&r1).unwrap();
        prop_assert_eq!(&entry.movements, &first);
        prop_assert!(cache.get(&r2).is_none());
    }

    /// Totals always satisfy net = revenue - expense.
    #[test]
    fn prop_totals_net(data in prop::collection::vec(arb_movement(), 0..50)) {
        let totals = MovementTotals::from_movements(&data);
        prop_assert_eq!(totals.net, totals.revenue - totals.expense);
    }
}

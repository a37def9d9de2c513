//! Tests for the date range picker, calendar and range parsing.

use chrono::{Datelike, NaiveDate, Weekday};

use super::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn picker() -> DateRangePicker {
    DateRangePicker::new(DateRange::unbounded(), d(2025, 3, 18))
}

#[test]
fn test_reverse_pick_is_normalized() {
    let mut p = picker();
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 10));
    p.select(d(2025, 3, 5));

    assert_eq!(
        p.state(),
        PickerState::Complete {
            start: d(2025, 3, 5),
            end: d(2025, 3, 10)
        }
    );
    let applied = p.apply().unwrap();
    assert_eq!(applied.start, Some(d(2025, 3, 5)));
    assert_eq!(applied.end, Some(d(2025, 3, 10)));
    assert!(!p.is_open());
}

#[test]
fn test_open_resets_tentative_state() {
    let mut p = picker();
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 1));
    p.cancel();

    p.open(d(2025, 4, 2));
    assert_eq!(p.state(), PickerState::SelectingStart);
    assert_eq!(p.visible_month(), d(2025, 4, 1));
}

#[test]
fn test_third_click_starts_over() {
    let mut p = picker();
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 1));
    p.select(d(2025, 3, 9));
    p.select(d(2025, 3, 20));

    assert_eq!(p.state(), PickerState::SelectingEnd { start: d(2025, 3, 20) });
}

#[test]
fn test_apply_incomplete_only_closes() {
    let mut p = picker();
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 1));

    assert!(p.apply().is_none());
    assert!(!p.is_open());
    assert!(p.committed().is_unbounded());
}

#[test]
fn test_cancel_keeps_committed_range() {
    let committed = DateRange::between(d(2025, 1, 1), d(2025, 1, 31));
    let mut p = DateRangePicker::new(committed, d(2025, 3, 18));
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 1));
    p.select(d(2025, 3, 2));
    p.cancel();

    assert_eq!(p.committed(), committed);
    assert_eq!(p.state(), PickerState::Closed);
}

#[test]
fn test_clear_reports_change() {
    let committed = DateRange::between(d(2025, 1, 1), d(2025, 1, 31));
    let mut p = DateRangePicker::new(committed, d(2025, 3, 18));

    assert!(p.clear());
    assert!(p.committed().is_unbounded());
    assert!(!p.clear());
}

#[test]
fn test_hover_preview() {
    let mut p = picker();
    p.open(d(2025, 3, 18));
    p.select(d(2025, 3, 10));
    p.hover(Some(d(2025, 3, 4)));

    assert!(p.is_between(d(2025, 3, 7)));
    assert!(!p.is_between(d(2025, 3, 4)));
    assert!(!p.is_between(d(2025, 3, 10)));
    assert!(p.is_start(d(2025, 3, 10)));
    assert_eq!(p.state(), PickerState::SelectingEnd { start: d(2025, 3, 10) });

    p.hover(None);
    assert!(!p.is_between(d(2025, 3, 7)));
}

#[test]
fn test_toggle() {
    let mut p = picker();
    p.toggle(d(2025, 3, 18));
    assert!(p.is_open());
    p.toggle(d(2025, 3, 18));
    assert!(!p.is_open());
}

#[test]
fn test_month_navigation_and_label() {
    let mut p = picker();
    assert_eq!(p.month_label(), "março de 2025");
    p.prev_month();
    p.prev_month();
    p.prev_month();
    assert_eq!(p.month_label(), "dezembro de 2024");
    p.next_month();
    assert_eq!(p.visible_month(), d(2025, 1, 1));
}

#[test]
fn test_calendar_grid_is_sunday_first_whole_weeks() {
    // March 2025 starts on a Saturday and ends on a Monday.
    let days = calendar_days(d(2025, 3, 1));
    assert_eq!(days.len() % 7, 0);
    assert_eq!(days.len(), 42);
    assert_eq!(days[0].date, d(2025, 2, 23));
    assert_eq!(days[0].date.weekday(), Weekday::Sun);
    assert!(!days[0].in_current_month);
    assert_eq!(days[6].date, d(2025, 3, 1));
    assert!(days[6].in_current_month);
    assert_eq!(days.iter().filter(|c| c.in_current_month).count(), 31);
    assert_eq!(days.last().unwrap().date, d(2025, 4, 5));
}

#[test]
fn test_calendar_grid_exact_fit() {
    // February 2026 starts on a Sunday and ends on a Saturday.
    let days = calendar_days(d(2026, 2, 10));
    assert_eq!(days.len(), 28);
    assert!(days.iter().all(|c| c.in_current_month));
}

#[test]
fn test_parse_and_cache_key() {
    let range = DateRange::parse("2025-03-01", "2025-03-31").unwrap();
    assert_eq!(range.cache_key(), "2025-03-01_2025-03-31");

    let open = DateRange::parse("2025-03-01", "").unwrap();
    assert_eq!(open.cache_key(), "2025-03-01_sem_data");
    assert_eq!(DateRange::unbounded().cache_key(), "sem_data_sem_data");

    let until = DateRange::parse("", "2025-03-31").unwrap();
    assert_eq!(until.cache_key(), "sem_data_2025-03-31");
}

#[test]
fn test_parse_rejects_bad_input() {
    assert_eq!(
        DateRange::parse("01/03/2025", ""),
        Err(DateRangeError::InvalidDate("01/03/2025".into()))
    );
    assert!(matches!(
        DateRange::parse("2025-03-10", "2025-03-05"),
        Err(DateRangeError::Inverted { .. })
    ));
}

#[test]
fn test_adjacent_ranges_have_distinct_keys() {
    let a = DateRange::between(d(2025, 3, 1), d(2025, 3, 31));
    let b = DateRange::between(d(2025, 3, 1), d(2025, 4, 1));
    assert_ne!(a.cache_key(), b.cache_key());
}

#[test]
fn test_contains() {
    let range = DateRange::between(d(2025, 3, 1), d(2025, 3, 31));
    assert!(range.contains(d(2025, 3, 31)));
    assert!(!range.contains(d(2025, 4, 1)));
    assert!(DateRange::unbounded().contains(d(1999, 1, 1)));
}

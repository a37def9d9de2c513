//! Month grid for the picker.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The day.
    pub date: NaiveDate,
    /// False for the padding days of adjacent months.
    pub in_current_month: bool,
}

/// First day of the month containing `day`.
#[must_use]
pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// `"março de 2025"`.
#[must_use]
pub fn month_label(month: NaiveDate) -> String {
    let name = MONTHS_PT_BR[month.month0() as usize];
    format!("{name} de {}", month.year())
}

/// Sunday-first grid for `month`, padded to whole weeks.
#[must_use]
pub fn calendar_days(month: NaiveDate) -> Vec<CalendarDay> {
    let first = first_of_month(month);
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let grid_start = first - Duration::days(lead);

    let mut days = Vec::with_capacity(42);
    let mut cursor = grid_start;
    loop {
        let in_current_month = cursor.month() == first.month() && cursor.year() == first.year();
        days.push(CalendarDay {
            date: cursor,
            in_current_month,
        });
        cursor += Duration::days(1);

        let past_month = cursor.month() != first.month() || cursor.year() != first.year();
        if past_month && cursor > first && days.len() % 7 == 0 {
            break;
        }
    }
    days
}

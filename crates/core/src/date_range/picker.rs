//! Two-click date range picker.
//!
//! The picker holds a tentative selection separate from the committed
//! [`DateRange`]. Only [`DateRangePicker::apply`] and
//! [`DateRangePicker::clear`] change what the page loads.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{self, CalendarDay};
use super::range::DateRange;

/// Tentative selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PickerState {
    /// Popup hidden.
    Closed,
    /// Popup shown, nothing chosen yet.
    SelectingStart,
    /// First day chosen, waiting for the second.
    SelectingEnd {
        /// The first day clicked.
        start: NaiveDate,
    },
    /// Both days chosen; `start <= end`.
    Complete {
        /// Earlier day.
        start: NaiveDate,
        /// Later day.
        end: NaiveDate,
    },
}

/// Picker bound to the committed range of a page.
#[derive(Debug, Clone)]
pub struct DateRangePicker {
    state: PickerState,
    committed: DateRange,
    hover: Option<NaiveDate>,
    visible_month: NaiveDate,
}

impl DateRangePicker {
    /// A closed picker over `committed`, showing `today`'s month.
    #[must_use]
    pub fn new(committed: DateRange, today: NaiveDate) -> Self {
        Self {
            state: PickerState::Closed,
            committed,
            hover: None,
            visible_month: calendar::first_of_month(today),
        }
    }

    /// Current tentative state.
    #[must_use]
    pub const fn state(&self) -> PickerState {
        self.state
    }

    /// The range the page loads.
    #[must_use]
    pub const fn committed(&self) -> DateRange {
        self.committed
    }

    /// Whether the popup is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != PickerState::Closed
    }

    /// Shows the popup with a fresh selection on `today`'s month.
    pub fn open(&mut self, today: NaiveDate) {
        self.state = PickerState::SelectingStart;
        self.hover = None;
        self.visible_month = calendar::first_of_month(today);
    }

    /// Opens when closed, closes when open.
    pub fn toggle(&mut self, today: NaiveDate) {
        if self.is_open() {
            self.cancel();
        } else {
            self.open(today);
        }
    }

    /// Registers a click on `day`.
    pub fn select(&mut self, day: NaiveDate) {
        self.state = match self.state {
            PickerState::SelectingEnd { start } => {
                let (start, end) = if start <= day { (start, day) } else { (day, start) };
                PickerState::Complete { start, end }
            }
            PickerState::Closed | PickerState::SelectingStart | PickerState::Complete { .. } => {
                PickerState::SelectingEnd { start: day }
            }
        };
    }

    /// Updates the hover preview. Never changes the selection.
    pub fn hover(&mut self, day: Option<NaiveDate>) {
        self.hover = day;
    }

    /// Commits a complete selection and closes.
    ///
    /// Returns the new range when one was committed, so the caller can
    /// reload. An incomplete selection just closes the popup.
    pub fn apply(&mut self) -> Option<DateRange> {
        let applied = match self.state {
            PickerState::Complete { start, end } => {
                self.committed = DateRange::between(start, end);
                Some(self.committed)
            }
            _ => None,
        };
        self.close();
        applied
    }

    /// Closes without touching the committed range.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Empties the committed range. Returns whether it changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.committed.is_unbounded();
        self.committed = DateRange::unbounded();
        self.hover = None;
        if self.is_open() {
            self.state = PickerState::SelectingStart;
        }
        changed
    }

    fn close(&mut self) {
        self.state = PickerState::Closed;
        self.hover = None;
    }

    /// Tentative first day.
    #[must_use]
    pub const fn tentative_start(&self) -> Option<NaiveDate> {
        match self.state {
            PickerState::SelectingEnd { start } | PickerState::Complete { start, .. } => {
                Some(start)
            }
            PickerState::Closed | PickerState::SelectingStart => None,
        }
    }

    /// Tentative last day.
    #[must_use]
    pub const fn tentative_end(&self) -> Option<NaiveDate> {
        match self.state {
            PickerState::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Whether `day` is the highlighted start.
    #[must_use]
    pub fn is_start(&self, day: NaiveDate) -> bool {
        self.tentative_start() == Some(day)
    }

    /// Whether `day` is the highlighted end.
    #[must_use]
    pub fn is_end(&self, day: NaiveDate) -> bool {
        self.tentative_end() == Some(day)
    }

    /// Whether `day` lies strictly inside the tentative selection, using
    /// the hovered day as the end while the second click is pending.
    #[must_use]
    pub fn is_between(&self, day: NaiveDate) -> bool {
        let Some(start) = self.tentative_start() else {
            return false;
        };
        let Some(end) = self.tentative_end().or(self.hover) else {
            return false;
        };
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        a < day && day < b
    }

    /// First day of the month on screen.
    #[must_use]
    pub const fn visible_month(&self) -> NaiveDate {
        self.visible_month
    }

    /// Shows the previous month.
    pub fn prev_month(&mut self) {
        if let Some(month) = self.visible_month.checked_sub_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    /// Shows the next month.
    pub fn next_month(&mut self) {
        if let Some(month) = self.visible_month.checked_add_months(Months::new(1)) {
            self.visible_month = month;
        }
    }

    /// pt-BR label of the month on screen.
    #[must_use]
    pub fn month_label(&self) -> String {
        calendar::month_label(self.visible_month)
    }

    /// Grid of the month on screen.
    #[must_use]
    pub fn calendar_days(&self) -> Vec<CalendarDay> {
        calendar::calendar_days(self.visible_month)
    }
}

//! Local filtering and pagination over a cached result set.

use finnza_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};

use super::types::{Movement, MovementKind};

/// UI filters applied on top of a date range.
///
/// `None` (or blank text) means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    /// Revenue or expense only.
    pub kind: Option<MovementKind>,
    /// Exact category name.
    pub category: Option<String>,
    /// Case-insensitive substring over name, counterparty and note.
    pub search_text: Option<String>,
}

impl MovementFilter {
    /// True when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.category().is_none() && self.search().is_none()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn search(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single movement passes every set constraint.
    #[must_use]
    pub fn matches(&self, movement: &Movement) -> bool {
        self.matches_with(movement, self.search().as_deref())
    }

    fn matches_with(&self, movement: &Movement, needle: Option<&str>) -> bool {
        if let Some(kind) = self.kind {
            if movement.is_debit != kind.is_debit() {
                return false;
            }
        }
        if let Some(category) = self.category() {
            if movement.category != category {
                return false;
            }
        }
        needle.is_none_or(|needle| {
            [&movement.name, &movement.counterparty, &movement.note]
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
        })
    }
}

/// Applies `criteria` to `movements`, preserving order.
#[must_use]
pub fn filter(movements: &[Movement], criteria: &MovementFilter) -> Vec<Movement> {
    let needle = criteria.search();
    movements
        .iter()
        .filter(|m| criteria.matches_with(m, needle.as_deref()))
        .cloned()
        .collect()
}

/// Filters then slices `[(page-1)*per_page, page*per_page)`.
#[must_use]
pub fn filter_page(
    movements: &[Movement],
    criteria: &MovementFilter,
    page: PageRequest,
) -> PageResponse<Movement> {
    let filtered = filter(movements, criteria);
    PageResponse::from_slice(&filtered, page)
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use evdesk_graphql::EventFilterInput;

/// Number of events requested per page.
pub const EVENTS_PER_PAGE: u32 = 20;

/// Which events to list, exactly one is selected at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FilterSelection {
    /// Every event.
    #[default]
    All,

    /// Events that have not ended yet.
    Current,

    /// Events that have already ended.
    Expired,
}

impl FilterSelection {
    /// All selections, in display order.
    pub const ALL: [FilterSelection; 3] = [Self::All, Self::Current, Self::Expired];

    /// Value of the `currentCheck` query flag.
    pub fn current_check(self) -> bool {
        self == Self::Current
    }

    /// Value of the `expiredCheck` query flag.
    pub fn expired_check(self) -> bool {
        self == Self::Expired
    }

    /// Value of the "All" radio button.
    pub fn all_check(self) -> bool {
        self == Self::All
    }
}

const ALL: &str = "All";
const CURRENT: &str = "Current";
const EXPIRED: &str = "Expired";

impl AsRef<str> for FilterSelection {
    fn as_ref(&self) -> &str {
        match self {
            FilterSelection::All => ALL,
            FilterSelection::Current => CURRENT,
            FilterSelection::Expired => EXPIRED,
        }
    }
}

impl Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for FilterSelection {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(FilterSelection::All),
            CURRENT => Ok(FilterSelection::Current),
            EXPIRED => Ok(FilterSelection::Expired),
            _ => Err(()),
        }
    }
}

/// Variables of one events query, recomputed whenever an input changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Search text, already trimmed.
    pub search_text: String,

    /// Page size.
    pub page_size: u32,

    /// 1-based page number.
    pub page_number: u32,

    /// Only events that have not ended.
    pub current_check: bool,

    /// Only events that have ended.
    pub expired_check: bool,
}

impl SearchFilter {
    /// Builds the variables for the given inputs, trimming the search text.
    pub fn new(search_text: &str, page_number: u32, selection: FilterSelection) -> Self {
        Self {
            search_text: search_text.trim().to_string(),
            page_size: EVENTS_PER_PAGE,
            page_number,
            current_check: selection.current_check(),
            expired_check: selection.expired_check(),
        }
    }
}

impl From<&SearchFilter> for EventFilterInput {
    fn from(filter: &SearchFilter) -> Self {
        EventFilterInput {
            search_text: filter.search_text.clone(),
            page_size: filter.page_size,
            page_number: filter.page_number,
            current_check: filter.current_check,
            expired_check: filter.expired_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_selection_is_checked() {
        for selection in FilterSelection::ALL {
            let checks = [
                selection.all_check(),
                selection.current_check(),
                selection.expired_check(),
            ];
            assert_eq!(checks.iter().filter(|c| **c).count(), 1, "{selection}");
        }
    }

    #[test]
    fn test_selection_round_trips_through_str() {
        for selection in FilterSelection::ALL {
            assert_eq!(selection.to_string().parse(), Ok(selection));
        }
        assert_eq!("Past".parse::<FilterSelection>(), Err(()));
    }

    #[test]
    fn test_search_filter_trims_text() {
        let filter = SearchFilter::new("  Conference \n", 1, FilterSelection::Expired);
        assert_eq!(filter.search_text, "Conference");
        assert_eq!(filter.page_size, 20);
        assert!(!filter.current_check);
        assert!(filter.expired_check);

        let input = EventFilterInput::from(&filter);
        assert_eq!(input.search_text, "Conference");
        assert_eq!(input.page_number, 1);
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay date ranges.
//!
//! A stay is the half-open interval `[check_in, check_out)`: the guest
//! occupies the room on the night of `check_in` and leaves on the morning of
//! `check_out`, so a new guest may arrive that same day.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// A validated booking date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayRange {
    check_in: Date,
    check_out: Date,
}

impl StayRange {
    /// Creates a stay range.
    ///
    /// # Arguments
    ///
    /// * `check_in` - The arrival date
    /// * `check_out` - The departure date
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStayRange` unless `check_out` is strictly
    /// after `check_in`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidStayRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parses both dates from ISO strings and builds the range.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or the range is empty.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, DomainError> {
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    /// Returns the arrival date.
    #[must_use]
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the departure date.
    #[must_use]
    pub const fn check_out(&self) -> Date {
        self.check_out
    }

    /// Returns the number of nights in the stay (always at least one).
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days: i64 = (self.check_out - self.check_in).whole_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Returns true if the two stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if the guest is in the room on the night of `date`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}

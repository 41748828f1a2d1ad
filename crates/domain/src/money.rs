// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts.
//!
//! Prices are held as whole cents so nightly rates multiply exactly.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Parses a non-negative decimal amount such as `120`, `120.5` or `120.50`.
    ///
    /// At most two fractional digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMoney` if the string is empty, negative,
    /// has more than two fractional digits, or does not fit in cents.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidMoney(String::from(
                "amount cannot be empty",
            )));
        }
        if trimmed.starts_with('-') {
            return Err(DomainError::InvalidMoney(format!(
                "amount cannot be negative: '{trimmed}'"
            )));
        }

        let (whole, fraction): (&str, &str) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(DomainError::InvalidMoney(format!("'{trimmed}' is not a number")));
        }
        if fraction.len() > 2 {
            return Err(DomainError::InvalidMoney(format!(
                "'{trimmed}' has more than two decimal places"
            )));
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(DomainError::InvalidMoney(format!("'{trimmed}' is not a number")));
        }

        let whole_cents: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| DomainError::InvalidMoney(format!("'{trimmed}' is too large")))?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => i64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => i64::from(fraction.as_bytes()[0] - b'0') * 10
                + i64::from(fraction.as_bytes()[1] - b'0'),
        };

        whole_cents
            .checked_add(fraction_cents)
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::InvalidMoney(format!("'{trimmed}' is too large")))
    }

    /// Multiplies a nightly rate by a number of nights.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PriceOverflow` if the product does not fit.
    pub fn times(self, nights: u32) -> Result<Self, DomainError> {
        self.cents
            .checked_mul(i64::from(nights))
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::PriceOverflow {
                operation: format!("multiplying {self} by {nights} nights"),
            })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.cents < 0 { "-" } else { "" };
        let abs: u64 = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

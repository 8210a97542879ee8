//! Simulated Bikram Sambat month lengths.
//!
//! BS month lengths are published yearly from astronomical observation and
//! follow no closed rule. This module supplies a deterministic stand-in:
//! four base patterns of 365 days rotated by year, with one extra day in
//! Chaitra whenever the AD year holding that Chaitra is a Gregorian leap
//! year. Every BS new year therefore stays in mid-April AD.

use crate::consts::{
    BS_COMMON_YEAR_DAYS, CHAITRA, LEAP_ALIGNMENT, MAX_BS_MONTH_DAYS, MAX_MONTH, MIN_BS_MONTH_DAYS,
};
use std::collections::BTreeMap;

/// Base month lengths, Baisakh first. Each row sums to 365.
const BASE_PATTERNS: [[u8; 12]; 4] = [
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 30],
];

/// Whether the simulated BS year has 366 days
pub const fn is_bs_leap_year(year: i32) -> bool {
    // i64 keeps the shift total for every i32
    let ad_year = year as i64 - LEAP_ALIGNMENT as i64;
    (ad_year % 4 == 0 && ad_year % 100 != 0) || ad_year % 400 == 0
}

/// Twelve month lengths of `year` under the simulated rule
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn simulated_months(year: i32) -> [u8; 12] {
    let mut months = BASE_PATTERNS[(year as i64).rem_euclid(4) as usize];
    if is_bs_leap_year(year) {
        months[(CHAITRA - 1) as usize] += 1;
    }
    months
}

/// Days in a BS month under the standard (override-free) table.
///
/// # Panics
/// If `month` is outside `1..=12`.
pub fn days_in_bs_month(year: i32, month: u8) -> u8 {
    assert!(
        (1..=MAX_MONTH).contains(&month),
        "BS month must be 1..=12, got {month}"
    );
    simulated_months(year)[usize::from(month - 1)]
}

/// Days in a BS year (365 or 366)
pub const fn days_in_bs_year(year: i32) -> u16 {
    if is_bs_leap_year(year) {
        BS_COMMON_YEAR_DAYS + 1
    } else {
        BS_COMMON_YEAR_DAYS
    }
}

/// Rejected month-table override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A month length falls outside `29..=32`.
    #[error(
        "Invalid length {days} for BS {year} month {month} (must be {}-{})",
        MIN_BS_MONTH_DAYS,
        MAX_BS_MONTH_DAYS
    )]
    MonthLength { year: i32, month: u8, days: u8 },

    /// The override would move the following new year.
    #[error("BS {year} override totals {actual} days, expected {expected}")]
    YearTotal {
        year: i32,
        expected: u16,
        actual: u16,
    },
}

/// Month lengths for every BS year: the simulated rule, optionally
/// overridden per year without changing that year's total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthTable {
    overrides: BTreeMap<i32, [u8; 12]>,
}

impl MonthTable {
    /// The rule alone, no overrides
    pub const fn simulated() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Replaces the lengths of one year.
    ///
    /// # Errors
    /// Returns `TableError::MonthLength` for any month outside `29..=32` and
    /// `TableError::YearTotal` when the months do not add up to
    /// `days_in_bs_year(year)`.
    pub fn with_override(mut self, year: i32, months: [u8; 12]) -> Result<Self, TableError> {
        for (days, month) in months.iter().copied().zip(1u8..) {
            if !(MIN_BS_MONTH_DAYS..=MAX_BS_MONTH_DAYS).contains(&days) {
                return Err(TableError::MonthLength { year, month, days });
            }
        }

        let expected = days_in_bs_year(year);
        let actual: u16 = months.iter().map(|&d| u16::from(d)).sum();
        if actual != expected {
            return Err(TableError::YearTotal {
                year,
                expected,
                actual,
            });
        }

        self.overrides.insert(year, months);
        Ok(self)
    }

    /// Lengths of all twelve months of `year`
    pub fn months(&self, year: i32) -> [u8; 12] {
        self.overrides
            .get(&year)
            .copied()
            .unwrap_or_else(|| simulated_months(year))
    }

    /// Days in one month.
    ///
    /// # Panics
    /// If `month` is outside `1..=12`.
    pub fn days_in_month(&self, year: i32, month: u8) -> u8 {
        assert!(
            (1..=MAX_MONTH).contains(&month),
            "BS month must be 1..=12, got {month}"
        );
        self.months(year)[usize::from(month - 1)]
    }

    /// Days in `year`; overrides never change it
    pub const fn days_in_year(&self, year: i32) -> u16 {
        days_in_bs_year(year)
    }

    pub fn has_override(&self, year: i32) -> bool {
        self.overrides.contains_key(&year)
    }
}

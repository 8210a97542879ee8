//! AD ⇄ BS conversion through a fixed anchor pair.
//!
//! Both directions count days from the anchor (2024-04-14 = 1 Baisakh 2081)
//! and spend them on whole BS months, so any pair of conversions composes to
//! the identity.

use crate::ParseError;
use crate::consts::{
    ANCHOR_BS, BAISAKH, ERA_OFFSET, LEAP_ALIGNMENT, MAX_MONTH, MIN_BS_YEAR, MIN_DAY,
};
use crate::month_length::MonthTable;
use crate::types::{BsDate, GregorianDate};
use chrono::Weekday;
use tracing::trace;

/// `days_from_civil(ANCHOR_AD)`
const ANCHOR_DAY: i64 = 19_827;

const DAYS_IN_COMMON_YEAR: i64 = 365;

static STANDARD: Calendar = Calendar::new(MonthTable::simulated());

/// Gregorian leap years in `1..=n` (negative and offset-consistent for
/// differences).
const fn gregorian_leaps_through(n: i64) -> i64 {
    n.div_euclid(4) - n.div_euclid(100) + n.div_euclid(400)
}

/// Day number (0 = 1970-01-01) of 1 Baisakh `year`.
///
/// Leap BS years are exactly those whose AD closing year is a Gregorian
/// leap year, so the count of leap days between two new years reduces to
/// the Gregorian leap count shifted by `LEAP_ALIGNMENT`.
const fn new_year_day(year: i64) -> i64 {
    let anchor_year = ANCHOR_BS.0 as i64;
    let shift = LEAP_ALIGNMENT as i64 + 1;
    ANCHOR_DAY
        + DAYS_IN_COMMON_YEAR * (year - anchor_year)
        + gregorian_leaps_through(year - shift)
        - gregorian_leaps_through(anchor_year - shift)
}

/// A BS calendar: conversion rules bound to one month-length table.
///
/// The free functions in this module use [`Calendar::standard`]; build your
/// own with [`Calendar::new`] to convert against a table with overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    table: MonthTable,
}

impl Calendar {
    pub const fn new(table: MonthTable) -> Self {
        Self { table }
    }

    /// Shared calendar using the simulated table with no overrides
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    pub const fn table(&self) -> &MonthTable {
        &self.table
    }

    /// Days in a BS month of this calendar.
    ///
    /// # Panics
    /// If `month` is outside `1..=12`.
    pub fn days_in_month(&self, year: i32, month: u8) -> u8 {
        self.table.days_in_month(year, month)
    }

    /// Builds a `BsDate` validated against this calendar's table.
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` for years before `MIN_BS_YEAR`,
    /// and `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the
    /// components do not name a day of this calendar.
    pub fn date(&self, year: i32, month: u8, day: u8) -> Result<BsDate, ParseError> {
        if !is_supported_bs_year(year) {
            return Err(ParseError::YearOutOfRange(year));
        }
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        if !(MIN_DAY..=self.days_in_month(year, month)).contains(&day) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(BsDate::from_parts(year, month, day))
    }

    /// Converts an AD date to BS, or `None` when the BS year would fall
    /// outside `MIN_BS_YEAR..=i32::MAX`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn checked_ad_to_bs(&self, date: GregorianDate) -> Option<BsDate> {
        let days = date.days_since_epoch();

        // Coarse estimate, then settle on the BS year whose new year precedes `days`
        let mut year = i64::from(date.year()) + i64::from(ERA_OFFSET);
        while new_year_day(year) > days {
            year -= 1;
        }
        while new_year_day(year + 1) <= days {
            year += 1;
        }
        let bs_year = i32::try_from(year)
            .ok()
            .filter(|&year| is_supported_bs_year(year))?;

        let mut remaining = days - new_year_day(year);
        let mut month = BAISAKH;
        loop {
            let length = i64::from(self.days_in_month(bs_year, month));
            if remaining < length {
                break;
            }
            remaining -= length;
            month += 1;
        }

        // remaining < month length <= 32
        let result = BsDate::from_parts(bs_year, month, remaining as u8 + 1);
        trace!(ad = %date, bs = %result, "ad_to_bs");
        Some(result)
    }

    /// Converts an AD date to BS.
    ///
    /// # Panics
    /// If the BS year falls outside `MIN_BS_YEAR..=i32::MAX`, which only
    /// happens for AD years within 57 of `i32::MIN` or `i32::MAX`.
    pub fn ad_to_bs(&self, date: GregorianDate) -> BsDate {
        self.checked_ad_to_bs(date)
            .unwrap_or_else(|| panic!("AD {date} has no BS date in the supported year range"))
    }

    /// Converts a BS day to AD.
    ///
    /// # Panics
    /// If `year` is before `MIN_BS_YEAR`, `month` is outside `1..=12` or
    /// `day` is outside the month. Callers only pass days produced by this
    /// same table.
    pub fn bs_to_ad(&self, day: u8, month: u8, year: i32) -> GregorianDate {
        assert!(
            is_supported_bs_year(year),
            "BS year {year} is before {MIN_BS_YEAR}"
        );
        let length = self.days_in_month(year, month);
        assert!(
            (MIN_DAY..=length).contains(&day),
            "BS {year}-{month:02} has {length} days, got day {day}"
        );

        let months = self.table.months(year);
        let elapsed: i64 = months[..usize::from(month - 1)]
            .iter()
            .map(|&d| i64::from(d))
            .sum();
        let days = new_year_day(i64::from(year)) + elapsed + i64::from(day - 1);

        let result = GregorianDate::from_days_since_epoch(days);
        trace!(bs_year = year, bs_month = month, bs_day = day, ad = %result, "bs_to_ad");
        result
    }

    /// Converts a validated `BsDate` to AD
    pub fn to_gregorian(&self, date: BsDate) -> GregorianDate {
        self.bs_to_ad(date.day(), date.month(), date.year())
    }

    /// Weekday of the given BS day
    pub fn weekday(&self, date: BsDate) -> Weekday {
        self.to_gregorian(date).weekday()
    }

    /// BS date for today's local date
    pub fn today(&self) -> BsDate {
        self.ad_to_bs(GregorianDate::today())
    }
}

/// AD to BS using the standard calendar.
///
/// # Panics
/// If the BS year falls outside `MIN_BS_YEAR..=i32::MAX`; see
/// [`Calendar::checked_ad_to_bs`].
pub fn ad_to_bs(date: GregorianDate) -> BsDate {
    STANDARD.ad_to_bs(date)
}

/// BS to AD using the standard calendar.
///
/// # Panics
/// If `year` is before `MIN_BS_YEAR`, `month` is outside `1..=12` or `day`
/// is outside that month.
pub fn bs_to_ad(day: u8, month: u8, year: i32) -> GregorianDate {
    STANDARD.bs_to_ad(day, month, year)
}

/// Whether every day of BS `year` converts to an AD date with an `i32` year
pub const fn is_supported_bs_year(year: i32) -> bool {
    year >= MIN_BS_YEAR
}

/// Coarse BS year for an AD year, for seeding pickers and year lists.
///
/// One year too high for dates between January and the mid-April new year.
pub const fn estimate_bs_year(ad_year: i32) -> i32 {
    ad_year.saturating_add(ERA_OFFSET)
}

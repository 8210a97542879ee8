//! Bikram Sambat (BS) and Gregorian (AD) dates.
//!
//! ```
//! use sambat::{ad_to_bs, bs_to_ad, format_date, GregorianDate};
//!
//! let ad: GregorianDate = "2024-04-14".parse().unwrap();
//! let bs = ad_to_bs(ad);
//! assert_eq!(bs.to_string(), "2081-01-01");
//! assert_eq!(bs_to_ad(bs.day(), bs.month(), bs.year()), ad);
//! assert_eq!(format_date("2024-04-14"), "Apr 14, 2024 (Baisakh 1, 2081 BS)");
//! ```
//!
//! BS month lengths here come from a deterministic simulation rather than a
//! published almanac; see [`month_length`].

mod consts;
mod convert;
mod format;
pub mod month_length;
mod picker;
mod prelude;
mod types;

pub use consts::*;
pub use convert::{Calendar, ad_to_bs, bs_to_ad, estimate_bs_year, is_supported_bs_year};
pub use format::{
    FormatConfig, Formatter, MonthNames, format_date, format_timestamp, parse_date,
    parse_timestamp, time_ago,
};
pub use month_length::{
    MonthTable, TableError, days_in_bs_month, days_in_bs_year, is_bs_leap_year,
};
pub use picker::{
    CalendarPicker, DayCell, GridCell, MonthGrid, PickerConfig, PickerEvent, PickerState,
    Transition, WEEKEND, month_grid, transition, year_options,
};
pub use types::{BsDate, GregorianDate, days_in_month, is_leap_year};

use crate::prelude::*;

/// Invalid date text or date components.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "BS year {} is before {}", "_0", MIN_BS_YEAR)]
    YearOutOfRange(i32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::InvalidFormat("abc".to_owned()).to_string(),
            "Invalid date format: abc"
        );
        assert_eq!(
            ParseError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            ParseError::InvalidDay {
                year: 2081,
                month: 1,
                day: 40
            }
            .to_string(),
            "Invalid day 40 for month 2081-01"
        );
        assert_eq!(ParseError::EmptyInput.to_string(), "Empty date string");
        assert_eq!(
            ParseError::YearOutOfRange(i32::MIN).to_string(),
            "BS year -2147483648 is before -2147483591"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<ParseError>();
        assert_impl::<TableError>();
    }

    #[test]
    fn test_constants() {
        assert_eq!(ERA_OFFSET, 57);
        assert_eq!(BS_MONTH_NAMES.len(), 12);
        assert_eq!(BS_MONTH_NAMES[0], "Baisakh");
        assert_eq!(WEEKDAY_LABELS[6], "Sat");
    }

    #[test]
    fn test_value_types_are_send_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<GregorianDate>();
        assert_impl::<BsDate>();
        assert_impl::<Calendar>();
        assert_impl::<Formatter>();
        assert_impl::<PickerState>();
        assert_impl::<MonthGrid>();
    }
}

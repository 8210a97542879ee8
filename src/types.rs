use crate::ParseError;
use crate::consts::{
    BS_MONTH_NAMES, CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MIN_DAY,
};
use crate::convert::is_supported_bs_year;
use crate::month_length::days_in_bs_month;
use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

/// A calendar date in the proleptic Gregorian (AD) system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct GregorianDate {
    year: i32,
    month: u8,
    day: u8,
}

impl GregorianDate {
    /// Creates a new date, validating month and day for the given year
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` for
    /// components outside the Gregorian calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Today's date on the local clock
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u8 {
        self.month
    }

    pub const fn day(self) -> u8 {
        self.day
    }

    /// Day of week under the proleptic Gregorian calendar
    pub fn weekday(self) -> Weekday {
        weekday_from_days(self.days_since_epoch())
    }

    /// Days since 1970-01-01 (negative before it)
    pub(crate) fn days_since_epoch(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Inverse of `days_since_epoch`.
    ///
    /// # Panics
    /// If the resulting year does not fit in `i32`.
    pub(crate) fn from_days_since_epoch(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self {
            year: narrow_year(year),
            month,
            day,
        }
    }

    /// Converts to the Bikram Sambat calendar using the standard month table.
    ///
    /// # Panics
    /// For AD years within 57 of `i32::MIN` or `i32::MAX`; see
    /// [`crate::Calendar::checked_ad_to_bs`].
    pub fn to_bs(self) -> BsDate {
        crate::convert::ad_to_bs(self)
    }
}

impl From<NaiveDate> for GregorianDate {
    #[allow(clippy::cast_possible_truncation)]
    fn from(date: NaiveDate) -> Self {
        // chrono guarantees month 1..=12 and day 1..=31
        Self {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl FromStr for GregorianDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(year, month, day)
    }
}

/// A calendar date in the Bikram Sambat (BS) system.
///
/// `day` never exceeds the month length of the table the value was built
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct BsDate {
    year: i32,
    month: u8,
    day: u8,
}

impl BsDate {
    /// Creates a new BS date validated against the standard month table
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` for years before `MIN_BS_YEAR`,
    /// and `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the
    /// components do not name a day of the simulated BS calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        if !is_supported_bs_year(year) {
            return Err(ParseError::YearOutOfRange(year));
        }
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        if !(MIN_DAY..=days_in_bs_month(year, month)).contains(&day) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Builds a date whose components the caller has already validated
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u8 {
        self.month
    }

    pub const fn day(self) -> u8 {
        self.day
    }

    /// Romanized month name, e.g. "Baisakh"
    pub const fn month_name(self) -> &'static str {
        BS_MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Whether `other` falls in the same BS month and year
    pub const fn same_month(self, other: Self) -> bool {
        self.year == other.year && self.month == other.month
    }

    pub fn weekday(self) -> Weekday {
        self.to_gregorian().weekday()
    }

    /// Converts to the Gregorian calendar using the standard month table
    pub fn to_gregorian(self) -> GregorianDate {
        crate::convert::bs_to_ad(self.day, self.month, self.year)
    }

    /// Same as [`GregorianDate::to_bs`]
    pub fn from_gregorian(date: GregorianDate) -> Self {
        crate::convert::ad_to_bs(date)
    }
}

impl FromStr for BsDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(year, month, day)
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(GregorianDate);
string_serde!(BsDate);

/// Splits strict `YYYY-MM-DD` (optionally with a leading minus on the year)
fn parse_ymd(s: &str) -> Result<(i32, u8, u8), ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (negative, unsigned) = match trimmed.strip_prefix(DATE_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {trimmed}"
        )));
    };

    if month.len() != 2 || day.len() != 2 {
        return Err(ParseError::InvalidFormat(trimmed.to_owned()));
    }

    let year = parse_digits::<i32>(year)?;
    let month = parse_digits::<u8>(month)?;
    let day = parse_digits::<u8>(day)?;

    Ok((if negative { -year } else { year }, month, day))
}

/// Parses ASCII digits only, rejecting signs and whitespace
fn parse_digits<T: FromStr>(s: &str) -> Result<T, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    let year = year as i64;
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days from 1968-03-01 to 1970-01-01; shifts the March-based era count to
/// the Unix epoch.
const EPOCH_SHIFT: i64 = 719_468;
const DAYS_IN_400_YEARS: i64 = 146_097;

/// Day number of a proleptic Gregorian date, 0 = 1970-01-01.
///
/// Counts years from March so the leap day falls at the end of each year.
pub(crate) fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let month = i64::from(month);
    let day = i64::from(day);
    let year = i64::from(year) - i64::from(month <= 2);

    let era = year.div_euclid(GREGORIAN_CYCLE);
    let year_of_era = year.rem_euclid(GREGORIAN_CYCLE);
    let march_month = (month + 9) % 12;
    let day_of_year = (153 * march_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * DAYS_IN_400_YEARS + day_of_era - EPOCH_SHIFT
}

/// Inverse of `days_from_civil`, returning `(year, month, day)`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let shifted = days + EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_IN_400_YEARS);
    let day_of_era = shifted.rem_euclid(DAYS_IN_400_YEARS);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let march_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * march_month + 2) / 5 + 1;
    let month = if march_month < 10 {
        march_month + 3
    } else {
        march_month - 9
    };
    let year = year_of_era + era * GREGORIAN_CYCLE + i64::from(month <= 2);

    // month is 1..=12 and day 1..=31 by construction
    (year, month as u8, day as u8)
}

/// 1970-01-01 was a Thursday.
pub(crate) fn weekday_from_days(days: i64) -> Weekday {
    match (days + 4).rem_euclid(7) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Narrows an engine-computed year back to the public `i32` range.
///
/// # Panics
/// If the year does not fit in `i32`; only reachable for inputs within a few
/// dozen years of `i32::MIN`/`i32::MAX`.
pub(crate) fn narrow_year(year: i64) -> i32 {
    i32::try_from(year).unwrap_or_else(|_| panic!("converted year {year} overflows i32"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_new_valid() {
        assert!(GregorianDate::new(2024, 1, 31).is_ok());
        assert!(GregorianDate::new(2024, 2, 29).is_ok());
        assert!(GregorianDate::new(-44, 3, 15).is_ok());
        assert!(GregorianDate::new(0, 12, 31).is_ok());
    }

    #[test]
    fn test_gregorian_new_invalid() {
        assert!(matches!(
            GregorianDate::new(2024, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            GregorianDate::new(2024, 0, 1),
            Err(ParseError::InvalidMonth(0))
        ));
        assert!(matches!(
            GregorianDate::new(2023, 2, 29),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(matches!(
            GregorianDate::new(2024, 4, 0),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_gregorian_parse_and_display() {
        let date: GregorianDate = "2024-04-14".parse().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 4, 14));
        assert_eq!(date.to_string(), "2024-04-14");

        let padded = GregorianDate::new(987, 6, 5).unwrap();
        assert_eq!(padded.to_string(), "0987-06-05");
        assert_eq!("0987-06-05".parse::<GregorianDate>().unwrap(), padded);
    }

    #[test]
    fn test_gregorian_parse_negative_year() {
        let date: GregorianDate = "-0044-03-15".parse().unwrap();
        assert_eq!(date.year(), -44);
        assert_eq!(date.to_string().parse::<GregorianDate>().unwrap(), date);
    }

    #[test]
    fn test_parse_bad_tokens() {
        assert!(matches!(
            "".parse::<GregorianDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "not-a-date".parse::<GregorianDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-4-14".parse::<GregorianDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-04-1x".parse::<GregorianDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-04-14-01".parse::<GregorianDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-+4-14".parse::<GregorianDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-29".parse::<GregorianDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_gregorian_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let date = GregorianDate::from(naive);
        assert_eq!(date, GregorianDate::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_gregorian_weekday() {
        assert_eq!(GregorianDate::new(1970, 1, 1).unwrap().weekday(), Weekday::Thu);
        assert_eq!(GregorianDate::new(2024, 4, 13).unwrap().weekday(), Weekday::Sat);
        assert_eq!(GregorianDate::new(2024, 4, 14).unwrap().weekday(), Weekday::Sun);
        assert_eq!(GregorianDate::new(2000, 1, 1).unwrap().weekday(), Weekday::Sat);
        assert_eq!(GregorianDate::new(1969, 12, 31).unwrap().weekday(), Weekday::Wed);
    }

    #[test]
    fn test_days_from_civil_known_values() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(2024, 4, 14), 19_827);
    }

    #[test]
    fn test_days_from_civil_matches_chrono() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        for (y, m, d) in [
            (1600, 2, 29),
            (1900, 3, 1),
            (1999, 12, 31),
            (2024, 2, 29),
            (2100, 2, 28),
            (2400, 12, 31),
        ] {
            let naive = NaiveDate::from_ymd_opt(y, u32::from(m), u32::from(d)).unwrap();
            assert_eq!(
                days_from_civil(y, m, d),
                (naive - epoch).num_days(),
                "day number mismatch for {y}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn test_civil_from_days_inverts() {
        for days in (-800_000..800_000).step_by(997) {
            let (y, m, d) = civil_from_days(days);
            let y = i32::try_from(y).unwrap();
            assert!(GregorianDate::new(y, m, d).is_ok(), "invalid date for {days}");
            assert_eq!(days_from_civil(y, m, d), days);
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "year zero is divisible by 400",
            },
            TestCase {
                year: -4,
                is_leap: true,
                description: "negative multiple of 4",
            },
            TestCase {
                year: -100,
                is_leap: false,
                description: "negative century",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_bs_new_validates_against_table() {
        let last = days_in_bs_month(2080, 12);
        assert!(BsDate::new(2080, 12, last).is_ok());
        assert!(matches!(
            BsDate::new(2080, 12, last + 1),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            BsDate::new(2081, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            BsDate::new(2081, 1, 0),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_bs_new_rejects_unconvertible_year() {
        assert!(matches!(
            BsDate::new(i32::MIN, 1, 1),
            Err(ParseError::YearOutOfRange(i32::MIN))
        ));
        assert!(BsDate::new(crate::MIN_BS_YEAR, 1, 1).is_ok());
        assert!("-2147483648-01-01".parse::<BsDate>().is_err());
    }

    #[test]
    fn test_to_bs_and_from_gregorian_agree() {
        let ad = GregorianDate::new(2024, 4, 14).unwrap();
        let bs = BsDate::new(2081, 1, 1).unwrap();
        assert_eq!(ad.to_bs(), bs);
        assert_eq!(BsDate::from_gregorian(ad), bs);
        assert_eq!(bs.to_gregorian(), ad);
    }

    #[test]
    fn test_bs_parse_display_and_name() {
        let date: BsDate = "2081-01-01".parse().unwrap();
        assert_eq!(date.to_string(), "2081-01-01");
        assert_eq!(date.month_name(), "Baisakh");
        assert_eq!(BsDate::new(2081, 12, 1).unwrap().month_name(), "Chaitra");
    }

    #[test]
    fn test_bs_same_month() {
        let a = BsDate::new(2081, 5, 1).unwrap();
        let b = BsDate::new(2081, 5, 20).unwrap();
        let c = BsDate::new(2082, 5, 1).unwrap();
        assert!(a.same_month(b));
        assert!(!a.same_month(c));
    }

    #[test]
    fn test_serde_string_format() {
        let ad = GregorianDate::new(2024, 4, 14).unwrap();
        let json = serde_json::to_string(&ad).unwrap();
        assert_eq!(json, r#""2024-04-14""#);
        let parsed: GregorianDate = serde_json::from_str(&json).unwrap();
        assert_eq!(ad, parsed);

        let bs = BsDate::new(2081, 1, 1).unwrap();
        let json = serde_json::to_string(&bs).unwrap();
        assert_eq!(json, r#""2081-01-01""#);
        let parsed: BsDate = serde_json::from_str(&json).unwrap();
        assert_eq!(bs, parsed);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<GregorianDate, _> = serde_json::from_str(r#""2024-02-30""#);
        assert!(result.is_err());

        let result: Result<BsDate, _> = serde_json::from_str(r#""2081-13-01""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ordering() {
        let a = GregorianDate::new(2024, 4, 13).unwrap();
        let b = GregorianDate::new(2024, 4, 14).unwrap();
        assert!(a < b);

        let c = BsDate::new(2080, 12, 1).unwrap();
        let d = BsDate::new(2081, 1, 1).unwrap();
        assert!(c < d);
    }
}

//! Combined "AD (BS)" display strings.
//!
//! Formatters sit on display paths fed by user and storage strings, so they
//! never fail: blank input renders as the missing fallback, and anything
//! unparseable or outside the convertible year range as the invalid
//! fallback.

use crate::consts::{
    AD_MONTH_ABBREVIATIONS, BS_ERA_SUFFIX, BS_MONTH_NAMES, BS_MONTH_NAMES_NEPALI,
    FALLBACK_INVALID, FALLBACK_MISSING,
};
use crate::convert::Calendar;
use crate::types::GregorianDate;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Naive timestamp layouts accepted after RFC 3339
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const RELATIVE_DAYS_LIMIT: i64 = 7;

static DEFAULT_FORMATTER: LazyLock<Formatter> = LazyLock::new(Formatter::default);

/// Ordered BS month display names, Baisakh first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthNames([String; 12]);

impl MonthNames {
    pub fn new(names: [String; 12]) -> Self {
        Self(names)
    }

    /// Romanized names ("Baisakh" .. "Chaitra")
    pub fn english() -> Self {
        Self(BS_MONTH_NAMES.map(str::to_owned))
    }

    /// Devanagari names ("बैशाख" .. "चैत")
    pub fn nepali() -> Self {
        Self(BS_MONTH_NAMES_NEPALI.map(str::to_owned))
    }

    /// Name of a 1-based BS month.
    ///
    /// # Panics
    /// If `month` is outside `1..=12`.
    pub fn get(&self, month: u8) -> &str {
        &self.0[usize::from(month) - 1]
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::english()
    }
}

/// Display settings for [`Formatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Rendered for blank input
    pub missing: String,
    /// Rendered for unparseable input
    pub invalid: String,
    /// Appended after the BS year
    pub era_suffix: String,
    pub month_names: MonthNames,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            missing: FALLBACK_MISSING.to_owned(),
            invalid: FALLBACK_INVALID.to_owned(),
            era_suffix: BS_ERA_SUFFIX.to_owned(),
            month_names: MonthNames::default(),
        }
    }
}

/// Renders AD inputs with their BS equivalent.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    calendar: Calendar,
    config: FormatConfig,
}

impl Formatter {
    pub const fn new(calendar: Calendar, config: FormatConfig) -> Self {
        Self { calendar, config }
    }

    pub const fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// `"Apr 14, 2024 (Baisakh 1, 2081 BS)"`, or a fallback
    pub fn format_date(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return self.config.missing.clone();
        }
        let Some(date) = parse_date(input) else {
            return self.invalid(input);
        };
        match self.bs_label(date) {
            Some(bs) => format!("{} ({bs})", ad_label(date)),
            None => self.invalid(input),
        }
    }

    /// `"Apr 14, 2024, 10:30 AM (Baisakh 1, 2081 BS)"`, or a fallback
    pub fn format_timestamp(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return self.config.missing.clone();
        }
        parse_timestamp(input)
            .and_then(|timestamp| self.render_timestamp(timestamp))
            .unwrap_or_else(|| self.invalid(input))
    }

    /// Relative age of a timestamp for activity feeds.
    ///
    /// Within a week of `now` this reads "just now", "3 minutes ago" and so
    /// on; older and future timestamps render as [`Self::format_timestamp`].
    /// Timestamps with an offset are compared as instants; naive ones are
    /// read in the offset of `now`.
    pub fn time_ago(&self, input: &str, now: DateTime<FixedOffset>) -> String {
        if input.trim().is_empty() {
            return self.config.missing.clone();
        }
        let Some(timestamp) = parse_instant(input, *now.offset()) else {
            return self.invalid(input);
        };

        let elapsed = now.signed_duration_since(timestamp);
        if elapsed.num_seconds() < 0 {
            return self.full_timestamp(input, timestamp.naive_local());
        }

        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();
        if elapsed.num_seconds() < SECONDS_PER_MINUTE {
            "just now".to_owned()
        } else if minutes < MINUTES_PER_HOUR {
            ago(minutes, "minute")
        } else if hours < HOURS_PER_DAY {
            ago(hours, "hour")
        } else if days < RELATIVE_DAYS_LIMIT {
            ago(days, "day")
        } else {
            self.full_timestamp(input, timestamp.naive_local())
        }
    }

    /// `"Baisakh 1, 2081 BS"`, or `None` when the date has no BS equivalent
    /// in the supported year range
    pub fn bs_label(&self, date: GregorianDate) -> Option<String> {
        let bs = self.calendar.checked_ad_to_bs(date)?;
        Some(format!(
            "{} {}, {} {}",
            self.config.month_names.get(bs.month()),
            bs.day(),
            bs.year(),
            self.config.era_suffix
        ))
    }

    fn render_timestamp(&self, timestamp: NaiveDateTime) -> Option<String> {
        let date = GregorianDate::from(timestamp.date());
        Some(format!(
            "{}, {} ({})",
            ad_label(date),
            timestamp.time().format("%-I:%M %p"),
            self.bs_label(date)?
        ))
    }

    fn full_timestamp(&self, input: &str, timestamp: NaiveDateTime) -> String {
        self.render_timestamp(timestamp).unwrap_or_else(|| self.invalid(input))
    }

    fn invalid(&self, input: &str) -> String {
        debug!(input, "date not renderable, using fallback");
        self.config.invalid.clone()
    }
}

/// `"Apr 14, 2024"`
fn ad_label(date: GregorianDate) -> String {
    format!(
        "{} {}, {}",
        AD_MONTH_ABBREVIATIONS[usize::from(date.month()) - 1],
        date.day(),
        date.year()
    )
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Parses a plain `YYYY-MM-DD` date, or the date part of any timestamp
/// [`parse_timestamp`] accepts
pub fn parse_date(input: &str) -> Option<GregorianDate> {
    let trimmed = input.trim();
    trimmed
        .parse::<GregorianDate>()
        .ok()
        .or_else(|| parse_timestamp(trimmed).map(|ts| GregorianDate::from(ts.date())))
}

/// Parses RFC 3339 (keeping the wall-clock time of its own offset), naive
/// ISO date-times with `T` or space, or a bare date at midnight
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.naive_local());
    }
    parse_naive(trimmed)
}

/// Like [`parse_timestamp`] but keeps the instant: naive input is placed in
/// `offset`
fn parse_instant(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let trimmed = input.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .or_else(|| parse_naive(trimmed)?.and_local_timezone(offset).single())
}

fn parse_naive(trimmed: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Formats with the standard calendar and default settings
pub fn format_date(input: &str) -> String {
    DEFAULT_FORMATTER.format_date(input)
}

/// Formats with the standard calendar and default settings
pub fn format_timestamp(input: &str) -> String {
    DEFAULT_FORMATTER.format_timestamp(input)
}

/// Relative age with the standard calendar and default settings
pub fn time_ago(input: &str, now: DateTime<FixedOffset>) -> String {
    DEFAULT_FORMATTER.time_ago(input, now)
}

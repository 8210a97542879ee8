/// Maximum valid month (December in AD, Chaitra in BS)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Month number for Baisakh, the first BS month
pub const BAISAKH: u8 = 1;
/// Month number for Chaitra, the last BS month
pub const CHAITRA: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Approximate number of years BS leads AD.
///
/// Exact from the BS new year (mid-April) to the end of the AD year; one too
/// many between January and the new year.
pub const ERA_OFFSET: i32 = 57;

/// AD year containing the closing months (Poush..Chaitra) of a BS year is
/// `bs_year - LEAP_ALIGNMENT`.
pub(crate) const LEAP_ALIGNMENT: i32 = 56;

/// Earliest BS year whose every day has an AD date with an `i32` year
pub const MIN_BS_YEAR: i32 = i32::MIN + ERA_OFFSET;

/// AD side of the conversion anchor: 2024-04-14
pub const ANCHOR_AD: (i32, u8, u8) = (2024, 4, 14);
/// BS side of the conversion anchor: 1 Baisakh 2081
pub const ANCHOR_BS: (i32, u8, u8) = (2081, BAISAKH, MIN_DAY);

/// Minimum simulated BS month length
pub const MIN_BS_MONTH_DAYS: u8 = 29;
/// Maximum simulated BS month length
pub const MAX_BS_MONTH_DAYS: u8 = 32;

/// Days in a common BS year
pub const BS_COMMON_YEAR_DAYS: u16 = 365;

/// BS month names, romanized (index 0 = Baisakh)
pub const BS_MONTH_NAMES: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// BS month names in Devanagari (index 0 = बैशाख)
pub const BS_MONTH_NAMES_NEPALI: [&str; 12] = [
    "बैशाख", "जेठ", "असार", "साउन", "भदौ", "असोज", "कार्तिक", "मंसिर", "पुस", "माघ", "फागुन", "चैत",
];

/// Abbreviated Gregorian month names (index 0 = January)
pub const AD_MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Column headers for the picker grid, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Days per grid row
pub const DAYS_PER_WEEK: usize = 7;

/// Default number of years offered on each side of the current BS year
pub const DEFAULT_YEAR_WINDOW: u8 = 5;

/// Shown for blank or missing date input
pub const FALLBACK_MISSING: &str = "N/A";
/// Shown for unparseable date input
pub const FALLBACK_INVALID: &str = "Invalid date";
/// Suffix appended to BS dates in display strings
pub const BS_ERA_SUFFIX: &str = "BS";

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

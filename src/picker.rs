//! BS month picker: an immutable state value, a pure transition function,
//! and the month grid derived from them.
//!
//! [`CalendarPicker`] wires the three together for UI code that wants a
//! callback on selection; everything underneath is usable on its own.

use crate::ParseError;
use crate::consts::{
    BAISAKH, BS_MONTH_NAMES, CHAITRA, DAYS_PER_WEEK, DEFAULT_YEAR_WINDOW, MAX_MONTH, MIN_BS_YEAR,
    MIN_DAY,
};
use crate::convert::{Calendar, estimate_bs_year, is_supported_bs_year};
use crate::format::parse_date;
use crate::types::{BsDate, GregorianDate};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, trace, warn};

/// Nepal's weekly day off
pub const WEEKEND: Weekday = Weekday::Sat;

/// Picker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Years offered on each side of the current BS year
    pub year_window: u8,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            year_window: DEFAULT_YEAR_WINDOW,
        }
    }
}

/// Displayed month plus the selected day, if any.
///
/// The selection keeps its own month and year, so navigating away and back
/// still shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPickerState")]
pub struct PickerState {
    year: i32,
    month: u8,
    selected: Option<BsDate>,
}

#[derive(Deserialize)]
struct RawPickerState {
    year: i32,
    month: u8,
    selected: Option<BsDate>,
}

impl TryFrom<RawPickerState> for PickerState {
    type Error = ParseError;

    fn try_from(raw: RawPickerState) -> Result<Self, Self::Error> {
        let state = Self::new(raw.year, raw.month)?;
        Ok(Self {
            selected: raw.selected,
            ..state
        })
    }
}

impl PickerState {
    /// Shows `month` of `year` with nothing selected
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` for years before `MIN_BS_YEAR`
    /// and `ParseError::InvalidMonth` if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u8) -> Result<Self, ParseError> {
        if !is_supported_bs_year(year) {
            return Err(ParseError::YearOutOfRange(year));
        }
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month,
            selected: None,
        })
    }

    /// Shows the month containing `date` with `date` selected
    pub const fn with_selection(date: BsDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            selected: Some(date),
        }
    }

    /// Shows the BS month containing `today`, nothing selected.
    ///
    /// # Panics
    /// If `today` has no BS date in the supported year range.
    pub fn for_today(calendar: &Calendar, today: GregorianDate) -> Self {
        let bs = calendar.ad_to_bs(today);
        Self {
            year: bs.year(),
            month: bs.month(),
            selected: None,
        }
    }

    /// Initial state from an optional AD date string.
    ///
    /// A missing or unparseable string, or one outside the convertible year
    /// range, falls back to [`Self::for_today`].
    pub fn from_initial(calendar: &Calendar, initial: Option<&str>, today: GregorianDate) -> Self {
        let Some(input) = initial else {
            return Self::for_today(calendar, today);
        };
        match parse_date(input).and_then(|date| calendar.checked_ad_to_bs(date)) {
            Some(date) => Self::with_selection(date),
            None => {
                debug!(input, "initial date not usable, showing current month");
                Self::for_today(calendar, today)
            }
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn selected(&self) -> Option<BsDate> {
        self.selected
    }

    /// Selected day number if the selection is in the displayed month
    pub fn selected_day(&self) -> Option<u8> {
        self.selected
            .filter(|date| date.year() == self.year && date.month() == self.month)
            .map(BsDate::day)
    }
}

/// Input to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerEvent {
    PreviousMonth,
    NextMonth,
    SelectYear(i32),
    SelectMonth(u8),
    SelectDay(u8),
}

/// Result of [`transition`]: the next state and the date to emit, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: PickerState,
    pub selected: Option<BsDate>,
}

impl Transition {
    const fn quiet(state: PickerState) -> Self {
        Self {
            state,
            selected: None,
        }
    }
}

/// Applies one event.
///
/// Month navigation carries into the year and leaves the selection alone.
/// `SelectDay` selects within the displayed month and emits the date.
/// Events naming a month or day that does not exist, or a year before
/// `MIN_BS_YEAR`, leave the state unchanged and emit nothing.
pub fn transition(calendar: &Calendar, state: PickerState, event: PickerEvent) -> Transition {
    trace!(?event, year = state.year, month = state.month, "picker transition");

    match event {
        PickerEvent::PreviousMonth => {
            if state.month > BAISAKH {
                return Transition::quiet(PickerState {
                    month: state.month - 1,
                    ..state
                });
            }
            match state.year.checked_sub(1).filter(|&year| is_supported_bs_year(year)) {
                Some(year) => Transition::quiet(PickerState {
                    year,
                    month: CHAITRA,
                    ..state
                }),
                None => reject(state, event),
            }
        }
        PickerEvent::NextMonth => {
            if state.month < CHAITRA {
                return Transition::quiet(PickerState {
                    month: state.month + 1,
                    ..state
                });
            }
            match state.year.checked_add(1) {
                Some(year) => Transition::quiet(PickerState {
                    year,
                    month: BAISAKH,
                    ..state
                }),
                None => reject(state, event),
            }
        }
        PickerEvent::SelectYear(year) if is_supported_bs_year(year) => {
            Transition::quiet(PickerState { year, ..state })
        }
        PickerEvent::SelectMonth(month) if (1..=MAX_MONTH).contains(&month) => {
            Transition::quiet(PickerState { month, ..state })
        }
        PickerEvent::SelectDay(day) => match calendar.date(state.year, state.month, day) {
            Ok(date) => Transition {
                state: PickerState {
                    selected: Some(date),
                    ..state
                },
                selected: Some(date),
            },
            Err(_) => reject(state, event),
        },
        PickerEvent::SelectYear(_) | PickerEvent::SelectMonth(_) => reject(state, event),
    }
}

fn reject(state: PickerState, event: PickerEvent) -> Transition {
    warn!(?event, year = state.year, month = state.month, "picker event rejected");
    Transition::quiet(state)
}

/// BS years offered by the year selector, centred on the estimate for `today`
/// and never before `MIN_BS_YEAR`
pub const fn year_options(today: GregorianDate, window: u8) -> RangeInclusive<i32> {
    let center = estimate_bs_year(today.year());
    let window = window as i32;
    let low = center.saturating_sub(window);
    let low = if low < MIN_BS_YEAR { MIN_BS_YEAR } else { low };
    low..=center.saturating_add(window)
}

/// One selectable day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub date: BsDate,
    pub ad: GregorianDate,
    pub weekday: Weekday,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub const fn day(&self) -> u8 {
        self.date.day()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub const fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Blank => None,
        }
    }
}

/// A BS month laid out in Sunday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u8,
    leading_blanks: usize,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Blank cells before day 1; also day 1's weekday counted from Sunday
    pub const fn leading_blanks(&self) -> usize {
        self.leading_blanks
    }

    /// All cells, a multiple of seven long
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    pub fn day(&self, day: u8) -> Option<&DayCell> {
        self.days().find(|cell| cell.day() == day)
    }

    /// e.g. "Baisakh 2081"
    pub fn title(&self) -> String {
        format!("{} {}", BS_MONTH_NAMES[usize::from(self.month) - 1], self.year)
    }
}

/// Lays out the displayed month of `state`, flagging `today`, the weekend
/// and the selection
pub fn month_grid(calendar: &Calendar, state: &PickerState, today: GregorianDate) -> MonthGrid {
    let (year, month) = (state.year, state.month);
    let length = calendar.days_in_month(year, month);
    let first = calendar.bs_to_ad(MIN_DAY, month, year);
    let first_day = first.days_since_epoch();
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;
    let selected_day = state.selected_day();

    let mut cells = Vec::with_capacity(leading_blanks + usize::from(length) + DAYS_PER_WEEK);
    cells.resize(leading_blanks, GridCell::Blank);

    for (day, offset) in (MIN_DAY..=length).zip(0_i64..) {
        let ad = GregorianDate::from_days_since_epoch(first_day + offset);
        let weekday = ad.weekday();
        cells.push(GridCell::Day(DayCell {
            date: BsDate::from_parts(year, month, day),
            ad,
            weekday,
            is_today: ad == today,
            is_weekend: weekday == WEEKEND,
            is_selected: selected_day == Some(day),
        }));
    }

    let padded = cells.len().div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;
    cells.resize(padded, GridCell::Blank);

    MonthGrid {
        year,
        month,
        leading_blanks,
        cells,
    }
}

/// Stateful picker widget.
///
/// Owns its calendar and state; `on_select` runs with the BS date each time
/// the user picks a day.
pub struct CalendarPicker<F>
where
    F: FnMut(BsDate),
{
    calendar: Calendar,
    config: PickerConfig,
    today: GregorianDate,
    state: PickerState,
    on_select: F,
}

impl<F> CalendarPicker<F>
where
    F: FnMut(BsDate),
{
    pub fn new(
        calendar: Calendar,
        config: PickerConfig,
        initial: Option<&str>,
        today: GregorianDate,
        on_select: F,
    ) -> Self {
        let state = PickerState::from_initial(&calendar, initial, today);
        Self {
            calendar,
            config,
            today,
            state,
            on_select,
        }
    }

    /// Standard calendar, default config, local clock for "today"
    pub fn with_callback(initial: Option<&str>, on_select: F) -> Self {
        Self::new(
            Calendar::standard().clone(),
            PickerConfig::default(),
            initial,
            GregorianDate::today(),
            on_select,
        )
    }

    pub const fn state(&self) -> PickerState {
        self.state
    }

    pub const fn today(&self) -> GregorianDate {
        self.today
    }

    /// Applies an event, invoking the callback if a day was picked
    pub fn dispatch(&mut self, event: PickerEvent) -> PickerState {
        let Transition { state, selected } = transition(&self.calendar, self.state, event);
        self.state = state;
        if let Some(date) = selected {
            (self.on_select)(date);
        }
        self.state
    }

    /// Re-initializes from a new initial date, as when reopened elsewhere
    pub fn reset(&mut self, initial: Option<&str>) {
        self.state = PickerState::from_initial(&self.calendar, initial, self.today);
    }

    pub fn set_today(&mut self, today: GregorianDate) {
        self.today = today;
    }

    pub fn grid(&self) -> MonthGrid {
        month_grid(&self.calendar, &self.state, self.today)
    }

    pub const fn year_options(&self) -> RangeInclusive<i32> {
        year_options(self.today, self.config.year_window)
    }
}

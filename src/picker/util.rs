use time::{Date, Month};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Number of week rows in every rendered month
pub(crate) const WEEK_ROWS: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEK_ROWS;

pub(crate) static WEEKDAY_LABELS: [&str; DAYS_IN_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the full English name of the month with the given zero-based
/// index.
///
/// # Panics
///
/// Panics if `index` is not in `0..12`.
pub(crate) fn month_name(index: usize) -> &'static str {
    assert!(index < MONTH_NAMES.len(), "month index out of range: {index}");
    MONTH_NAMES[index]
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    month.length(year)
}

/// Length of the month before `month` in `year`, crossing into the previous
/// year for January
pub(crate) fn days_in_previous_month(year: i32, month: Month) -> u8 {
    let year = if month == Month::January { year - 1 } else { year };
    month.previous().length(year)
}

/// Sunday-based index (0 = Sunday) of the weekday of `first`
pub(crate) fn first_weekday(first: Date) -> u8 {
    first.weekday().number_days_from_sunday()
}

/// Number of previous-month cells shown before the 1st.
///
/// The offset is counted as though weeks began on Monday even though the
/// weekday labels begin on Sunday, so a month starting on a Sunday gets six
/// leading cells.
pub(crate) fn leading_count(first_weekday: u8) -> u8 {
    if first_weekday == 0 {
        6
    } else {
        first_weekday - 1
    }
}

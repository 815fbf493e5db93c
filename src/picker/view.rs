use super::util::{days_in_month, month_name};
use thiserror::Error;
use time::{
    Date,
    Month::{self, December, January},
};

/// The month currently displayed by a picker.
///
/// Stored as the first day of the month, so a `ViewState` can only name a
/// month that the date library can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct ViewState {
    first: Date,
}

impl ViewState {
    pub(crate) fn new(year: i32, month: Month) -> Result<ViewState, OutOfTimeError> {
        Date::from_calendar_date(year, month, 1)
            .map(|first| ViewState { first })
            .map_err(|_| OutOfTimeError)
    }

    /// Returns the view of the month containing `date`
    pub(crate) fn containing(date: Date) -> ViewState {
        ViewState {
            first: date - time::Duration::days(i64::from(date.day()) - 1),
        }
    }

    pub(crate) fn first_day(&self) -> Date {
        self.first
    }

    pub(crate) fn year(&self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    /// Zero-based month index, 0 = January
    pub(crate) fn month0(&self) -> u8 {
        u8::from(self.month()) - 1
    }

    pub(crate) fn days_in_month(&self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// Header text, e.g. "April 2024"
    pub(crate) fn title(&self) -> String {
        format!("{} {}", month_name(usize::from(self.month0())), self.year())
    }

    pub(crate) fn previous(self) -> Result<ViewState, OutOfTimeError> {
        match self.month() {
            January => ViewState::new(self.year().checked_sub(1).ok_or(OutOfTimeError)?, December),
            m => ViewState::new(self.year(), m.previous()),
        }
    }

    pub(crate) fn next(self) -> Result<ViewState, OutOfTimeError> {
        match self.month() {
            December => ViewState::new(self.year().checked_add(1).ok_or(OutOfTimeError)?, January),
            m => ViewState::new(self.year(), m.next()),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::{February, November};

    #[test]
    fn test_containing() {
        let view = ViewState::containing(date!(2024 - 02 - 17));
        assert_eq!(view.first_day(), date!(2024 - 02 - 01));
        assert_eq!(view.year(), 2024);
        assert_eq!(view.month(), February);
        assert_eq!(view.month0(), 1);
    }

    #[test]
    fn test_containing_first() {
        let view = ViewState::containing(date!(2009 - 01 - 01));
        assert_eq!(view.first_day(), date!(2009 - 01 - 01));
    }

    #[test]
    fn test_title() {
        assert_eq!(ViewState::new(2024, February).unwrap().title(), "February 2024");
        assert_eq!(ViewState::new(2009, January).unwrap().title(), "January 2009");
    }

    #[test]
    fn test_next_within_year() {
        let view = ViewState::new(2024, November).unwrap().next().unwrap();
        assert_eq!((view.year(), view.month()), (2024, December));
    }

    #[test]
    fn test_next_rolls_over_year() {
        let view = ViewState::new(2024, December).unwrap().next().unwrap();
        assert_eq!((view.year(), view.month()), (2025, January));
        assert_eq!(view.month0(), 0);
    }

    #[test]
    fn test_previous_rolls_over_year() {
        let view = ViewState::new(2024, January).unwrap().previous().unwrap();
        assert_eq!((view.year(), view.month()), (2023, December));
        assert_eq!(view.month0(), 11);
    }

    #[test]
    fn test_round_trip_navigation() {
        let start = ViewState::new(2024, February).unwrap();
        let mut view = start;
        for _ in 0..30 {
            view = view.next().unwrap();
        }
        for _ in 0..30 {
            view = view.previous().unwrap();
        }
        assert_eq!(view, start);
    }

    #[test]
    fn test_end_of_time() {
        let last = ViewState::containing(Date::MAX);
        assert_eq!(last.next(), Err(OutOfTimeError));
        let first = ViewState::containing(Date::MIN);
        assert_eq!(first.previous(), Err(OutOfTimeError));
    }

    #[test]
    fn test_new_out_of_range() {
        assert_eq!(ViewState::new(123_456, January), Err(OutOfTimeError));
    }
}

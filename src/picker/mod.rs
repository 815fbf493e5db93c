mod grid;
mod util;
mod view;
mod widget;
pub(crate) use self::grid::{Action, MonthGrid};
use self::grid::Origin;
pub(crate) use self::view::{OutOfTimeError, ViewState};
pub(crate) use self::widget::{PickerView, PICKER_HEIGHT, PICKER_WIDTH};
use std::fmt;
use time::Date;

/// A date chosen by clicking a day of the viewed month
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct SelectedDate {
    pub(crate) year: i32,
    /// 1-based
    pub(crate) month: u8,
    pub(crate) day: u8,
}

impl fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// A single-month date picker mounted in the container named `id`.
///
/// The picker owns the month being viewed and the grid most recently rendered
/// from it.  Clicking a day of the viewed month calls `on_select` with the
/// picker's id and the chosen date.
pub(crate) struct DatePicker<F> {
    id: String,
    today: Date,
    view: ViewState,
    grid: MonthGrid,
    on_select: F,
}

impl<F: FnMut(&str, SelectedDate)> DatePicker<F> {
    pub(crate) fn new<S: Into<String>>(id: S, today: Date, on_select: F) -> Self {
        let view = ViewState::containing(today);
        DatePicker {
            id: id.into(),
            today,
            view,
            grid: MonthGrid::build(view),
            on_select,
        }
    }

    /// Start out viewing the month containing `date` instead of the current
    /// month
    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.view = ViewState::containing(date);
        self.render();
        self
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    /// Discard the current grid and build a new one from the viewed month
    pub(crate) fn render(&mut self) -> &MonthGrid {
        self.grid = MonthGrid::build(self.view);
        tracing::debug!(
            id = %self.id,
            month = self.grid.title(),
            leading = self.grid.count(Origin::PreviousMonth),
            trailing = self.grid.count(Origin::NextMonth),
            "Rendered date picker"
        );
        &self.grid
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.view = self.view.previous()?;
        tracing::debug!(id = %self.id, "Moved to previous month");
        self.render();
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.view = self.view.next()?;
        tracing::debug!(id = %self.id, "Moved to next month");
        self.render();
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.view = ViewState::containing(self.today);
        self.render();
    }

    /// Report `day` of the viewed month to the callback.  Returns `None`
    /// without calling back if the viewed month has no such day.
    pub(crate) fn select_day(&mut self, day: u8) -> Option<SelectedDate> {
        if !(1..=self.view.days_in_month()).contains(&day) {
            return None;
        }
        let date = SelectedDate {
            year: self.view.year(),
            month: self.view.month0() + 1,
            day,
        };
        tracing::info!(id = %self.id, %date, "Date selected");
        (self.on_select)(&self.id, date);
        Some(date)
    }

    pub(crate) fn dispatch(&mut self, action: Action) -> Result<(), OutOfTimeError> {
        match action {
            Action::PreviousMonth => self.previous_month(),
            Action::NextMonth => self.next_month(),
            Action::SelectDay(day) => {
                self.select_day(day);
                Ok(())
            }
        }
    }
}

impl<F> fmt::Debug for DatePicker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("id", &self.id)
            .field("today", &self.today)
            .field("view", &self.view)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

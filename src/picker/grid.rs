use super::util::{
    days_in_previous_month, first_weekday, leading_count, GRID_CELLS, WEEKDAY_LABELS,
};
use super::view::ViewState;

/// Which month a grid cell belongs to, relative to the viewed month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Origin {
    PreviousMonth,
    CurrentMonth,
    NextMonth,
}

/// Something a user can trigger by clicking part of a rendered month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Action {
    PreviousMonth,
    NextMonth,
    SelectDay(u8),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) label: u8,
    pub(crate) origin: Origin,
}

impl DayCell {
    /// Only days of the viewed month can be selected
    pub(crate) fn action(&self) -> Option<Action> {
        (self.origin == Origin::CurrentMonth).then_some(Action::SelectDay(self.label))
    }
}

/// The visual tree of a picker for one month: a header with the title between
/// the previous & next controls, a row of weekday labels, and the days grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    title: String,
    // Invariant: exactly GRID_CELLS cells, previous-month cells first, then
    // every day of the viewed month, then next-month cells
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub(crate) fn build(view: ViewState) -> MonthGrid {
        let leading = leading_count(first_weekday(view.first_day()));
        let days = view.days_in_month();
        let prev_days = days_in_previous_month(view.year(), view.month());
        let mut cells = Vec::with_capacity(GRID_CELLS);
        cells.extend(
            (prev_days - leading + 1..=prev_days).map(|label| DayCell {
                label,
                origin: Origin::PreviousMonth,
            }),
        );
        cells.extend((1..=days).map(|label| DayCell {
            label,
            origin: Origin::CurrentMonth,
        }));
        let trailing = GRID_CELLS - cells.len();
        cells.extend((1..).take(trailing).map(|label| DayCell {
            label,
            origin: Origin::NextMonth,
        }));
        MonthGrid {
            title: view.title(),
            cells,
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn weekday_labels(&self) -> &'static [&'static str] {
        &WEEKDAY_LABELS
    }

    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub(crate) fn cell(&self, index: usize) -> Option<DayCell> {
        self.cells.get(index).copied()
    }

    pub(crate) fn count(&self, origin: Origin) -> usize {
        self.cells.iter().filter(|c| c.origin == origin).count()
    }
}

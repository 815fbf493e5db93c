use super::grid::{Action, MonthGrid, Origin};
use super::util::{DAYS_IN_WEEK, WEEK_ROWS};
use crate::theme::{
    BASE_STYLE, CONTROL_STYLE, CURRENT_DAY_STYLE, OTHER_MONTH_DAY_STYLE, TITLE_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 3;

/// Width of a rendered picker: seven days, minus the gap after the last one
pub(crate) const PICKER_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Number of lines taken up by the header and the weekday labels
const HEADER_LINES: u16 = 2;

pub(crate) const PICKER_HEIGHT: u16 = HEADER_LINES + 6;

const PREV_CONTROL: &str = "<";
const NEXT_CONTROL: &str = ">";

/// Paints a rendered month:
///
/// ```text
/// <    April 2024    >
/// Su Mo Tu We Th Fr Sa
///  1  2  3  4  5  6  7
///  8  9 10 11 12 13 14
/// 15 16 17 18 19 20 21
/// 22 23 24 25 26 27 28
/// 29 30  1  2  3  4  5
///  6  7  8  9 10 11 12
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerView<'a> {
    grid: &'a MonthGrid,
}

impl<'a> PickerView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid) -> Self {
        PickerView { grid }
    }

    /// Returns the action bound to the character at (`x`, `y`), relative to
    /// the top-left corner of the area the picker was painted in
    pub(crate) fn action_at(&self, x: u16, y: u16) -> Option<Action> {
        match y {
            0 if x == 0 => Some(Action::PreviousMonth),
            0 if x == PICKER_WIDTH - 1 => Some(Action::NextMonth),
            HEADER_LINES.. if x % DAY_WIDTH != DAY_WIDTH - 1 => {
                let col = usize::from(x / DAY_WIDTH);
                let row = usize::from(y - HEADER_LINES);
                if col < DAYS_IN_WEEK && row < WEEK_ROWS {
                    self.grid.cell(row * DAYS_IN_WEEK + col)?.action()
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Widget for PickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let mut canvas = BufferCanvas::new(area, buf);
        let title = self.grid.title();
        let title_width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        canvas.mvprint(0, 0, PREV_CONTROL, CONTROL_STYLE);
        canvas.mvprint(0, PICKER_WIDTH.saturating_sub(title_width) / 2, title, TITLE_STYLE);
        canvas.mvprint(0, PICKER_WIDTH - 1, NEXT_CONTROL, CONTROL_STYLE);
        canvas.mvprint(1, 0, self.grid.weekday_labels().join(" "), WEEKDAY_STYLE);
        for (y, week) in std::iter::zip(HEADER_LINES.., self.grid.cells().chunks(DAYS_IN_WEEK)) {
            for (x, cell) in std::iter::zip((0..).step_by(DAY_WIDTH.into()), week) {
                let style = match cell.origin {
                    Origin::CurrentMonth => CURRENT_DAY_STYLE,
                    Origin::PreviousMonth | Origin::NextMonth => OTHER_MONTH_DAY_STYLE,
                };
                canvas.mvprint(y, x, format!("{:2}", cell.label), style);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Text extending past the right edge of the area is truncated; text
    // starting outside the area is dropped.
    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}

use crate::help::Help;
use crate::picker::{Action, DatePicker, PickerView, SelectedDate, PICKER_HEIGHT, PICKER_WIDTH};
use crate::theme::{BASE_STYLE, FOCUSED_BORDER_STYLE};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Margin, Position, Rect},
    widgets::{Block, Widget},
    Terminal,
};
use std::io::{self, Write};

/// Width of a picker's container: the picker plus a border and a column of
/// padding on each side
const PANE_WIDTH: u16 = PICKER_WIDTH + 4;

const PANE_HEIGHT: u16 = PICKER_HEIGHT + 2;

#[derive(Debug)]
pub(crate) struct App<F> {
    pickers: Vec<DatePicker<F>>,
    // Where each picker was last painted, for routing mouse clicks
    areas: Vec<Rect>,
    focus: usize,
    state: AppState,
}

impl<F: FnMut(&str, SelectedDate)> App<F> {
    pub(crate) fn new(pickers: Vec<DatePicker<F>>) -> App<F> {
        App {
            pickers,
            areas: Vec::new(),
            focus: 0,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if !self.handle_event(read()?) {
            self.beep()?;
        }
        Ok(())
    }

    // Returns `false` if the event should be answered with a beep
    fn handle_event(&mut self, event: Event) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                tracing::trace!(?code, ?modifiers, "Key pressed");
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                    true
                } else {
                    normal_modifiers.contains(modifiers) && self.handle_key(code)
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                tracing::trace!(column, row, "Mouse clicked");
                self.handle_click(column, row)
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => true,
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h' | '<') | KeyCode::Left => self.dispatch(Action::PreviousMonth),
                KeyCode::Char('l' | '>') | KeyCode::Right => self.dispatch(Action::NextMonth),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Tab => self.focus_next(),
                KeyCode::BackTab => self.focus_previous(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click triggered an action that failed
    fn handle_click(&mut self, x: u16, y: u16) -> bool {
        match self.state {
            AppState::Calendar => (),
            AppState::Helping => {
                self.state = AppState::Calendar;
                return true;
            }
            AppState::Quitting => return false,
        }
        let pos = Position::new(x, y);
        let Some((i, area)) = self
            .areas
            .iter()
            .copied()
            .enumerate()
            .find(|(_, area)| area.contains(pos))
        else {
            return true;
        };
        self.focus = i;
        let action = self
            .pickers
            .get(i)
            .and_then(|p| PickerView::new(p.grid()).action_at(x - area.x, y - area.y));
        match action {
            Some(action) => self.dispatch(action),
            None => true,
        }
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let Some(picker) = self.pickers.get_mut(self.focus) else {
            return false;
        };
        match picker.dispatch(action) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = picker.id(), ?action, "{e}");
                false
            }
        }
    }

    fn reset(&mut self) -> bool {
        if let Some(picker) = self.pickers.get_mut(self.focus) {
            picker.jump_to_today();
            true
        } else {
            false
        }
    }

    fn focus_next(&mut self) -> bool {
        if self.pickers.is_empty() {
            return false;
        }
        self.focus = (self.focus + 1) % self.pickers.len();
        true
    }

    fn focus_previous(&mut self) -> bool {
        if self.pickers.is_empty() {
            return false;
        }
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(self.pickers.len() - 1);
        true
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<F: FnMut(&str, SelectedDate)> Widget for &mut App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [row] = Layout::vertical([PANE_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        let panes = Layout::horizontal(vec![Constraint::Length(PANE_WIDTH); self.pickers.len()])
            .flex(Flex::Center)
            .split(row);
        self.areas.clear();
        for (i, (picker, &pane)) in self.pickers.iter().zip(panes.iter()).enumerate() {
            let block = Block::bordered()
                .title(format!(" {} ", picker.id()))
                .border_style(if i == self.focus {
                    FOCUSED_BORDER_STYLE
                } else {
                    BASE_STYLE
                });
            let inner = block.inner(pane).inner(Margin::new(1, 0));
            block.render(pane, buf);
            PickerView::new(picker.grid()).render(inner, buf);
            self.areas.push(inner);
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

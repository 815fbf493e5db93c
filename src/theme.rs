use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const CONTROL_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const CURRENT_DAY_STYLE: Style = BASE_STYLE;

pub(crate) const OTHER_MONTH_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const FOCUSED_BORDER_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

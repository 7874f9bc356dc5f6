use crate::calendar::DayCategory;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const THIS_MONTH_STYLE: Style = BASE_STYLE;

pub(crate) const NOT_THIS_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_LIGHT_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const TODAY_DARK_STYLE: Style = BASE_STYLE.fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Background for a day while the mouse button is down on it
pub(crate) const PRESSED_BG: Color = Color::DarkGray;

/// Style for a day cell.  Selection layers `REVERSED` over the underlying
/// month-membership or today style, so a selected day keeps its text color
/// and marker.
pub(crate) fn day_style(category: DayCategory, light_today_text: bool) -> Style {
    let today = if light_today_text {
        TODAY_LIGHT_STYLE
    } else {
        TODAY_DARK_STYLE
    };
    match category {
        DayCategory::ThisMonth => THIS_MONTH_STYLE,
        DayCategory::NotThisMonth => NOT_THIS_MONTH_STYLE,
        DayCategory::Today => today,
        DayCategory::SelectedAndThisMonth => THIS_MONTH_STYLE.add_modifier(Modifier::REVERSED),
        DayCategory::SelectedAndNotThisMonth => {
            NOT_THIS_MONTH_STYLE.add_modifier(Modifier::REVERSED)
        }
        DayCategory::SelectedAndToday => today.add_modifier(Modifier::REVERSED),
    }
}

pub(crate) mod goto {
    use super::*;

    pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

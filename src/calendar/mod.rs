mod month;
mod row;
mod widget;
pub(crate) use self::month::MonthGrid;
pub(crate) use self::row::DayCategory;
pub(crate) use self::widget::MonthCalendar;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a calendar view would reach past the dates representable by
/// [`time::Date`].
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("date outside the supported calendar range")]
pub(crate) struct OutOfRangeError;

/// Display and interaction options, applied when the grid is built and
/// read-only afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    /// Hide the leading and trailing days that belong to the neighboring
    /// months.  Hidden days cannot be selected.
    pub(crate) hide_outside_days: bool,
    /// Render today's date in a light text color.
    pub(crate) light_today_text: bool,
    /// Change a day's background while the mouse button is down on it.
    pub(crate) highlight_pressed_day: bool,
    /// Which half of a mouse click selects a day.
    pub(crate) select_on: SelectEvent,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            hide_outside_days: false,
            light_today_text: true,
            highlight_pressed_day: false,
            select_on: SelectEvent::Press,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SelectEvent {
    /// Select the day under the pointer as soon as the button goes down.
    #[default]
    Press,
    /// Select on button release, and only when the release lands on the day
    /// that was pressed.
    Release,
}

impl FromStr for SelectEvent {
    type Err = ParseSelectEventError;

    fn from_str(s: &str) -> Result<SelectEvent, ParseSelectEventError> {
        match s {
            "press" | "down" => Ok(SelectEvent::Press),
            "release" | "up" => Ok(SelectEvent::Release),
            _ => Err(ParseSelectEventError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error(r#"expected "press" or "release""#)]
pub(crate) struct ParseSelectEventError;

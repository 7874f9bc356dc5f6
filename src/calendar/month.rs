use super::row::WeekRow;
use super::{Config, OutOfRangeError};
use time::{Date, Duration, Month};

/// Where the widget last drew the day-cell grid, in buffer coordinates.
/// Recorded during rendering so that mouse positions can be mapped back to
/// days.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridLayout {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) day_width: u16,
}

/// The displayed month: a stack of recycled week rows plus the selection
/// coordination between them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    today: Date,
    month_start: Date,
    config: Config,
    rows: Vec<WeekRow>,
    pressed: Option<Date>,
    layout: Option<GridLayout>,
}

impl MonthGrid {
    pub(crate) fn new(today: Date, config: Config) -> Result<MonthGrid, OutOfRangeError> {
        let mut grid = MonthGrid {
            today,
            month_start: month_start_of(today),
            config,
            rows: Vec::new(),
            pressed: None,
            layout: None,
        };
        grid.show_month(grid.month_start)?;
        Ok(grid)
    }

    pub(crate) fn month_start(&self) -> Date {
        self.month_start
    }

    pub(crate) fn config(&self) -> Config {
        self.config
    }

    pub(crate) fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub(crate) fn pressed(&self) -> Option<Date> {
        self.pressed
    }

    pub(crate) fn set_pressed(&mut self, date: Option<Date>) {
        self.pressed = date;
    }

    pub(crate) fn set_layout(&mut self, layout: GridLayout) {
        self.layout = Some(layout);
    }

    pub(crate) fn selected_date(&self) -> Option<Date> {
        self.rows.iter().find_map(WeekRow::selected_date)
    }

    /// Display the month containing `month`, reusing the existing rows.  A
    /// selected date that is still visible and interactable afterwards stays
    /// selected; any other selection is dropped.
    pub(crate) fn show_month(&mut self, month: Date) -> Result<(), OutOfRangeError> {
        let month_start = month_start_of(month);
        let (first_visible, weeks) = view_span(month_start)?;
        let keep = self.selected_date();
        let mut beginning = first_visible;
        for index in 0..weeks {
            let bottom_row = index + 1 == weeks;
            match self.rows.get_mut(index) {
                Some(row) => row.reconfigure(beginning, month_start, bottom_row)?,
                None => self.rows.push(WeekRow::new(
                    beginning,
                    month_start,
                    self.today,
                    self.config.hide_outside_days,
                    bottom_row,
                )?),
            }
            if index + 1 < weeks {
                beginning = beginning.checked_add(Duration::WEEK).ok_or(OutOfRangeError)?;
            }
        }
        self.rows.truncate(weeks);
        self.month_start = month_start;
        self.select_date(keep);
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfRangeError> {
        self.show_month(next_month_start(self.month_start)?)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfRangeError> {
        self.show_month(previous_month_start(self.month_start)?)
    }

    /// Show `date`'s month and select `date`.
    pub(crate) fn jump_to(&mut self, date: Date) -> Result<(), OutOfRangeError> {
        let month_start = month_start_of(date);
        if month_start != self.month_start {
            self.show_month(month_start)?;
        }
        self.select_date(Some(date));
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), OutOfRangeError> {
        self.jump_to(self.today)
    }

    /// Move the selection by a signed number of days, switching months when
    /// the target falls outside the displayed one.  With nothing selected
    /// the first move selects an anchor (today when its month is displayed,
    /// else the first of the month) without applying the offset.
    pub(crate) fn move_selection(&mut self, days: i64) -> Result<(), OutOfRangeError> {
        let target = match self.selected_date() {
            Some(date) => date
                .checked_add(Duration::days(days))
                .ok_or(OutOfRangeError)?,
            None => self.anchor(),
        };
        self.jump_to(target)
    }

    /// Cross-row single-selection protocol: the row containing the date gets
    /// `select_column_for_date(date)` and every sibling row gets
    /// `select_column_for_date(None)`, so at most one day is selected across
    /// the whole grid.  A date that is not visible and interactable leaves
    /// every row untouched.
    pub(crate) fn select_date(&mut self, date: Option<Date>) {
        match date {
            None => {
                for row in &mut self.rows {
                    row.select_column_for_date(None);
                }
            }
            Some(date) => {
                let Some(target) = self.rows.iter().position(|row| row.is_interactable(date))
                else {
                    return;
                };
                for (index, row) in self.rows.iter_mut().enumerate() {
                    row.select_column_for_date((index == target).then_some(date));
                }
            }
        }
    }

    /// Map a buffer position to the interactable day rendered there.
    pub(crate) fn hit_test(&self, column: u16, row: u16) -> Option<Date> {
        let layout = self.layout?;
        let col = usize::from(column.checked_sub(layout.x)? / layout.day_width);
        let week = usize::from(row.checked_sub(layout.y)?);
        let cell = self.rows.get(week)?.days().nth(col)?;
        cell.interactable.then_some(cell.date)
    }

    fn anchor(&self) -> Date {
        if month_start_of(self.today) == self.month_start {
            self.today
        } else {
            self.month_start
        }
    }
}

fn month_start_of(date: Date) -> Date {
    Date::from_calendar_date(date.year(), date.month(), 1)
        .expect("the first of an existing month should be a valid date")
}

fn next_month_start(month_start: Date) -> Result<Date, OutOfRangeError> {
    let (year, month) = match month_start.month() {
        Month::December => (month_start.year() + 1, Month::January),
        m => (month_start.year(), m.next()),
    };
    Date::from_calendar_date(year, month, 1).map_err(|_| OutOfRangeError)
}

fn previous_month_start(month_start: Date) -> Result<Date, OutOfRangeError> {
    let (year, month) = match month_start.month() {
        Month::January => (month_start.year() - 1, Month::December),
        m => (month_start.year(), m.previous()),
    };
    Date::from_calendar_date(year, month, 1).map_err(|_| OutOfRangeError)
}

// The first visible day (the Sunday on or before the first of the month) and
// the number of week rows needed to cover the month.
fn view_span(month_start: Date) -> Result<(Date, usize), OutOfRangeError> {
    let offset = month_start.weekday().number_days_from_sunday();
    let first_visible = month_start
        .checked_sub(Duration::days(i64::from(offset)))
        .ok_or(OutOfRangeError)?;
    let length = next_month_start(month_start)?
        .previous_day()
        .ok_or(OutOfRangeError)?
        .day();
    let weeks = (usize::from(offset) + usize::from(length)).div_ceil(7);
    Ok((first_visible, weeks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 02 - 27);

    fn sample(config: Config) -> MonthGrid {
        MonthGrid::new(TODAY, config).unwrap()
    }

    #[test]
    fn february_2024_shape() {
        let grid = sample(Config::default());
        assert_eq!(grid.month_start(), date!(2024 - 02 - 01));
        assert_eq!(grid.rows().len(), 5);
        assert_eq!(grid.rows()[0].beginning_date(), date!(2024 - 01 - 28));
        assert_eq!(grid.rows()[4].beginning_date(), date!(2024 - 02 - 25));
        assert!(grid.rows()[4].is_bottom_row());
        assert!(grid.rows().iter().take(4).all(|row| !row.is_bottom_row()));
    }

    #[test]
    fn selection_moves_between_rows() {
        let mut grid = sample(Config::default());
        grid.select_date(Some(date!(2024 - 02 - 05)));
        grid.select_date(Some(date!(2024 - 02 - 27)));
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 27)));
        let selected_rows = grid
            .rows()
            .iter()
            .filter(|row| row.selected_date().is_some())
            .count();
        assert_eq!(selected_rows, 1);
        grid.select_date(None);
        assert_eq!(grid.selected_date(), None);
    }

    #[test]
    fn invisible_date_leaves_the_selection_alone() {
        let mut grid = sample(Config::default());
        grid.select_date(Some(date!(2024 - 02 - 05)));
        grid.select_date(Some(date!(2024 - 06 - 01)));
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 05)));
    }

    #[test]
    fn hidden_outside_day_is_not_selectable() {
        let mut grid = sample(Config {
            hide_outside_days: true,
            ..Config::default()
        });
        grid.select_date(Some(date!(2024 - 02 - 05)));
        grid.select_date(Some(date!(2024 - 03 - 01)));
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 05)));
    }

    #[test]
    fn navigation_recycles_rows_and_keeps_a_visible_selection() {
        let mut grid = sample(Config::default());
        grid.select_date(Some(date!(2024 - 02 - 27)));
        grid.next_month().unwrap();
        assert_eq!(grid.month_start(), date!(2024 - 03 - 01));
        assert_eq!(grid.rows().len(), 6);
        // Feb 27 is still visible in the March view's first row
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 27)));
        grid.next_month().unwrap();
        assert_eq!(grid.month_start(), date!(2024 - 04 - 01));
        assert_eq!(grid.rows().len(), 5);
        assert_eq!(grid.selected_date(), None);
    }

    #[test]
    fn hidden_selection_is_dropped_on_navigation() {
        let mut grid = sample(Config {
            hide_outside_days: true,
            ..Config::default()
        });
        grid.select_date(Some(date!(2024 - 02 - 27)));
        grid.next_month().unwrap();
        assert_eq!(grid.selected_date(), None);
    }

    #[test]
    fn move_selection_anchors_then_moves() {
        let mut grid = sample(Config::default());
        grid.move_selection(1).unwrap();
        assert_eq!(grid.selected_date(), Some(TODAY));
        grid.move_selection(1).unwrap();
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 28)));
        grid.move_selection(7).unwrap();
        assert_eq!(grid.selected_date(), Some(date!(2024 - 03 - 06)));
        assert_eq!(grid.month_start(), date!(2024 - 03 - 01));
        grid.move_selection(-7).unwrap();
        assert_eq!(grid.selected_date(), Some(date!(2024 - 02 - 28)));
        assert_eq!(grid.month_start(), date!(2024 - 02 - 01));
    }

    #[test]
    fn jump_to_changes_month_and_selects() {
        let mut grid = sample(Config::default());
        grid.jump_to(date!(2031 - 07 - 04)).unwrap();
        assert_eq!(grid.month_start(), date!(2031 - 07 - 01));
        assert_eq!(grid.selected_date(), Some(date!(2031 - 07 - 04)));
        grid.jump_to_today().unwrap();
        assert_eq!(grid.month_start(), date!(2024 - 02 - 01));
        assert_eq!(grid.selected_date(), Some(TODAY));
    }

    #[test]
    fn months_past_the_end_of_the_calendar_are_an_error() {
        let mut grid = sample(Config::default());
        grid.jump_to(date!(9999 - 12 - 15)).unwrap_err();
        assert_eq!(grid.month_start(), date!(2024 - 02 - 01));
    }

    #[test]
    fn hit_test_maps_positions_to_interactable_days() {
        let mut grid = sample(Config {
            hide_outside_days: true,
            ..Config::default()
        });
        grid.set_layout(GridLayout {
            x: 2,
            y: 3,
            day_width: 4,
        });
        assert_eq!(grid.hit_test(10, 7), Some(date!(2024 - 02 - 27)));
        assert_eq!(grid.hit_test(2, 3), None); // Jan 28, hidden
        assert_eq!(grid.hit_test(1, 5), None); // left of the grid
        assert_eq!(grid.hit_test(2, 9), None); // below the grid
        assert_eq!(grid.hit_test(30, 3), None); // right of the grid
    }
}

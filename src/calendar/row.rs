use super::OutOfRangeError;
use time::Date;

const DAYS_IN_WEEK: usize = 7;

/// Display category of one day cell.  Exactly one applies to any day.
///
/// Selection compounds with the other axes instead of replacing them, so the
/// renderer can still pick the right marker and text color for a selected
/// day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayCategory {
    ThisMonth,
    NotThisMonth,
    Today,
    SelectedAndThisMonth,
    SelectedAndNotThisMonth,
    SelectedAndToday,
}

impl DayCategory {
    pub(crate) fn is_today(self) -> bool {
        matches!(self, DayCategory::Today | DayCategory::SelectedAndToday)
    }

    fn is_outside_month(self) -> bool {
        matches!(
            self,
            DayCategory::NotThisMonth | DayCategory::SelectedAndNotThisMonth
        )
    }
}

/// Classify a day relative to the displayed month, the current date, and the
/// selection.  Pure; the row invokes it once per column per render pass, so
/// a category can never go stale.
///
/// The returned flag tells whether the day can take a selection: only days
/// outside the displayed month lose it, and only when `hide_outside_days` is
/// set.
pub(crate) fn classify(
    date: Date,
    month_start: Date,
    today: Date,
    selected: Option<Date>,
    hide_outside_days: bool,
) -> (DayCategory, bool) {
    let category = match (selected == Some(date), date == today, same_month(date, month_start)) {
        (true, true, _) => DayCategory::SelectedAndToday,
        (true, false, true) => DayCategory::SelectedAndThisMonth,
        (true, false, false) => DayCategory::SelectedAndNotThisMonth,
        (false, true, _) => DayCategory::Today,
        (false, false, true) => DayCategory::ThisMonth,
        (false, false, false) => DayCategory::NotThisMonth,
    };
    let interactable = !(hide_outside_days && category.is_outside_month());
    (category, interactable)
}

fn same_month(a: Date, b: Date) -> bool {
    (a.year(), a.month()) == (b.year(), b.month())
}

/// Snapshot of one column, derived on demand for rendering and hit-testing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) category: DayCategory,
    pub(crate) interactable: bool,
}

impl DayCell {
    /// Cell text, four columns wide.  Today gets bracket markers.
    pub(crate) fn show(&self) -> String {
        let day = self.date.day();
        if self.category.is_today() {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        }
    }
}

/// One week of the calendar: seven consecutive days starting at
/// `beginning_date`, which may fall before the reference month (and the last
/// columns may fall after it).
///
/// At most one column is selected at a time.  The invariant holds by
/// construction: `select_column_for_date` is the only way the selection
/// changes, and repurposing the row for a different week resets it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekRow {
    beginning_date: Date,
    month_start: Date,
    today: Date,
    hide_outside_days: bool,
    bottom_row: bool,
    columns: [Date; DAYS_IN_WEEK],
    selected: Option<usize>,
}

impl WeekRow {
    pub(crate) fn new(
        beginning_date: Date,
        month_start: Date,
        today: Date,
        hide_outside_days: bool,
        bottom_row: bool,
    ) -> Result<WeekRow, OutOfRangeError> {
        Ok(WeekRow {
            beginning_date,
            month_start,
            today,
            hide_outside_days,
            bottom_row,
            columns: columns_for(beginning_date)?,
            selected: None,
        })
    }

    /// Repurpose this row for a different week, as the month grid does when
    /// the displayed month changes.  The columns are rederived from the new
    /// beginning date and the selection is reset, not carried over.
    pub(crate) fn reconfigure(
        &mut self,
        beginning_date: Date,
        month_start: Date,
        bottom_row: bool,
    ) -> Result<(), OutOfRangeError> {
        self.columns = columns_for(beginning_date)?;
        self.beginning_date = beginning_date;
        self.month_start = month_start;
        self.bottom_row = bottom_row;
        self.selected = None;
        Ok(())
    }

    pub(crate) fn beginning_date(&self) -> Date {
        self.beginning_date
    }

    pub(crate) fn is_bottom_row(&self) -> bool {
        self.bottom_row
    }

    /// Whether `date` is one of this row's columns and can take a selection.
    pub(crate) fn is_interactable(&self, date: Date) -> bool {
        self.columns
            .iter()
            .position(|&d| d == date)
            .is_some_and(|i| self.day(i).interactable)
    }

    pub(crate) fn selected_date(&self) -> Option<Date> {
        self.selected.map(|i| self.columns[i])
    }

    pub(crate) fn day(&self, column: usize) -> DayCell {
        let date = self.columns[column];
        let (category, interactable) = classify(
            date,
            self.month_start,
            self.today,
            self.selected_date(),
            self.hide_outside_days,
        );
        DayCell {
            date,
            category,
            interactable,
        }
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = DayCell> + '_ {
        (0..DAYS_IN_WEEK).map(|i| self.day(i))
    }

    /// Sole mutation entry point for the selection.
    ///
    /// `None` clears this row's selection; the month grid uses that to
    /// deselect sibling rows when another row takes a selection.  A date
    /// that is not one of this row's columns, or that names a hidden day,
    /// leaves the selection untouched.
    pub(crate) fn select_column_for_date(&mut self, date: Option<Date>) {
        match date {
            None => self.selected = None,
            Some(date) => {
                if let Some(i) = self.columns.iter().position(|&d| d == date) {
                    if self.day(i).interactable {
                        self.selected = Some(i);
                    }
                }
            }
        }
    }
}

fn columns_for(beginning_date: Date) -> Result<[Date; DAYS_IN_WEEK], OutOfRangeError> {
    let mut columns = [beginning_date; DAYS_IN_WEEK];
    let mut day = beginning_date;
    for slot in &mut columns[1..] {
        day = day.next_day().ok_or(OutOfRangeError)?;
        *slot = day;
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const FEBRUARY: Date = date!(2024 - 02 - 01);
    const TODAY: Date = date!(2024 - 02 - 27);

    // The last week of February 2024: Feb 25 through Mar 2
    fn sample_row(hide_outside_days: bool) -> WeekRow {
        WeekRow::new(
            date!(2024 - 02 - 25),
            FEBRUARY,
            TODAY,
            hide_outside_days,
            true,
        )
        .unwrap()
    }

    fn selected_count(row: &WeekRow) -> usize {
        row.days()
            .filter(|cell| {
                matches!(
                    cell.category,
                    DayCategory::SelectedAndThisMonth
                        | DayCategory::SelectedAndNotThisMonth
                        | DayCategory::SelectedAndToday
                )
            })
            .count()
    }

    #[test]
    fn one_category_per_column() {
        let row = sample_row(false);
        let categories = row.days().map(|cell| cell.category).collect::<Vec<_>>();
        assert_eq!(
            categories,
            [
                DayCategory::ThisMonth,    // Feb 25
                DayCategory::ThisMonth,    // Feb 26
                DayCategory::Today,        // Feb 27
                DayCategory::ThisMonth,    // Feb 28
                DayCategory::ThisMonth,    // Feb 29
                DayCategory::NotThisMonth, // Mar 1
                DayCategory::NotThisMonth, // Mar 2
            ]
        );
        assert!(row.days().all(|cell| cell.interactable));
    }

    #[test]
    fn month_membership_compares_year_and_month() {
        let row = WeekRow::new(
            date!(2024 - 12 - 29),
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 02),
            false,
            false,
        )
        .unwrap();
        assert_eq!(row.day(0).category, DayCategory::NotThisMonth); // Dec 29, 2024
        assert_eq!(row.day(3).category, DayCategory::ThisMonth); // Jan 1, 2025
        assert_eq!(row.day(4).category, DayCategory::Today); // Jan 2, 2025
    }

    #[test]
    fn select_today_then_clear() {
        let mut row = sample_row(false);
        row.select_column_for_date(Some(TODAY));
        assert_eq!(row.selected_date(), Some(TODAY));
        assert_eq!(row.day(2).category, DayCategory::SelectedAndToday);
        row.select_column_for_date(None);
        assert_eq!(row.selected_date(), None);
        assert_eq!(row.day(2).category, DayCategory::Today);
    }

    #[test]
    fn selection_compounds_with_membership() {
        let mut row = sample_row(false);
        row.select_column_for_date(Some(date!(2024 - 02 - 28)));
        assert_eq!(row.day(3).category, DayCategory::SelectedAndThisMonth);
        row.select_column_for_date(Some(date!(2024 - 03 - 01)));
        assert_eq!(row.day(5).category, DayCategory::SelectedAndNotThisMonth);
        assert_eq!(row.day(3).category, DayCategory::ThisMonth);
    }

    #[test]
    fn at_most_one_column_selected() {
        let mut row = sample_row(false);
        for date in [
            date!(2024 - 02 - 25),
            date!(2024 - 02 - 29),
            date!(2024 - 03 - 02),
            date!(2024 - 02 - 26),
        ] {
            row.select_column_for_date(Some(date));
            assert_eq!(selected_count(&row), 1);
            assert_eq!(row.selected_date(), Some(date));
        }
    }

    #[test]
    fn selecting_twice_is_idempotent() {
        let mut row = sample_row(false);
        row.select_column_for_date(Some(date!(2024 - 02 - 28)));
        let once = row;
        row.select_column_for_date(Some(date!(2024 - 02 - 28)));
        assert_eq!(row, once);
    }

    #[test]
    fn date_outside_the_row_is_a_noop() {
        let mut row = sample_row(false);
        row.select_column_for_date(Some(date!(2024 - 02 - 20)));
        assert_eq!(row.selected_date(), None);
        row.select_column_for_date(Some(date!(2024 - 02 - 26)));
        row.select_column_for_date(Some(date!(2024 - 03 - 09)));
        assert_eq!(row.selected_date(), Some(date!(2024 - 02 - 26)));
    }

    #[test]
    fn hidden_outside_day_cannot_be_selected() {
        let mut row = sample_row(true);
        assert!(!row.day(5).interactable);
        assert!(row.day(2).interactable);
        row.select_column_for_date(Some(date!(2024 - 03 - 01)));
        assert_eq!(row.selected_date(), None);
        row.select_column_for_date(Some(TODAY));
        row.select_column_for_date(Some(date!(2024 - 03 - 01)));
        assert_eq!(row.selected_date(), Some(TODAY));
    }

    #[test]
    fn reconfigure_rederives_columns_and_selection() {
        let mut row = sample_row(false);
        row.select_column_for_date(Some(TODAY));
        row.reconfigure(date!(2024 - 03 - 24), date!(2024 - 03 - 01), true)
            .unwrap();
        assert_eq!(row.beginning_date(), date!(2024 - 03 - 24));
        assert_eq!(row.selected_date(), None);
        assert_eq!(row.day(0).date, date!(2024 - 03 - 24));
        assert_eq!(row.day(6).date, date!(2024 - 03 - 30));
    }

    #[test]
    fn show_marks_today_with_brackets() {
        let row = sample_row(false);
        assert_eq!(row.day(2).show(), "[27]");
        assert_eq!(row.day(3).show(), " 28 ");
        assert_eq!(row.day(5).show(), "  1 ");
    }
}

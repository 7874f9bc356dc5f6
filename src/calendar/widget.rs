use super::month::{GridLayout, MonthGrid};
use crate::theme;
use ratatui::layout::Flex;
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the day-cell grid
const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the month title, the weekday header, and its
/// rule
const HEADER_LINES: u16 = 3;

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar;

impl StatefulWidget for MonthCalendar {
    type State = MonthGrid;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [grid_area] = Layout::horizontal([GRID_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        state.set_layout(GridLayout {
            x: grid_area.x,
            y: grid_area.y + HEADER_LINES,
            day_width: DAY_WIDTH,
        });
        let config = state.config();
        let pressed = state.pressed();
        let month = state.month_start().month();
        let year = state.month_start().year();
        let title = format!("{month} {year}");
        let indent = GRID_WIDTH.saturating_sub(u16::try_from(title.len()).unwrap_or(u16::MAX)) / 2;
        let mut canvas = BufferCanvas::new(grid_area, buf);
        canvas.mvprint(0, indent, title, Some(theme::TITLE_STYLE));
        canvas.mvprint(1, 0, HEADER, Some(theme::WEEKDAY_STYLE));
        canvas.hline(2, 0, GRID_WIDTH);
        for (i, row) in zip(0u16.., state.rows()) {
            let y = HEADER_LINES + i;
            for (col, cell) in zip(0u16.., row.days()) {
                if !cell.interactable {
                    // hidden outside-month day
                    continue;
                }
                let mut style = theme::day_style(cell.category, config.light_today_text);
                if config.highlight_pressed_day && pressed == Some(cell.date) {
                    style = style.bg(theme::PRESSED_BG);
                }
                canvas.mvprint(y, DAY_WIDTH * col, cell.show(), Some(style));
            }
            if row.is_bottom_row() {
                canvas.hline(y + 1, 0, GRID_WIDTH);
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

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Rendering through a Paragraph truncates text that would extend
            // beyond the grid's area, as long as the Rect handed to it stays
            // entirely within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, length: u16) {
        self.mvprint(y, x, String::from(ACS_HLINE).repeat(length.into()), None);
    }
}

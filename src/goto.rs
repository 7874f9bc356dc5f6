use crate::theme::{goto::PLACEHOLDER_STYLE, BASE_STYLE};
use crate::YMD_FMT;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

const OUTER_WIDTH: u16 = 18;
const OUTER_HEIGHT: u16 = 5;

static PLACEHOLDER: &str = "YYYY-MM-DD";

/// Maximum input length: a year sign plus the ten placeholder cells
const MAX_INPUT: usize = PLACEHOLDER.len() + 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * ..................
     * .┌── Go To… ───┐.
     * .│ YYYY-MM-DD  │.
     * .└─────────────┘.
     * ..................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_line().render(text_area, buf);
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GoToState {
    input: String,
}

impl GoToState {
    pub(crate) fn new() -> GoToState {
        GoToState::default()
    }

    fn to_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled(self.input.as_str(), BASE_STYLE)];
        // A leading year sign takes no placeholder cell
        let filled = self
            .input
            .len()
            .saturating_sub(usize::from(self.input.starts_with('-')));
        if filled < PLACEHOLDER.len() {
            spans.push(Span::styled(&PLACEHOLDER[filled..], PLACEHOLDER_STYLE));
        }
        Line::from(spans).centered()
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match input {
            GoToInput::Char(ch) => {
                if (ch.is_ascii_digit() || ch == '-') && self.input.len() < MAX_INPUT {
                    self.input.push(ch);
                    GoToOutput::Ok
                } else {
                    GoToOutput::Invalid
                }
            }
            GoToInput::Backspace => {
                if self.input.pop().is_some() {
                    GoToOutput::Ok
                } else {
                    GoToOutput::Invalid
                }
            }
            GoToInput::Enter => match Date::parse(&self.input, &YMD_FMT) {
                Ok(date) => GoToOutput::Jump(date),
                Err(_) => GoToOutput::Invalid,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Char(char),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Jump(Date),
}

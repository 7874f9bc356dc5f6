use crate::calendar::{MonthCalendar, MonthGrid, SelectEvent};
use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    grid: MonthGrid,
    state: AppState,
    picked: Option<Date>,
}

impl App {
    pub(crate) fn new(grid: MonthGrid) -> App {
        App {
            grid,
            state: AppState::Calendar,
            picked: None,
        }
    }

    /// Run until the user accepts a day or quits.  Returns the accepted
    /// date, if any.
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.picked)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_selection(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_selection(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(7),
                KeyCode::Char('n') | KeyCode::PageDown => self.grid.next_month().is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.grid.previous_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => self.grid.jump_to_today().is_ok(),
                KeyCode::Char('g') => {
                    self.state = AppState::GoingTo(GoToState::new());
                    true
                }
                KeyCode::Enter => self.accept(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::GoingTo(state) => {
                if key == KeyCode::Esc {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(ch) => state.handle_input(GoToInput::Char(ch)),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(GoToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(GoToInput::Enter),
                        _ => GoToOutput::Invalid,
                    };
                    match output {
                        GoToOutput::Ok => true,
                        GoToOutput::Invalid => false,
                        GoToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.grid.jump_to(date).is_ok()
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Calendar {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.grid.hit_test(mouse.column, mouse.row);
                match self.grid.config().select_on {
                    SelectEvent::Press => {
                        if hit.is_some() {
                            self.grid.select_date(hit);
                        }
                    }
                    SelectEvent::Release => self.grid.set_pressed(hit),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.grid.config().select_on == SelectEvent::Release {
                    let hit = self.grid.hit_test(mouse.column, mouse.row);
                    if hit.is_some() && hit == self.grid.pressed() {
                        self.grid.select_date(hit);
                    }
                }
                self.grid.set_pressed(None);
            }
            MouseEventKind::ScrollDown => {
                let _ = self.grid.next_month();
            }
            MouseEventKind::ScrollUp => {
                let _ = self.grid.previous_month();
            }
            _ => (),
        }
    }

    fn move_selection(&mut self, days: i64) -> bool {
        self.grid.move_selection(days).is_ok()
    }

    fn accept(&mut self) -> bool {
        match self.grid.selected_date() {
            Some(date) => {
                self.picked = Some(date);
                self.state = AppState::Quitting;
                true
            }
            None => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthCalendar.render(area, buf, &mut self.grid);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::GoingTo(ref mut state) = self.state {
            GoTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    GoingTo(GoToState),
    Quitting,
}

mod app;
mod calendar;
mod goto;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{Config, MonthGrid};
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { date: Option<Date>, config: Config },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("hide-outside") => config.hide_outside_days = true,
                Arg::Long("dark-today") => config.light_today_text = false,
                Arg::Long("highlight-press") => config.highlight_pressed_day = true,
                Arg::Long("select-on") => config.select_on = parser.value()?.parse()?,
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, config })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, config } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut grid = MonthGrid::new(today, config)
                    .context("today's month does not fit in the calendar")?;
                if let Some(date) = date {
                    grid.jump_to(date)
                        .context("start date does not fit in the calendar")?;
                }
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let picked = App::new(grid).run(&mut terminal)?;
                    Ok(picked)
                })?;
                if let Some(date) = picked {
                    let ymd = date.format(&YMD_FMT).context("failed to format date")?;
                    println!("{ymd}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [options] [YYYY-MM-DD]");
                println!();
                println!("Pick a day from a terminal month calendar; the chosen date is printed");
                println!("on exit");
                println!();
                println!("Options:");
                println!("      --hide-outside     Hide the days outside the displayed month");
                println!("      --dark-today       Render today's date in a dark text color");
                println!("      --highlight-press  Highlight a day while the mouse is down on it");
                println!("      --select-on <press|release>");
                println!("                         When a mouse click selects a day [default: press]");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}

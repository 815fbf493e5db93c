mod app;
mod help;
mod picker;
mod theme;
use crate::app::App;
use crate::picker::{DatePicker, SelectedDate};
use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing::Level;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        dates: Vec<Date>,
        logging: Logging,
    },
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Logging {
    file: Option<PathBuf>,
    level: Level,
}

impl Default for Logging {
    fn default() -> Logging {
        Logging {
            file: None,
            level: Level::INFO,
        }
    }
}

impl Logging {
    // Log records go to a file, if at all, as anything written to stderr
    // would corrupt the display.
    fn init(&self) -> anyhow::Result<()> {
        let Some(path) = self.file.as_ref() else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install logger")?;
        Ok(())
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut dates = Vec::new();
        let mut logging = Logging::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("log-file") => {
                    logging.file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-level") => logging.level = parser.value()?.parse()?,
                Arg::Value(value) => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => dates.push(d),
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
        Ok(Command::Run { dates, logging })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { dates, logging } => {
                logging.init()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let (sender, receiver) = mpsc::channel();
                let pickers = make_pickers(today, &dates, &sender);
                drop(sender);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(pickers).run(terminal)?;
                    Ok(())
                })?;
                for (id, date) in receiver.try_iter() {
                    println!("DatePicker with id {id} selected date: {date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD ...]");
                println!();
                println!("Single-month terminal date picker");
                println!();
                println!("Shows one picker per date given (default: one showing the current");
                println!("month) and prints the dates clicked once it exits.");
                println!();
                println!("Options:");
                println!("  -l, --log-file <PATH>   Write log messages to the given file");
                println!("      --log-level <LEVEL> Minimum level of logged messages [default: INFO]");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
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

/// One picker per date in `dates`, or a single picker showing `today`'s month
/// if there are none.  All pickers share the same notion of "today".
fn make_pickers(
    today: Date,
    dates: &[Date],
    sender: &mpsc::Sender<(String, SelectedDate)>,
) -> Vec<DatePicker<impl FnMut(&str, SelectedDate)>> {
    (0..dates.len().max(1))
        .map(|i| {
            let picker = DatePicker::new(format!("datepicker{}", i + 1), today, reporter(sender));
            match dates.get(i) {
                Some(&date) => picker.start_date(date),
                None => picker,
            }
        })
        .collect()
}

/// Returns a selection callback that forwards each picked date to `sender`
fn reporter(sender: &mpsc::Sender<(String, SelectedDate)>) -> impl FnMut(&str, SelectedDate) {
    let sender = sender.clone();
    move |id, date| {
        if sender.send((id.to_owned(), date)).is_err() {
            tracing::warn!(id, %date, "Selection receiver has gone away");
        }
    }
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = MouseCapture::enable(io::stdout())
        .context("failed to enable mouse capture")
        .and_then(|_capture| func(terminal));
    ratatui::restore();
    r
}

/// Reports mouse events for as long as it lives.  Capture is also released
/// when unwinding from a panic, which the panic hook installed by
/// `ratatui::init()` does not do.
#[derive(Debug)]
struct MouseCapture<W: Write> {
    out: W,
}

impl<W: Write> MouseCapture<W> {
    fn enable(mut out: W) -> io::Result<Self> {
        crossterm::execute!(out, EnableMouseCapture)?;
        Ok(MouseCapture { out })
    }
}

impl<W: Write> Drop for MouseCapture<W> {
    fn drop(&mut self) {
        // Nowhere to report a failure to
        let _ = crossterm::execute!(self.out, DisableMouseCapture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                dates: Vec::new(),
                logging: Logging::default()
            }
        );
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            parse(&["2024-02-14", "2009-01-01"]).unwrap(),
            Command::Run {
                dates: vec![date!(2024 - 02 - 14), date!(2009 - 01 - 01)],
                logging: Logging::default()
            }
        );
    }

    #[test]
    fn test_logging_options() {
        assert_eq!(
            parse(&["--log-file", "picker.log", "--log-level", "debug"]).unwrap(),
            Command::Run {
                dates: Vec::new(),
                logging: Logging {
                    file: Some(PathBuf::from("picker.log")),
                    level: Level::DEBUG,
                }
            }
        );
        assert_eq!(
            parse(&["-l", "picker.log"]).unwrap(),
            Command::Run {
                dates: Vec::new(),
                logging: Logging {
                    file: Some(PathBuf::from("picker.log")),
                    level: Level::INFO,
                }
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["2024-02-14", "-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["2024-02-30"]).is_err());
        assert!(parse(&["tomorrow"]).is_err());
        assert!(parse(&["--log-level", "loud"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_reporter() {
        let (sender, receiver) = mpsc::channel();
        let mut report = reporter(&sender);
        let date = SelectedDate {
            year: 2009,
            month: 1,
            day: 5,
        };
        report("datepicker2", date);
        assert_eq!(
            receiver.try_iter().collect::<Vec<_>>(),
            vec![("datepicker2".to_owned(), date)]
        );
    }

    #[test]
    fn test_make_pickers_default() {
        let (sender, _receiver) = mpsc::channel();
        let pickers = make_pickers(date!(2024 - 02 - 14), &[], &sender);
        assert_eq!(pickers.len(), 1);
        assert_eq!(pickers[0].id(), "datepicker1");
        assert_eq!(pickers[0].grid().title(), "February 2024");
    }

    #[test]
    fn test_make_pickers_share_today() {
        let (sender, receiver) = mpsc::channel();
        let mut pickers = make_pickers(
            date!(2024 - 02 - 14),
            &[date!(2009 - 01 - 01), date!(1999 - 12 - 31)],
            &sender,
        );
        let titles = pickers
            .iter()
            .map(|p| (p.id().to_owned(), p.grid().title().to_owned()))
            .collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec![
                ("datepicker1".to_owned(), "January 2009".to_owned()),
                ("datepicker2".to_owned(), "December 1999".to_owned()),
            ]
        );
        for p in &mut pickers {
            p.jump_to_today();
            assert_eq!(p.grid().title(), "February 2024");
        }
        pickers[1].select_day(29);
        assert_eq!(
            receiver.try_iter().collect::<Vec<_>>(),
            vec![(
                "datepicker2".to_owned(),
                SelectedDate {
                    year: 2024,
                    month: 2,
                    day: 29
                }
            )]
        );
    }

    #[test]
    fn test_mouse_capture_released_on_drop() {
        let mut out = Vec::new();
        {
            let _capture = MouseCapture::enable(&mut out).unwrap();
        }
        let s = String::from_utf8(out).unwrap();
        let enabled = s.find("\x1b[?1000h").unwrap();
        let disabled = s.find("\x1b[?1000l").unwrap();
        assert!(enabled < disabled);
    }

    #[test]
    fn test_mouse_capture_released_on_panic() {
        let mut out = Vec::new();
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _capture = MouseCapture::enable(&mut out).unwrap();
            panic!("picker blew up");
        }));
        assert!(r.is_err());
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("\x1b[?1000l"));
    }
}

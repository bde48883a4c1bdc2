use std::fmt::Display;
use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use crossterm::style::Stylize;

use crate::error::{Error, ErrorKind, Result};
use crate::service::Interaction;

const DATE_INPUT_FORMAT: &str = "%d.%m.%Y";
const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Line-oriented prompts over any reader/writer pair. Every typed helper
/// re-asks until the answer parses, so callers only see end-of-input or
/// terminal failures.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// True once the input stream reported end-of-file.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write `text` as-is.
    pub fn print(&mut self, text: impl Display) -> Result<()> {
        write!(self.output, "{text}").map_err(terminal_error)?;
        self.output.flush().map_err(terminal_error)
    }

    pub fn println(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").map_err(terminal_error)
    }

    /// Failure line shown after a command goes wrong.
    pub fn error(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text.to_string().red()).map_err(terminal_error)
    }

    /// Free text, empty allowed.
    pub fn optional(&mut self, label: &str) -> Result<String> {
        self.ask(label)
    }

    /// Free text that must not be blank.
    pub fn required(&mut self, label: &str) -> Result<String> {
        loop {
            let value = self.ask(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.notify("Error: field cannot be empty")?;
        }
    }

    /// Whole, non-negative amount.
    pub fn price(&mut self, label: &str) -> Result<u32> {
        loop {
            match self.ask(label)?.parse::<u32>() {
                Ok(price) => return Ok(price),
                Err(_) => self.notify("Error: enter a non-negative whole number")?,
            }
        }
    }

    /// Calendar date typed as `dd.mm.yyyy`.
    pub fn date(&mut self, label: &str) -> Result<NaiveDate> {
        loop {
            let raw = self.ask(&format!("{label} (dd.mm.yyyy)"))?;
            match NaiveDate::parse_from_str(&raw, DATE_INPUT_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => {
                    self.notify("Error: use format dd.mm.yyyy (for example: 20.01.2025)")?
                }
            }
        }
    }

    /// Time of day typed as `HH:MM`.
    pub fn time(&mut self, label: &str) -> Result<NaiveTime> {
        loop {
            let raw = self.ask(&format!("{label} (hh:mm)"))?;
            match NaiveTime::parse_from_str(&raw, TIME_INPUT_FORMAT) {
                Ok(time) => return Ok(time),
                Err(_) => self.notify("Error: use format hh:mm (for example: 15:30)")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Interaction for Prompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.print(format_args!("{prompt}: "))?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|err| {
            Error::wrap(err, ErrorKind::InvalidInput, "failed to read from terminal")
        })?;
        if read == 0 {
            self.closed = true;
            return Err(Error::new(ErrorKind::InvalidInput, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.yellow()).map_err(terminal_error)
    }
}

/// True for a line that was read off the terminal but is not valid UTF-8.
/// The bytes are already consumed, so asking again is safe.
pub(crate) fn is_unreadable_line(err: &Error) -> bool {
    std::error::Error::source(err)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .is_some_and(|io| io.kind() == std::io::ErrorKind::InvalidData)
}

fn terminal_error(err: std::io::Error) -> Error {
    Error::wrap(err, ErrorKind::InvalidInput, "failed to write to terminal")
}

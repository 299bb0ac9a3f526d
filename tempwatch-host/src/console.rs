//! ANSI terminal console
//!
//! Emulates the handheld's 32-column text console on a terminal. Styles map
//! to ANSI foreground colors and are reset at the end of every line.

use std::io::{self, Stdout, Write};

use tempwatch_display::{clip, ConsoleBackend, DisplayError, Style, SCREEN_COLS};

const CLEAR_HOME: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

fn color_code(style: Style) -> Option<&'static str> {
    match style {
        Style::Plain => None,
        Style::Green => Some("\x1b[32m"),
        Style::Yellow => Some("\x1b[33m"),
        Style::Red => Some("\x1b[31m"),
    }
}

/// Console writing ANSI escape sequences to any writer
#[derive(Debug)]
pub struct AnsiConsole<W> {
    out: W,
    columns: u8,
}

impl AnsiConsole<Stdout> {
    /// Console on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AnsiConsole<W> {
    /// Create a console with the handheld's column count
    pub fn new(out: W) -> Self {
        Self {
            out,
            columns: SCREEN_COLS as u8,
        }
    }

    /// Override the column count
    pub fn with_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Consume the console and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<(), DisplayError> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|_| DisplayError::Communication)
    }
}

impl<W: Write> ConsoleBackend for AnsiConsole<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.emit(CLEAR_HOME)
    }

    fn write_line(&mut self, style: Style, text: &str) -> Result<(), DisplayError> {
        let text = clip(text, self.columns as usize);
        match color_code(style) {
            Some(code) => {
                self.emit(code)?;
                self.emit(text)?;
                self.emit(RESET)?;
            }
            None => self.emit(text)?,
        }
        self.emit("\n")
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.out.flush().map_err(|_| DisplayError::Communication)
    }

    fn columns(&self) -> u8 {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempwatch_display::ConsoleExt;

    fn output(console: AnsiConsole<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_line() {
        let mut console = AnsiConsole::new(Vec::new());
        console.line("Closing...").unwrap();
        assert_eq!(output(console), "Closing...\n");
    }

    #[test]
    fn test_styled_line_is_reset() {
        let mut console = AnsiConsole::new(Vec::new());
        console.write_line(Style::Red, "GPU 88.0C").unwrap();
        assert_eq!(output(console), "\x1b[31mGPU 88.0C\x1b[0m\n");
    }

    #[test]
    fn test_clear() {
        let mut console = AnsiConsole::new(Vec::new());
        console.clear().unwrap();
        assert_eq!(output(console), CLEAR_HOME);
    }

    #[test]
    fn test_line_clipped_to_columns() {
        let mut console = AnsiConsole::new(Vec::new()).with_columns(4);
        console.line("abcdefgh").unwrap();
        assert_eq!(output(console), "abcd\n");
    }

    #[test]
    fn test_rule_spans_width() {
        let mut console = AnsiConsole::new(Vec::new());
        console.rule('=').unwrap();
        assert_eq!(output(console), format!("{}\n", "=".repeat(32)));
    }

    #[test]
    fn test_write_error_reported() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut console = AnsiConsole::new(Broken);
        assert_eq!(console.line("x"), Err(DisplayError::Communication));
    }
}

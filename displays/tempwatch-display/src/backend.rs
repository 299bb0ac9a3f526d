//! Console backend trait
//!
//! Defines the interface for text consoles.

use core::fmt::{self, Write};

use heapless::String;

/// Console backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Writing to the console failed
    Communication,
}

/// Text style of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Style {
    /// Console default colors
    #[default]
    Plain,
    /// Green text
    Green,
    /// Yellow text
    Yellow,
    /// Red text
    Red,
}

/// Console backend trait
///
/// Provides a hardware-agnostic interface for line-oriented text output.
pub trait ConsoleBackend {
    /// Clear the console and move the cursor home
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write one line of text in `style`
    ///
    /// The style applies to this line only; backends reset it before
    /// returning. Text wider than the console is clipped.
    fn write_line(&mut self, style: Style, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered output to the console
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Console width in characters
    fn columns(&self) -> u8;
}

/// Helper trait for common console output
pub trait ConsoleExt: ConsoleBackend {
    /// Write an unstyled line
    fn line(&mut self, text: &str) -> Result<(), DisplayError> {
        self.write_line(Style::Plain, text)
    }

    /// Write an empty line
    fn blank(&mut self) -> Result<(), DisplayError> {
        self.write_line(Style::Plain, "")
    }

    /// Write a rule spanning the console width
    fn rule(&mut self, ch: char) -> Result<(), DisplayError> {
        let mut buf: String<64> = String::new();
        for _ in 0..self.columns().min(64) {
            if buf.push(ch).is_err() {
                break;
            }
        }
        self.write_line(Style::Plain, &buf)
    }

    /// Format and write a line
    ///
    /// Output beyond 64 bytes is dropped.
    fn write_fmt_line(&mut self, style: Style, args: fmt::Arguments<'_>) -> Result<(), DisplayError> {
        let mut buf: String<64> = String::new();
        // A full buffer only truncates the line
        let _ = buf.write_fmt(args);
        self.write_line(style, &buf)
    }
}

// Blanket implementation for all ConsoleBackend types
impl<T: ConsoleBackend + ?Sized> ConsoleExt for T {}

/// Clip `text` to at most `max_chars` characters
///
/// Always cuts on a character boundary.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_text_unchanged() {
        assert_eq!(clip("CPU", 20), "CPU");
    }

    #[test]
    fn test_clip_long_text() {
        assert_eq!(clip("abcdefghij", 4), "abcd");
    }

    #[test]
    fn test_clip_multibyte_boundary() {
        // 'é' is two bytes; clipping by characters never splits it
        assert_eq!(clip("éééé", 2), "éé");
    }

    #[test]
    fn test_clip_zero() {
        assert_eq!(clip("abc", 0), "");
    }
}

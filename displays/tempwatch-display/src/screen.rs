//! Screen buffer types
//!
//! Provides a recording console: every styled line written since the last
//! clear is kept, so a frame can be inspected, compared or replayed onto
//! another backend.

use heapless::{String, Vec};

use crate::backend::{clip, ConsoleBackend, DisplayError, Style};

/// Number of character columns on the handheld console
pub const SCREEN_COLS: usize = 32;

/// Maximum bytes stored per line
pub const LINE_LEN: usize = SCREEN_COLS * 2;

/// Maximum lines kept per frame
pub const SCREEN_LINES: usize = 48;

/// One recorded line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    /// Style the line was written in
    pub style: Style,
    /// Line text, clipped to the console width
    pub text: String<LINE_LEN>,
}

/// Recording console
#[derive(Debug, Clone, Default)]
pub struct Screen {
    lines: Vec<ScreenLine, SCREEN_LINES>,
    /// Lines dropped because the frame was full
    overflowed: usize,
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            overflowed: 0,
        }
    }

    /// Lines written since the last clear
    pub fn lines(&self) -> &[ScreenLine] {
        &self.lines
    }

    /// Text of a specific line
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.text.as_str())
    }

    /// Number of lines dropped because the frame was full
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    /// Check whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    /// Find the first line containing `needle`
    pub fn find(&self, needle: &str) -> Option<&ScreenLine> {
        self.lines.iter().find(|l| l.text.contains(needle))
    }

    /// Write every recorded line onto another backend
    pub fn replay<B: ConsoleBackend + ?Sized>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;
        for line in &self.lines {
            backend.write_line(line.style, &line.text)?;
        }
        backend.flush()
    }
}

impl ConsoleBackend for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lines.clear();
        self.overflowed = 0;
        Ok(())
    }

    fn write_line(&mut self, style: Style, text: &str) -> Result<(), DisplayError> {
        let mut stored: String<LINE_LEN> = String::new();
        // Clipping to the column count keeps the text well under LINE_LEN bytes
        // for ASCII; wider UTF-8 is cut short rather than rejected.
        for ch in clip(text, SCREEN_COLS).chars() {
            if stored.push(ch).is_err() {
                break;
            }
        }

        if self.lines.push(ScreenLine { style, text: stored }).is_err() {
            self.overflowed += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn columns(&self) -> u8 {
        SCREEN_COLS as u8
    }
}

//! Line-based keyboard input
//!
//! A terminal cannot report held keys, so each command line is turned into
//! a momentary press: the button reads as held for one sample and released
//! on the next. A reader thread feeds commands through a channel so the
//! control loop never blocks on the terminal.
//!
//! | Input                | Button  |
//! |----------------------|---------|
//! | empty line, `a`, `r` | Confirm |
//! | `q`, `x`, EOF        | Exit    |

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};
use tempwatch_display::{Buttons, InputSource};

/// Map one input line to a button
pub fn parse_command(line: &str) -> Option<Buttons> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "a" | "r" => Some(Buttons::CONFIRM),
        "q" | "x" | "quit" | "exit" => Some(Buttons::EXIT),
        _ => None,
    }
}

/// Buttons driven by lines of text
#[derive(Debug)]
pub struct LineButtons {
    commands: Receiver<Buttons>,
    /// A press was reported on the previous sample
    releasing: bool,
    /// Input has ended; exit stays held
    closed: bool,
}

impl LineButtons {
    /// Read commands from standard input
    pub fn stdin() -> Self {
        Self::spawn(io::BufReader::new(io::stdin()))
    }

    /// Read commands from `reader` on a background thread
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("input read failed: {}", e);
                        break;
                    }
                };
                match parse_command(&line) {
                    Some(buttons) => {
                        if tx.send(buttons).is_err() {
                            return;
                        }
                    }
                    None => debug!("ignoring input {:?}", line),
                }
            }
            // End of input leaves the application
            let _ = tx.send(Buttons::EXIT);
        });

        Self {
            commands: rx,
            releasing: false,
            closed: false,
        }
    }
}

impl InputSource for LineButtons {
    fn held(&mut self) -> Buttons {
        if self.closed {
            return Buttons::EXIT;
        }
        if self.releasing {
            self.releasing = false;
            return Buttons::NONE;
        }

        match self.commands.try_recv() {
            Ok(buttons) => {
                self.releasing = true;
                buttons
            }
            Err(TryRecvError::Empty) => Buttons::NONE,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                Buttons::EXIT
            }
        }
    }
}

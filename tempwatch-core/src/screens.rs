//! Status and diagnostic screens
//!
//! Everything the client shows besides the temperature list itself.

use tempwatch_display::{clip, ConsoleBackend, ConsoleExt, DisplayError, Style};
use heapless::String;
use tempwatch_protocol::{decode_lossy, ConnectionOutcome, FetchError, FetchStage};

use crate::config::ServerConfig;
use crate::state::ParseFailure;

/// Bytes of raw response shown when no body boundary is found
pub const PREVIEW_BYTES: usize = 300;

/// Decoded bytes kept per preview line before clipping to the console
const PREVIEW_LINE_BYTES: usize = 128;

/// Start prompt
pub fn welcome<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    server: &ServerConfig,
) -> Result<(), DisplayError> {
    console.clear()?;
    console.line("Temperature Monitor")?;
    console.write_fmt_line(
        Style::Plain,
        format_args!("Server: {}:{}", server.host.as_str(), server.port),
    )?;
    console.blank()?;
    console.line("Press CONFIRM to start...")?;
    console.flush()
}

/// Header shown while a poll is in progress
pub fn polling<C: ConsoleBackend + ?Sized>(console: &mut C) -> Result<(), DisplayError> {
    console.clear()?;
    console.rule('=')?;
    console.line("   TEMPERATURE MONITOR")?;
    console.rule('=')?;
    console.line("Updating...")?;
    console.blank()?;
    console.flush()
}

/// One progress line per fetch stage
pub fn progress<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    stage: FetchStage,
) -> Result<(), DisplayError> {
    match stage {
        FetchStage::Close { received } => console.write_fmt_line(
            Style::Plain,
            format_args!("{}.{}... ({} bytes)", stage.number(), stage.label(), received),
        )?,
        FetchStage::Done => console.write_fmt_line(
            Style::Plain,
            format_args!("{}.{}", stage.number(), stage.label()),
        )?,
        _ => console.write_fmt_line(
            Style::Plain,
            format_args!("{}.{}...", stage.number(), stage.label()),
        )?,
    }
    console.flush()
}

/// Summary line after a fetch
pub fn fetch_result<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    outcome: &ConnectionOutcome,
) -> Result<(), DisplayError> {
    let code = match outcome {
        Ok(n) => *n as i32,
        Err(e) => e.code() as i32,
    };
    console.write_fmt_line(Style::Plain, format_args!("HTTP result: {}", code))?;
    console.flush()
}

/// Fetch failure screen
pub fn connect_error<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    kind: FetchError,
    server: &ServerConfig,
) -> Result<(), DisplayError> {
    console.clear()?;
    console.write_fmt_line(
        Style::Red,
        format_args!("Connection error: {}", kind.code()),
    )?;
    console.blank()?;

    match kind {
        FetchError::ConnectRefused => {
            console.line("Could not connect to")?;
            console.write_fmt_line(
                Style::Plain,
                format_args!("{}:{}", server.host.as_str(), server.port),
            )?;
            console.blank()?;
            console.line("Check that:")?;
            console.line("- the server is running")?;
            console.line("- the address is correct")?;
            console.line("- the firewall allows the port")?;
        }
        FetchError::ReceiveTimeoutOrReset => {
            console.line("Timeout receiving data")?;
        }
        other => {
            console.write_fmt_line(Style::Plain, format_args!("{}", other))?;
        }
    }

    retry_prompt(console)
}

/// Unusable response screen
///
/// `raw` is the start of the response, shown when no body was found.
pub fn parse_error<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    failure: ParseFailure,
    raw: &[u8],
) -> Result<(), DisplayError> {
    console.clear()?;
    console.write_fmt_line(Style::Red, format_args!("Error: could not extract data"))?;
    console.blank()?;
    console.write_fmt_line(Style::Plain, format_args!("{}", failure))?;

    if failure == ParseFailure::NoBodyBoundary {
        console.blank()?;
        console.write_fmt_line(
            Style::Plain,
            format_args!("Response (first {} bytes):", PREVIEW_BYTES),
        )?;
        let preview = &raw[..raw.len().min(PREVIEW_BYTES)];
        let width = console.columns() as usize;
        for line in preview.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let text: String<PREVIEW_LINE_BYTES> = decode_lossy(line);
            console.line(clip(&text, width))?;
        }
    }

    retry_prompt(console)
}

/// Shown once when the application exits
pub fn closing<C: ConsoleBackend + ?Sized>(console: &mut C) -> Result<(), DisplayError> {
    console.clear()?;
    console.line("Closing...")?;
    console.flush()
}

fn retry_prompt<C: ConsoleBackend + ?Sized>(console: &mut C) -> Result<(), DisplayError> {
    console.blank()?;
    console.line("Press CONFIRM to retry")?;
    console.flush()
}

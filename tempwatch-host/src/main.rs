//! Temperature monitor for the terminal
//!
//! Polls the configured report server and renders the readings in a
//! 32-column console. Press Enter to start or refresh, `q` to quit.
//! Set `RUST_LOG=debug` for protocol and state logging on stderr.

use std::process::ExitCode;

use log::{error, info};
use tempwatch_core::{AppController, FrameClock};
use tempwatch_host::{embedded_config, AnsiConsole, FrameWaiter, LineButtons, StdTcpTransport, VblankTimer};

/// Tick counter advanced by the vblank thread
static FRAME_CLOCK: FrameClock = FrameClock::new();

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting tempwatch {}", env!("CARGO_PKG_VERSION"));

    let config = embedded_config();

    let _timer = VblankTimer::start(&FRAME_CLOCK);
    let mut vsync = FrameWaiter::new(&FRAME_CLOCK);

    let mut controller = AppController::new(
        config,
        &FRAME_CLOCK,
        StdTcpTransport::new(),
        AnsiConsole::stdout(),
        LineButtons::stdin(),
    );

    match controller.run(&mut vsync) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("console error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

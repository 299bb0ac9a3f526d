//! Application controller
//!
//! The controller is the single control loop of the client. Each iteration:
//! - samples the buttons and derives at most one event
//! - checks whether the refresh interval has elapsed
//! - applies the event to the state machine
//! - performs exactly one fetch when the machine enters `Connecting`
//! - redraws the console for the resulting state
//!
//! It exclusively owns the response buffer. Body views into it never outlive
//! the iteration that produced them.

use tempwatch_display::{ButtonTracker, ConsoleBackend, DisplayError, InputSource, NavigationEvent};
use tempwatch_hal::{NetworkTransport, VerticalSync};
use tempwatch_protocol::{extract_body, HttpClient, ResponseBuffer};

use crate::clock::{FrameClock, Tick};
use crate::config::MonitorConfig;
use crate::render::TemperatureRenderer;
use crate::screens;
use crate::state::{Event, ParseFailure, State};

/// Smallest body length accepted as a report
pub const MIN_BODY_LEN: usize = 6;

/// Locate the body of a raw response and check that it can hold a record
pub fn check_body(raw: &[u8]) -> Result<&[u8], ParseFailure> {
    let body = extract_body(raw).ok_or(ParseFailure::NoBodyBoundary)?;
    if body.len() < MIN_BODY_LEN {
        return Err(ParseFailure::BodyTooShort(body.len()));
    }
    Ok(body)
}

/// Polling client controller
pub struct AppController<'c, T, C, I> {
    /// Validated configuration
    config: MonitorConfig,
    /// Tick source shared with the vertical-sync interrupt
    clock: &'c FrameClock,
    /// HTTP client over the platform transport
    client: HttpClient<T>,
    /// Output console
    console: C,
    /// Button source
    input: I,
    /// Edge detector for button presses
    buttons: ButtonTracker,
    /// Report renderer
    renderer: TemperatureRenderer,
    /// Response storage, reused by every poll
    buffer: ResponseBuffer,
    /// Current state
    state: State,
    /// Tick at which the last poll started
    last_poll: Tick,
    /// Polls started since power-on
    polls: u32,
}

impl<'c, T, C, I> AppController<'c, T, C, I>
where
    T: NetworkTransport,
    C: ConsoleBackend,
    I: InputSource,
{
    /// Create a controller in the `Welcome` state
    pub fn new(config: MonitorConfig, clock: &'c FrameClock, transport: T, console: C, input: I) -> Self {
        let client = HttpClient::new(transport)
            .with_timeouts(config.timeouts.send_ms, config.timeouts.recv_ms);
        let renderer = TemperatureRenderer::new(config.refresh_interval_ticks);

        Self {
            config,
            clock,
            client,
            console,
            input,
            buttons: ButtonTracker::new(),
            renderer,
            buffer: ResponseBuffer::new(),
            state: State::Welcome,
            last_poll: clock.now(),
            polls: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of polls started
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Get the configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Get the console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Get the input source
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get the transport
    pub fn transport_mut(&mut self) -> &mut T {
        self.client.transport_mut()
    }

    /// Draw the start prompt
    pub fn show_welcome(&mut self) -> Result<(), DisplayError> {
        screens::welcome(&mut self.console, &self.config.server)
    }

    /// Run until exit is requested
    ///
    /// Waits for one vertical-sync period between iterations.
    pub fn run<V: VerticalSync>(&mut self, vsync: &mut V) -> Result<(), DisplayError> {
        info!(
            "monitor started, server {}:{}",
            self.config.server.host.as_str(),
            self.config.server.port
        );
        self.show_welcome()?;

        while !self.step()?.is_terminal() {
            vsync.wait_for_vblank();
        }

        info!("monitor stopped after {} polls", self.polls);
        Ok(())
    }

    /// Run one control-loop iteration and return the resulting state
    pub fn step(&mut self) -> Result<State, DisplayError> {
        let held = self.input.held();
        let press = self.buttons.scan(held);

        if let Some(event) = self.next_event(press) {
            self.apply(event)?;
        }

        Ok(self.state)
    }

    /// Derive the event for this iteration
    ///
    /// Button presses win over the refresh timer.
    fn next_event(&self, press: Option<NavigationEvent>) -> Option<Event> {
        match (self.state, press) {
            (State::Shutdown, _) => None,
            (_, Some(NavigationEvent::Exit)) => Some(Event::Exit),
            (State::Welcome, Some(NavigationEvent::Confirm)) => Some(Event::Start),
            (state, Some(NavigationEvent::Confirm)) if state.shows_result() => Some(Event::Refresh),
            (state, None) if state.shows_result() && self.refresh_due() => Some(Event::Refresh),
            _ => None,
        }
    }

    fn refresh_due(&self) -> bool {
        self.clock.elapsed_since(self.last_poll) >= self.config.refresh_interval_ticks
    }

    /// Apply an event and carry out what the new state requires
    fn apply(&mut self, event: Event) -> Result<(), DisplayError> {
        self.transition(event);

        match self.state {
            State::Connecting => {
                // Apply the outcome before reporting a drawing failure
                let (outcome, drawn) = self.poll();
                self.transition(outcome);
                drawn?;
                self.redraw()
            }
            State::Shutdown => screens::closing(&mut self.console),
            _ => Ok(()),
        }
    }

    /// Perform one fetch and classify the response
    ///
    /// Returns the outcome event together with the first display error
    /// raised while showing progress.
    fn poll(&mut self) -> (Event, Result<(), DisplayError>) {
        self.last_poll = self.clock.now();
        self.polls = self.polls.wrapping_add(1);
        info!("poll #{} at tick {}", self.polls, self.last_poll);

        let server = &self.config.server;
        let console = &mut self.console;
        let mut drawn = screens::polling(console);
        let outcome = self.client.fetch_observed(
            server.host.as_str(),
            server.port,
            server.path.as_str(),
            &mut self.buffer,
            |stage| {
                trace!("fetch stage {:?}", stage);
                if drawn.is_ok() {
                    drawn = screens::progress(console, stage);
                }
            },
        );
        if drawn.is_ok() {
            drawn = screens::fetch_result(&mut self.console, &outcome);
        }

        let event = match outcome {
            Ok(received) => match check_body(self.buffer.as_bytes()) {
                Ok(body) => {
                    info!("received {} bytes, body {} bytes", received, body.len());
                    Event::BodyReady
                }
                Err(failure) => {
                    warn!("unusable response ({} bytes): {:?}", received, failure);
                    Event::ParseFailed(failure)
                }
            },
            Err(kind) => {
                warn!("fetch failed: {:?}", kind);
                Event::FetchFailed(kind)
            }
        };
        (event, drawn)
    }

    /// Draw the screen for the current state
    fn redraw(&mut self) -> Result<(), DisplayError> {
        match self.state {
            State::Displaying => {
                let body = extract_body(self.buffer.as_bytes());
                let count = self.renderer.render(&mut self.console, body)?;
                debug!("rendered {} readings", count);
                self.console.flush()
            }
            State::ConnectError(kind) => {
                screens::connect_error(&mut self.console, kind, &self.config.server)
            }
            State::ParseError(failure) => {
                screens::parse_error(&mut self.console, failure, self.buffer.as_bytes())
            }
            State::Welcome => self.show_welcome(),
            State::Shutdown => screens::closing(&mut self.console),
            State::Connecting => Ok(()),
        }
    }

    /// Perform state transition
    fn transition(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            debug!("state {:?} -> {:?} on {:?}", self.state, next, event);
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::net::SocketAddrV4;
    use tempwatch_display::{Buttons, Screen, Style};
    use tempwatch_hal::TransportError;
    use tempwatch_protocol::FetchError;

    const SCENARIO_A: &[u8] = b"HTTP/1.1 200 OK\r\n\r\nCPU: 45.2C\nGPU: 88.0C\n";

    /// Transport replaying a fixed reply, or failing at one stage
    #[derive(Default)]
    struct FakeServer {
        reply: Vec<u8>,
        refuse: bool,
        connects: usize,
        open_handles: usize,
    }

    impl NetworkTransport for FakeServer {
        type Handle = ();

        fn open(&mut self) -> Result<(), TransportError> {
            self.open_handles += 1;
            Ok(())
        }

        fn set_timeouts(&mut self, _handle: &mut (), _send_ms: u32, _recv_ms: u32) {}

        fn connect(&mut self, _handle: &mut (), _addr: SocketAddrV4) -> Result<(), TransportError> {
            self.connects += 1;
            if self.refuse {
                Err(TransportError::ConnectRefused)
            } else {
                Ok(())
            }
        }

        fn send_all(&mut self, _handle: &mut (), _bytes: &[u8]) -> Result<(), TransportError> {
            Ok(())
        }

        fn receive_into(&mut self, _handle: &mut (), buf: &mut [u8]) -> Result<usize, TransportError> {
            if self.reply.is_empty() {
                return Err(TransportError::ReceiveTimeoutOrReset);
            }
            let n = self.reply.len().min(buf.len());
            buf[..n].copy_from_slice(&self.reply[..n]);
            Ok(n)
        }

        fn close(&mut self, _handle: ()) {
            self.open_handles -= 1;
        }
    }

    /// Buttons held by the test
    #[derive(Default)]
    struct Held(Buttons);

    impl InputSource for Held {
        fn held(&mut self) -> Buttons {
            self.0
        }
    }

    type TestController<'c> = AppController<'c, FakeServer, Screen, Held>;

    fn controller<'c>(clock: &'c FrameClock, server: FakeServer) -> TestController<'c> {
        AppController::new(MonitorConfig::default(), clock, server, Screen::new(), Held::default())
    }

    /// Press and release a button over two iterations
    fn press(ctrl: &mut TestController<'_>, button: Buttons) -> State {
        ctrl.input_mut().0 = button;
        let state = ctrl.step().unwrap();
        ctrl.input_mut().0 = Buttons::NONE;
        ctrl.step().unwrap();
        state
    }

    fn reply(bytes: &[u8]) -> FakeServer {
        FakeServer {
            reply: bytes.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_body() {
        assert_eq!(check_body(b"HTTP/1.1 200 OK\r\n\r\nCPU: 1C"), Ok(&b"CPU: 1C"[..]));
        assert_eq!(
            check_body(b"HTTP/1.1 200 OK\r\n\r\nok"),
            Err(ParseFailure::BodyTooShort(2))
        );
        assert_eq!(
            check_body(b"HTTP/1.1 200 OK\r\n\r\n12345"),
            Err(ParseFailure::BodyTooShort(5))
        );
        assert_eq!(check_body(b"garbage"), Err(ParseFailure::NoBodyBoundary));
    }

    #[test]
    fn test_welcome_waits_for_confirm() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));
        ctrl.show_welcome().unwrap();

        for _ in 0..120 {
            clock.tick();
            assert_eq!(ctrl.step().unwrap(), State::Welcome);
        }
        assert_eq!(ctrl.polls(), 0);
        assert!(ctrl.console().contains("Server: 192.168.1.35:5000"));
    }

    #[test]
    fn test_exit_from_welcome() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));

        assert_eq!(press(&mut ctrl, Buttons::EXIT), State::Shutdown);
        assert_eq!(ctrl.polls(), 0);
        assert_eq!(ctrl.console().get_line(0), Some("Closing..."));
    }

    #[test]
    fn test_scenario_a_displays_readings() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));

        assert_eq!(press(&mut ctrl, Buttons::CONFIRM), State::Displaying);
        assert_eq!(ctrl.polls(), 1);

        let screen = ctrl.console();
        let cpu = screen.find("CPU").unwrap();
        let gpu = screen.find("GPU").unwrap();
        assert_eq!(cpu.style, Style::Green);
        assert_eq!(gpu.style, Style::Red);
        let styled = screen.lines().iter().filter(|l| l.style != Style::Plain).count();
        assert_eq!(styled, 2);
    }

    #[test]
    fn test_scenario_b_connect_refused_then_retry() {
        let clock = FrameClock::new();
        let mut ctrl = controller(
            &clock,
            FakeServer {
                refuse: true,
                ..Default::default()
            },
        );

        assert_eq!(
            press(&mut ctrl, Buttons::CONFIRM),
            State::ConnectError(FetchError::ConnectRefused)
        );
        assert!(ctrl.console().contains("Could not connect"));
        assert!(ctrl.console().contains("firewall"));

        ctrl.transport_mut().refuse = false;
        ctrl.transport_mut().reply = SCENARIO_A.to_vec();
        assert_eq!(press(&mut ctrl, Buttons::CONFIRM), State::Displaying);
        assert_eq!(ctrl.transport_mut().connects, 2);
        assert_eq!(ctrl.transport_mut().open_handles, 0);
    }

    #[test]
    fn test_scenario_c_short_body() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(b"HTTP/1.1 200 OK\r\n\r\nok"));

        assert_eq!(
            press(&mut ctrl, Buttons::CONFIRM),
            State::ParseError(ParseFailure::BodyTooShort(2))
        );
        assert!(ctrl.console().contains("Body too short: 2 chars"));
    }

    #[test]
    fn test_missing_boundary_shows_raw_response() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(b"HTTP/1.1 200 OK\r\nX-Odd: yes\r\n"));

        assert_eq!(
            press(&mut ctrl, Buttons::CONFIRM),
            State::ParseError(ParseFailure::NoBodyBoundary)
        );
        assert!(ctrl.console().contains("X-Odd: yes"));
    }

    #[test]
    fn test_receive_timeout() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, FakeServer::default());

        assert_eq!(
            press(&mut ctrl, Buttons::CONFIRM),
            State::ConnectError(FetchError::ReceiveTimeoutOrReset)
        );
        assert!(ctrl.console().contains("Timeout receiving data"));
    }

    #[test]
    fn test_tick_refresh_polls_exactly_once() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));
        press(&mut ctrl, Buttons::CONFIRM);
        assert_eq!(ctrl.polls(), 1);

        let mut entered_connecting = 0;
        for _ in 0..60 {
            clock.tick();
            let before = ctrl.polls();
            ctrl.step().unwrap();
            entered_connecting += ctrl.polls() - before;
        }

        assert_eq!(entered_connecting, 1);
        assert_eq!(ctrl.state(), State::Displaying);
    }

    #[test]
    fn test_no_refresh_before_interval() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));
        press(&mut ctrl, Buttons::CONFIRM);

        for _ in 0..59 {
            clock.tick();
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.polls(), 1);
    }

    #[test]
    fn test_error_states_refresh_on_timer() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(b"HTTP/1.1 200 OK\r\n\r\nok"));
        press(&mut ctrl, Buttons::CONFIRM);
        assert!(matches!(ctrl.state(), State::ParseError(_)));

        ctrl.transport_mut().reply = SCENARIO_A.to_vec();
        for _ in 0..60 {
            clock.tick();
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.polls(), 2);
        assert_eq!(ctrl.state(), State::Displaying);
    }

    #[test]
    fn test_confirm_forces_refresh() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));
        press(&mut ctrl, Buttons::CONFIRM);
        press(&mut ctrl, Buttons::CONFIRM);
        assert_eq!(ctrl.polls(), 2);
    }

    #[test]
    fn test_held_confirm_polls_once() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));

        ctrl.input_mut().0 = Buttons::CONFIRM;
        for _ in 0..10 {
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.polls(), 1);
    }

    #[test]
    fn test_exit_while_displaying() {
        let clock = FrameClock::new();
        let mut ctrl = controller(&clock, reply(SCENARIO_A));
        press(&mut ctrl, Buttons::CONFIRM);

        assert_eq!(press(&mut ctrl, Buttons::EXIT), State::Shutdown);
        for _ in 0..120 {
            clock.tick();
            ctrl.step().unwrap();
        }
        assert_eq!(ctrl.polls(), 1);
    }

    #[test]
    fn test_run_stops_on_exit() {
        struct TickingVsync<'c> {
            clock: &'c FrameClock,
            frames: u32,
        }

        impl VerticalSync for TickingVsync<'_> {
            fn wait_for_vblank(&mut self) {
                self.clock.tick();
                self.frames += 1;
            }
        }

        /// Confirm on the second sample, exit on the fourth
        struct Scripted(u32);

        impl InputSource for Scripted {
            fn held(&mut self) -> Buttons {
                self.0 += 1;
                match self.0 {
                    2 => Buttons::CONFIRM,
                    4 => Buttons::EXIT,
                    _ => Buttons::NONE,
                }
            }
        }

        let clock = FrameClock::new();
        let mut ctrl = AppController::new(
            MonitorConfig::default(),
            &clock,
            reply(SCENARIO_A),
            Screen::new(),
            Scripted(0),
        );
        let mut vsync = TickingVsync {
            clock: &clock,
            frames: 0,
        };

        ctrl.run(&mut vsync).unwrap();

        assert_eq!(ctrl.state(), State::Shutdown);
        assert_eq!(ctrl.polls(), 1);
        assert_eq!(vsync.frames, 3);
    }

    /// Console whose every write fails
    struct BrokenConsole;

    impl ConsoleBackend for BrokenConsole {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn write_line(&mut self, _style: Style, _text: &str) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn columns(&self) -> u8 {
            32
        }
    }

    #[test]
    fn test_display_failure_still_applies_poll_outcome() {
        let clock = FrameClock::new();
        let mut ctrl = AppController::new(
            MonitorConfig::default(),
            &clock,
            reply(SCENARIO_A),
            BrokenConsole,
            Held(Buttons::CONFIRM),
        );

        assert_eq!(ctrl.step(), Err(DisplayError::Communication));
        assert_eq!(ctrl.state(), State::Displaying);
        assert_eq!(ctrl.polls(), 1);

        // Timer refresh still runs from the result state
        ctrl.input_mut().0 = Buttons::NONE;
        for _ in 0..60 {
            clock.tick();
            let _ = ctrl.step();
        }
        assert_eq!(ctrl.polls(), 2);
    }
}

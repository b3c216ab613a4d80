use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SlingerEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait SlingerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SlingerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<SlingerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // Only presses; release events would double every key on some platforms
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    SlingerEvent::Key(key)
                }
                Ok(CtEvent::Resize(_, _)) => SlingerEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SlingerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SlingerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SlingerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SlingerEvent>) -> Self {
        Self { rx }
    }
}

impl SlingerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SlingerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Measures time between steps; swappable so tests can run on logical time.
pub trait StepClock {
    fn since_last(&mut self) -> Duration;
}

/// Wall-clock step measurement
#[derive(Debug)]
pub struct MonotonicClock {
    last: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl StepClock for MonotonicClock {
    fn since_last(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}

/// Reports a fixed duration per step regardless of real time.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock(pub Duration);

impl StepClock for FixedStepClock {
    fn since_last(&mut self) -> Duration {
        self.0
    }
}

/// Runner that advances the game one event/tick at a time
pub struct Runner<E: SlingerEventSource, C: StepClock = MonotonicClock> {
    event_source: E,
    tick_interval: Duration,
    clock: C,
}

impl<E: SlingerEventSource> Runner<E, MonotonicClock> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self::with_clock(event_source, tick_interval, MonotonicClock::default())
    }
}

impl<E: SlingerEventSource, C: StepClock> Runner<E, C> {
    pub fn with_clock(event_source: E, tick_interval: Duration, clock: C) -> Self {
        Self {
            event_source,
            tick_interval,
            clock,
        }
    }

    /// Blocks up to the tick interval and returns the next event (or Tick on
    /// timeout) together with the time elapsed since the previous step.
    pub fn step(&mut self) -> (SlingerEvent, Duration) {
        let ev = match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                SlingerEvent::Tick
            }
        };
        (ev, self.clock.since_last())
    }
}

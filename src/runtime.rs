use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SpeedyEvent {
    Key(KeyEvent),
    /// Left mouse button pressed anywhere in the terminal
    Click,
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait SpeedyEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SpeedyEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<SpeedyEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => Some(SpeedyEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse))
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                {
                    Some(SpeedyEvent::Click)
                }
                Ok(CtEvent::Resize(_, _)) => Some(SpeedyEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
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

impl SpeedyEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SpeedyEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms.max(1)))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SpeedyEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SpeedyEvent>) -> Self {
        Self { rx }
    }
}

impl SpeedyEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SpeedyEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: SpeedyEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SpeedyEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> SpeedyEvent {
        self.step_within(None)
    }

    /// Like [`Runner::step`], but never waits past `limit` (e.g. the next timer due)
    pub fn step_within(&self, limit: Option<Duration>) -> SpeedyEvent {
        let wait = match limit {
            Some(limit) => limit.min(self.ticker.interval()),
            None => self.ticker.interval(),
        };
        match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                SpeedyEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), SpeedyEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(SpeedyEvent::Click).unwrap();
        tx.send(SpeedyEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), SpeedyEvent::Click);
        assert_matches!(runner.step(), SpeedyEvent::Resize);
    }

    #[test]
    fn disconnected_source_ticks() {
        let (tx, rx) = mpsc::channel();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(1));

        assert_matches!(runner.step(), SpeedyEvent::Tick);
    }

    #[test]
    fn step_within_wakes_before_interval() {
        let (_tx, rx) = mpsc::channel::<SpeedyEvent>();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(60_000));

        let started = std::time::Instant::now();
        assert_matches!(runner.step_within(Some(Duration::ZERO)), SpeedyEvent::Tick);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn zero_interval_is_clamped() {
        assert_eq!(FixedTicker::from_millis(0).interval(), Duration::from_millis(1));
    }
}

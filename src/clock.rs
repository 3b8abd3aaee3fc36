use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

/// Millisecond time source used for every measurement in a round.
///
/// Values are only ever subtracted from one another, so the origin is
/// arbitrary.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock anchored at construction time
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the timer.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Uniform source over `[0, 1)`
pub trait Randomness {
    fn next_unit(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedRandomness {
    values: Vec<f64>,
    pos: usize,
}

impl FixedRandomness {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl Randomness for FixedRandomness {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(100);
        let other = clock.clone();

        clock.advance(250);
        assert_eq!(other.now_ms(), 350);

        other.advance(10);
        assert_eq!(clock.now_ms(), 360);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn fixed_randomness_cycles() {
        let mut rng = FixedRandomness::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.9);
        assert_eq!(rng.next_unit(), 0.1);
    }

    #[test]
    fn fixed_randomness_stays_below_one() {
        let mut rng = FixedRandomness::constant(1.0);
        assert!(rng.next_unit() < 1.0);
    }

    #[test]
    fn thread_randomness_in_unit_interval() {
        let mut rng = ThreadRandomness;
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}

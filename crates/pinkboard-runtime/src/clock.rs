//! Frame clock producing per-frame delta time

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A source of "now" in fractional seconds since an arbitrary epoch
pub trait Clock {
    fn now_seconds(&self) -> f64;
}

/// Wall clock backed by `Instant`, epoch at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand. Clones share the same time, so a host can keep
/// one handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

/// Tracks frame time. The first tick reports zero elapsed time.
pub struct FrameClock<C: Clock = MonotonicClock> {
    /// Total elapsed animation time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of ticks so far
    pub frame_count: u64,
    last: Option<f64>,
    source: C,
}

impl Default for FrameClock<MonotonicClock> {
    fn default() -> Self {
        Self::with_source(MonotonicClock::new())
    }
}

impl FrameClock<MonotonicClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> FrameClock<C> {
    pub fn with_source(source: C) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last: None,
            source,
        }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Read the clock source and advance. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = self.source.now_seconds();
        self.tick_at(now)
    }

    /// Advance to an explicit timestamp. Non-finite or backwards steps
    /// count as no time elapsed.
    pub fn tick_at(&mut self, now: f64) -> f64 {
        let delta = match self.last {
            Some(last) => sanitize_delta(now - last),
            None => 0.0,
        };
        if now.is_finite() {
            self.last = Some(now);
        }

        self.delta_time = delta;
        self.total_time += delta;
        self.frame_count += 1;
        delta
    }
}

fn sanitize_delta(delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::with_source(ManualClock::new());
        clock.source().set(1234.5);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn test_delta_between_ticks() {
        let manual = ManualClock::new();
        let mut clock = FrameClock::with_source(manual.clone());
        clock.tick();
        manual.advance(0.25);
        assert!((clock.tick() - 0.25).abs() < 1e-12);
        manual.advance(0.5);
        assert!((clock.tick() - 0.5).abs() < 1e-12);
        assert!((clock.total_time - 0.75).abs() < 1e-12);
        assert_eq!(clock.frame_count, 3);
    }

    #[test]
    fn test_backwards_step_clamps_to_zero() {
        let mut clock = FrameClock::with_source(ManualClock::new());
        clock.tick_at(10.0);
        assert_eq!(clock.tick_at(9.0), 0.0);
        // Subsequent deltas measure from the latest reading
        assert!((clock.tick_at(9.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_reading_clamps_to_zero() {
        let mut clock = FrameClock::with_source(ManualClock::new());
        clock.tick_at(1.0);
        assert_eq!(clock.tick_at(f64::NAN), 0.0);
        assert_eq!(clock.tick_at(f64::INFINITY), 0.0);
        assert!((clock.tick_at(1.1) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let a = clock.now_seconds();
        let b = clock.now_seconds();
        assert!(b >= a);
    }
}

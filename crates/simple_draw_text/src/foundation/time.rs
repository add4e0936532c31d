//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic time source
///
/// The timed-line registry reads time only through this trait so hosts and tests
/// can drive it explicitly.
pub trait Clock {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    origin: Instant,
    offset: Duration,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Duration::ZERO,
        }
    }

    /// Move the clock forward
    pub fn advance(&mut self, delta: Duration) {
        self.offset += delta;
    }

    /// Move the clock forward by whole milliseconds
    pub fn advance_millis(&mut self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.offset
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset
    }
}

/// Fixed-rate tick scheduler for the host loop
///
/// Each due tick re-arms the next one a full interval later, the same way a
/// timer callback that re-registers itself behaves: ticks that were missed while
/// the host was busy are dropped rather than replayed.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    interval: Duration,
    next_tick: Instant,
    tick_count: u64,
    started_at: Instant,
}

impl FrameTimer {
    /// Create a timer firing `ticks_per_second` times per second, first tick at `now + delay`
    pub fn new(ticks_per_second: u32, now: Instant, delay: Duration) -> Self {
        let interval = Duration::from_millis(1000 / u64::from(ticks_per_second.max(1)));
        Self {
            interval,
            next_tick: now + delay,
            tick_count: 0,
            started_at: now,
        }
    }

    /// Interval between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Consume the pending tick if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick = now + self.interval;
        self.tick_count += 1;
        true
    }

    /// How long the host can sleep before the next tick
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// Number of ticks fired so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Average ticks per second since creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_rate(&self, now: Instant) -> f32 {
        let secs = now.saturating_duration_since(self.started_at).as_secs_f32();
        if secs > 0.0 {
            self.tick_count as f32 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        let mut clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance_millis(250);
        assert_eq!(clock.now() - start, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_frame_timer_waits_for_initial_delay() {
        let clock = ManualClock::new();
        let mut timer = FrameTimer::new(30, clock.now(), Duration::from_millis(10));

        assert!(!timer.poll(clock.now()));
        assert_eq!(timer.until_next(clock.now()), Duration::from_millis(10));
        assert!(timer.poll(clock.now() + Duration::from_millis(10)));
        assert_eq!(timer.tick_count(), 1);
    }

    #[test]
    fn test_frame_timer_rearms_from_fire_time() {
        let mut clock = ManualClock::new();
        let mut timer = FrameTimer::new(30, clock.now(), Duration::ZERO);
        assert_eq!(timer.interval(), Duration::from_millis(33));

        assert!(timer.poll(clock.now()));
        clock.advance_millis(500);
        // A long stall yields a single tick, not a burst
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));
        assert_eq!(timer.tick_count(), 2);
    }
}

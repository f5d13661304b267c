//! Wall-clock time since start and per-frame delta

use std::time::Instant;

/// Tracks elapsed time since the app started and the delta between frames
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    /// Seconds since `start`, as of the last completed frame
    pub total_time: f64,
    /// `total_time` minus its value one frame earlier
    pub delta_time: f64,
    /// Start sample; `None` until started
    start_instant: Option<Instant>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the start time. Resets both readings to zero.
    pub fn start_at(&mut self, now: Instant) {
        self.start_instant = Some(now);
        self.total_time = 0.0;
        self.delta_time = 0.0;
    }

    /// Advance the clock. Call once per frame, after the frame callback.
    pub fn advance_to(&mut self, now: Instant) {
        let Some(start) = self.start_instant else {
            // Never started: treat this sample as the start
            self.start_at(now);
            return;
        };

        let t = now.saturating_duration_since(start).as_secs_f64();
        self.delta_time = t - self.total_time;
        self.total_time = t;
    }

    pub fn is_started(&self) -> bool {
        self.start_instant.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.is_started());
    }

    #[test]
    fn test_time_and_delta() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();
        clock.start_at(t0);

        clock.advance_to(t0 + Duration::from_millis(16));
        assert!((clock.total_time - 0.016).abs() < 1e-9);
        assert!((clock.delta_time - 0.016).abs() < 1e-9);

        clock.advance_to(t0 + Duration::from_millis(50));
        assert!((clock.total_time - 0.050).abs() < 1e-9);
        assert!((clock.delta_time - 0.034).abs() < 1e-9);
    }

    #[test]
    fn test_time_strictly_increases() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();
        clock.start_at(t0);

        let mut prev = clock.total_time;
        for i in 1..=20u64 {
            clock.advance_to(t0 + Duration::from_micros(i * 1_700));
            assert!(clock.total_time > prev);
            assert!((clock.delta_time - (clock.total_time - prev)).abs() < 1e-12);
            prev = clock.total_time;
        }
    }

    #[test]
    fn test_restart_resets() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();
        clock.start_at(t0);
        clock.advance_to(t0 + Duration::from_secs(2));
        clock.start_at(t0 + Duration::from_secs(3));
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_advance_before_start_starts() {
        let mut clock = GameClock::new();
        clock.advance_to(Instant::now());
        assert!(clock.is_started());
        assert_eq!(clock.total_time, 0.0);
    }
}

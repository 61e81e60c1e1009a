//! Simulation clock for the frame loop.

use std::fmt;
use std::time::{Duration, Instant};

/// Lower bound of the user-adjustable speed multiplier.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
/// Upper bound of the user-adjustable speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;
/// Year length shown by the on-screen day counter.
pub const DISPLAY_YEAR_LENGTH: u32 = 365;

/// Tracks elapsed wall time, the per-frame delta and the global speed multiplier.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Instant of the previous `tick`; `None` until the first tick.
    last_tick: Option<Instant>,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Scales every angular advance downstream.
    speed_multiplier: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimulationClock {
    /// Create a clock with the given speed multiplier (clamped to the valid range).
    pub fn new(speed_multiplier: f32) -> Self {
        let mut clock = Self {
            last_tick: None,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            speed_multiplier: 1.0,
        };
        clock.set_speed_multiplier(speed_multiplier);
        clock
    }

    /// Sample the wall clock and advance by the time since the previous tick.
    /// The first tick returns 0.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.advance(delta)
    }

    /// Advance by an explicit delta. Returns the delta in seconds.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        delta.as_secs_f32()
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Set the speed multiplier, clamped to `[0.1, 2.0]`. Non-finite values are ignored.
    pub fn set_speed_multiplier(&mut self, value: f32) {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite speed multiplier {}", value);
            return;
        }
        let clamped = value.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
        if clamped != value {
            log::warn!("Speed multiplier {} clamped to {}", value, clamped);
        }
        self.speed_multiplier = clamped;
    }

    /// Day counter for display: `floor(elapsed * speed) mod year_length`.
    pub fn day_counter(&self, year_length: u32) -> DayCounter {
        let year_length = year_length.max(1);
        let days = (self.elapsed.as_secs_f64() * self.speed_multiplier as f64).floor() as u64;
        DayCounter {
            day_index: (days % year_length as u64) as u32,
            year_length,
        }
    }
}

/// Zero-based day within the displayed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCounter {
    pub day_index: u32,
    pub year_length: u32,
}

impl DayCounter {
    /// One-based day, as shown on screen.
    pub fn display_day(&self) -> u32 {
        self.day_index + 1
    }
}

impl fmt::Display for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day: {} of {}", self.display_day(), self.year_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn second_tick_measures_wall_time() {
        let mut clock = SimulationClock::default();
        clock.tick();
        std::thread::sleep(Duration::from_millis(20));
        let dt = clock.tick();
        assert!(dt >= 0.02, "dt = {}", dt);
        assert_eq!(clock.elapsed_seconds(), dt);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn elapsed_never_decreases_over_ticks() {
        let mut clock = SimulationClock::default();
        let mut previous = clock.elapsed();
        for _ in 0..5 {
            let dt = clock.tick();
            assert!(dt >= 0.0);
            assert!(clock.elapsed() >= previous);
            previous = clock.elapsed();
        }
    }

    #[test]
    fn elapsed_accumulates() {
        let mut clock = SimulationClock::default();
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::ZERO);
        clock.advance(Duration::from_millis(500));
        assert!((clock.elapsed_seconds() - 0.75).abs() < 1e-6);
        assert!((clock.delta_seconds() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn speed_multiplier_is_clamped() {
        let mut clock = SimulationClock::new(5.0);
        assert_eq!(clock.speed_multiplier(), MAX_SPEED_MULTIPLIER);
        clock.set_speed_multiplier(0.0);
        assert_eq!(clock.speed_multiplier(), MIN_SPEED_MULTIPLIER);
        clock.set_speed_multiplier(f32::NAN);
        assert_eq!(clock.speed_multiplier(), MIN_SPEED_MULTIPLIER);
        clock.set_speed_multiplier(0.5);
        assert_eq!(clock.speed_multiplier(), 0.5);
    }

    #[test]
    fn day_counter_wraps_at_year_length() {
        let mut clock = SimulationClock::new(1.0);
        clock.advance(Duration::from_secs(366));
        let day = clock.day_counter(DISPLAY_YEAR_LENGTH);
        assert_eq!(day.day_index, 1);
        assert_eq!(day.to_string(), "Day: 2 of 365");
    }

    #[test]
    fn day_counter_scales_with_speed() {
        let mut clock = SimulationClock::new(0.5);
        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.day_counter(DISPLAY_YEAR_LENGTH).day_index, 5);
    }
}

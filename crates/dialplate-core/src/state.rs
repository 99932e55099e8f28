//! Per-frame clock state owned by the host loop.

use std::time::Duration;

use chrono::Timelike;
use tracing::debug;

use crate::mapper::{RotationAssignment, RotationMapper};
use crate::surface::PlateSurface;
use crate::time::{HourConvention, SECONDS_PER_DAY, TimeSample};

/// Default speed-up used when entering time-lapse.
pub const DEFAULT_TIME_LAPSE_MULTIPLIER: f64 = 60.0;

/// How the sampled time advances between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeMode {
    /// Follow the wall clock.
    RealTime,
    /// Advance a simulated clock `multiplier` times faster than real time.
    TimeLapse { multiplier: f64 },
}

impl TimeMode {
    /// Short label for the status line.
    pub fn label(&self) -> String {
        match self {
            TimeMode::RealTime => "real time".to_string(),
            TimeMode::TimeLapse { multiplier } => format!("time-lapse x{multiplier}"),
        }
    }
}

/// Seconds since midnight, advanced by scaled frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulatedClock {
    seconds: f64,
}

impl SimulatedClock {
    /// Start the simulated clock at the given wall time.
    pub fn starting_at<T: Timelike>(time: &T) -> Self {
        Self {
            seconds: f64::from(time.num_seconds_from_midnight()),
        }
    }

    /// Advance by `delta` scaled by `multiplier`, wrapping at midnight.
    pub fn advance(&mut self, delta: Duration, multiplier: f64) {
        let step = delta.as_secs_f64() * multiplier;
        if step.is_finite() {
            self.seconds = (self.seconds + step).rem_euclid(SECONDS_PER_DAY);
        }
    }

    /// Seconds since midnight.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Current simulated time as a sample.
    pub fn sample(&self) -> TimeSample {
        TimeSample::from_seconds_of_day(self.seconds)
    }
}

/// Configuration plus the most recent assignment, owned by the host loop.
#[derive(Debug, Clone)]
pub struct ClockState {
    mapper: RotationMapper,
    convention: HourConvention,
    mode: TimeMode,
    time_lapse_multiplier: f64,
    simulated: SimulatedClock,
    sample: TimeSample,
    assignment: RotationAssignment,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(
            RotationMapper::default(),
            HourConvention::default(),
            DEFAULT_TIME_LAPSE_MULTIPLIER,
        )
    }
}

impl ClockState {
    /// Create a state in real-time mode.
    pub fn new(
        mapper: RotationMapper,
        convention: HourConvention,
        time_lapse_multiplier: f64,
    ) -> Self {
        Self {
            mapper,
            convention,
            mode: TimeMode::RealTime,
            time_lapse_multiplier,
            simulated: SimulatedClock::default(),
            sample: TimeSample::default(),
            assignment: RotationAssignment::default(),
        }
    }

    /// Sample the time for this frame and recompute the assignment.
    ///
    /// `now` is the wall time; `delta` is the time since the previous frame
    /// and only matters in time-lapse mode.
    pub fn tick<T: Timelike>(&mut self, now: &T, delta: Duration) -> &RotationAssignment {
        let sample = match self.mode {
            TimeMode::RealTime => TimeSample::from_time(now),
            TimeMode::TimeLapse { multiplier } => {
                self.simulated.advance(delta, multiplier);
                self.simulated.sample()
            }
        };
        self.sample = sample.with_convention(self.convention);
        self.assignment = self.mapper.compute_assignment(&self.sample);
        &self.assignment
    }

    /// Switch between real time and time-lapse.
    ///
    /// Entering time-lapse resumes from `now` so the dial doesn't jump.
    pub fn toggle_time_lapse<T: Timelike>(&mut self, now: &T) {
        self.mode = match self.mode {
            TimeMode::RealTime => {
                self.simulated = SimulatedClock::starting_at(now);
                TimeMode::TimeLapse {
                    multiplier: self.time_lapse_multiplier,
                }
            }
            TimeMode::TimeLapse { .. } => TimeMode::RealTime,
        };
        debug!(mode = %self.mode.label(), "time mode changed");
    }

    /// Switch between 12-hour and 24-hour numbering.
    pub fn toggle_hour_convention(&mut self) {
        self.convention = self.convention.toggle();
        debug!(convention = self.convention.label(), "hour convention changed");
    }

    /// Report every plate's current angle to `surface`.
    pub fn apply_to<S: PlateSurface + ?Sized>(&self, surface: &mut S) {
        for (plate, degrees) in self.assignment.iter() {
            surface.apply_rotation(plate, degrees);
        }
    }

    pub fn mapper(&self) -> &RotationMapper {
        &self.mapper
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn convention(&self) -> HourConvention {
        self.convention
    }

    /// The sample used for the latest assignment.
    pub fn sample(&self) -> TimeSample {
        self.sample
    }

    /// The latest assignment.
    pub fn assignment(&self) -> &RotationAssignment {
        &self.assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::PlateIndex;
    use chrono::NaiveTime;
    use ratatui::{Frame, layout::Rect};

    #[derive(Default)]
    struct RecordingSurface {
        applied: Vec<(usize, f64)>,
    }

    impl PlateSurface for RecordingSurface {
        fn apply_rotation(&mut self, plate: PlateIndex, degrees: f64) {
            self.applied.push((plate.get(), degrees));
        }

        fn render_frame(&mut self, _frame: &mut Frame, _area: Rect) {}
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_real_time_tick_follows_wall_clock() {
        let mut state = ClockState::default();
        state.tick(&at(12, 34, 0), Duration::from_secs(5));
        assert_eq!(state.sample(), TimeSample::new(12, 34));
        // Delta is ignored in real time
        state.tick(&at(12, 34, 0), Duration::from_secs(3600));
        assert_eq!(state.sample(), TimeSample::new(12, 34));
    }

    #[test]
    fn test_time_lapse_accumulates_scaled_delta() {
        let mut state = ClockState::default();
        let now = at(23, 59, 0);
        state.toggle_time_lapse(&now);
        assert_eq!(state.mode(), TimeMode::TimeLapse { multiplier: 60.0 });

        // One real second at x60 is one simulated minute, crossing midnight
        state.tick(&now, Duration::from_secs(1));
        assert_eq!(state.sample(), TimeSample::new(0, 0));
        state.tick(&now, Duration::from_millis(500));
        state.tick(&now, Duration::from_millis(500));
        assert_eq!(state.sample(), TimeSample::new(0, 1));

        state.toggle_time_lapse(&now);
        assert_eq!(state.mode(), TimeMode::RealTime);
        state.tick(&now, Duration::ZERO);
        assert_eq!(state.sample(), TimeSample::new(23, 59));
    }

    #[test]
    fn test_simulated_clock_wraps() {
        let mut clock = SimulatedClock::starting_at(&at(23, 0, 0));
        clock.advance(Duration::from_secs(2), 3600.0);
        assert_eq!(clock.sample(), TimeSample::new(1, 0));
        assert_eq!(clock.seconds(), 3600.0);
        clock.advance(Duration::from_secs(1), f64::INFINITY);
        assert_eq!(clock.seconds(), 3600.0);
    }

    #[test]
    fn test_hour_convention_applied_before_mapping() {
        let mut state = ClockState::default();
        state.toggle_hour_convention();
        state.tick(&at(13, 0, 0), Duration::ZERO);
        assert_eq!(state.sample(), TimeSample::new(1, 0));
        let plate1 = PlateIndex::new(1).unwrap();
        assert_eq!(state.assignment().degrees(plate1), 36.0);
    }

    #[test]
    fn test_apply_to_reports_every_plate() {
        let mut state = ClockState::default();
        state.tick(&at(12, 34, 0), Duration::ZERO);
        let mut surface = RecordingSurface::default();
        state.apply_to(&mut surface);
        assert_eq!(surface.applied.len(), 6);
        assert_eq!(surface.applied[0], (0, 120.0));
        assert_eq!(surface.applied[1], (1, 72.0));
        assert_eq!(surface.applied[2], (2, 0.0));
    }
}

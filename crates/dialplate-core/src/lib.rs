//! Core types for the dialplate clock.
//!
//! Wall-clock time is split into decimal digits and each configured plate
//! is turned to `digit * 360° / cardinality`. Everything here is pure and
//! single-threaded; drawing happens behind [`PlateSurface`].

mod mapper;
mod plate;
mod state;
mod surface;
mod time;

pub use mapper::{RotationAssignment, RotationMapper, angle_for_digit, normalize_degrees};
pub use plate::{
    DigitSource, Direction, PLATE_COUNT, PlateIndex, RotationRule, RuleError, default_rules,
};
pub use state::{ClockState, DEFAULT_TIME_LAPSE_MULTIPLIER, SimulatedClock, TimeMode};
pub use surface::PlateSurface;
pub use time::{HourConvention, SECONDS_PER_DAY, TimeSample, digits_of_hour, digits_of_minute};

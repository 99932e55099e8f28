//! Plate identifiers and per-plate rotation rules.

use std::fmt;

use serde::Deserialize;

use crate::time::{TimeSample, digits_of_hour, digits_of_minute};

/// Number of concentric plates on the dial.
pub const PLATE_COUNT: usize = 6;

/// Errors raised while building a rule table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Plate index outside `0..PLATE_COUNT`.
    #[error("plate index {index} out of range (dial has {count} plates)", count = PLATE_COUNT)]
    InvalidPlate {
        /// The rejected index.
        index: usize,
    },

    /// Two rules drive the same plate.
    #[error("plate {plate} has more than one rotation rule")]
    DuplicatePlate {
        /// The plate that was configured twice.
        plate: PlateIndex,
    },
}

/// One of the six plates, counted from the outermost (0) inward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlateIndex(u8);

impl PlateIndex {
    /// Create a plate index, rejecting values past the innermost plate.
    pub fn new(index: usize) -> Result<Self, RuleError> {
        if index < PLATE_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(RuleError::InvalidPlate { index })
        }
    }

    /// Iterate over every plate, outermost first.
    pub fn all() -> impl Iterator<Item = PlateIndex> {
        (0..PLATE_COUNT as u8).map(PlateIndex)
    }

    /// Position of this plate as an array index.
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which decimal digit of the time a plate follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitSource {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
}

impl DigitSource {
    /// Number of distinct values this digit can take.
    pub fn cardinality(self) -> u32 {
        match self {
            DigitSource::HourTens => 3,
            DigitSource::MinuteTens => 6,
            DigitSource::HourOnes | DigitSource::MinuteOnes => 10,
        }
    }

    /// Pull this digit out of a sample.
    pub fn extract(self, sample: &TimeSample) -> u32 {
        match self {
            DigitSource::HourTens => digits_of_hour(sample.hours()).0,
            DigitSource::HourOnes => digits_of_hour(sample.hours()).1,
            DigitSource::MinuteTens => digits_of_minute(sample.minutes()).0,
            DigitSource::MinuteOnes => digits_of_minute(sample.minutes()).1,
        }
    }
}

/// Sense in which a plate turns as its digit increases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Multiplier applied to the unsigned angle.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }
}

/// Binds a plate to a digit and a turning direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationRule {
    pub plate: PlateIndex,
    pub digit: DigitSource,
    pub direction: Direction,
}

impl RotationRule {
    /// Create a rule for the plate at `plate`.
    pub fn new(plate: usize, digit: DigitSource, direction: Direction) -> Result<Self, RuleError> {
        Ok(Self {
            plate: PlateIndex::new(plate)?,
            digit,
            direction,
        })
    }

    /// Degrees turned per unit of the digit.
    ///
    /// Always `360 / cardinality`, so the digit range covers one full turn.
    pub fn step_degrees(&self) -> f64 {
        360.0 / f64::from(self.digit.cardinality())
    }
}

/// The stock rule table: hours on plates 0-1 turning clockwise, minutes on
/// plates 3-4 turning counter-clockwise, plates 2 and 5 left idle.
pub fn default_rules() -> Vec<RotationRule> {
    let rule = |plate: u8, digit, direction| RotationRule {
        plate: PlateIndex(plate),
        digit,
        direction,
    };
    vec![
        rule(0, DigitSource::HourTens, Direction::Clockwise),
        rule(1, DigitSource::HourOnes, Direction::Clockwise),
        rule(3, DigitSource::MinuteTens, Direction::CounterClockwise),
        rule(4, DigitSource::MinuteOnes, Direction::CounterClockwise),
    ]
}

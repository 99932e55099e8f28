//! Digit-to-rotation mapping.
//!
//! The mapper is a pure function of a [`TimeSample`] and a fixed rule table.
//! It returns the instantaneous target angle of every plate; any easing
//! between targets belongs to the renderer.

use crate::plate::{Direction, PLATE_COUNT, PlateIndex, RotationRule, RuleError};
use crate::time::TimeSample;

/// Signed angle in degrees for `digit` on a plate with `cardinality` positions.
///
/// The digit is reduced modulo `cardinality`, so the result is periodic in
/// the digit. A zero cardinality yields no rotation.
pub fn angle_for_digit(digit: u32, cardinality: u32, direction: Direction) -> f64 {
    if cardinality == 0 {
        return 0.0;
    }
    let step = 360.0 / f64::from(cardinality);
    f64::from(digit % cardinality) * step * direction.sign()
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs,
    // and keeps the sign of -0.0
    if wrapped >= 360.0 { 0.0 } else { wrapped + 0.0 }
}

/// Target angle of every plate for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationAssignment {
    degrees: [f64; PLATE_COUNT],
}

impl RotationAssignment {
    /// Angle of a plate in degrees, within `[0, 360)`.
    pub fn degrees(&self, plate: PlateIndex) -> f64 {
        self.degrees[plate.get()]
    }

    /// Angle of a plate in radians, within `[0, 2π)`.
    pub fn radians(&self, plate: PlateIndex) -> f64 {
        self.degrees(plate).to_radians()
    }

    /// Iterate over `(plate, degrees)` pairs, outermost plate first.
    pub fn iter(&self) -> impl Iterator<Item = (PlateIndex, f64)> + '_ {
        PlateIndex::all().map(|plate| (plate, self.degrees(plate)))
    }

    fn set(&mut self, plate: PlateIndex, degrees: f64) {
        self.degrees[plate.get()] = normalize_degrees(degrees);
    }
}

/// Applies a validated rule table to time samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationMapper {
    rules: Vec<RotationRule>,
}

impl Default for RotationMapper {
    fn default() -> Self {
        Self {
            rules: crate::plate::default_rules(),
        }
    }
}

impl RotationMapper {
    /// Build a mapper, rejecting tables that drive a plate twice.
    pub fn new(rules: Vec<RotationRule>) -> Result<Self, RuleError> {
        let mut seen = [false; PLATE_COUNT];
        for rule in &rules {
            let slot = &mut seen[rule.plate.get()];
            if *slot {
                return Err(RuleError::DuplicatePlate { plate: rule.plate });
            }
            *slot = true;
        }
        Ok(Self { rules })
    }

    /// The rule table in configuration order.
    pub fn rules(&self) -> &[RotationRule] {
        &self.rules
    }

    /// The rule driving `plate`, if it is not decorative.
    pub fn rule_for(&self, plate: PlateIndex) -> Option<&RotationRule> {
        self.rules.iter().find(|rule| rule.plate == plate)
    }

    /// Compute the angle of every plate for `sample`.
    ///
    /// Plates without a rule stay at 0°.
    pub fn compute_assignment(&self, sample: &TimeSample) -> RotationAssignment {
        let mut assignment = RotationAssignment::default();
        for rule in &self.rules {
            let digit = rule.digit.extract(sample);
            let angle = angle_for_digit(digit, rule.digit.cardinality(), rule.direction);
            assignment.set(rule.plate, angle);
        }
        assignment
    }
}

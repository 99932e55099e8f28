//! Time samples and hour conventions.

use chrono::Timelike;
use serde::Deserialize;

/// Seconds in one day, used to wrap simulated time.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Hours and minutes captured for a single frame.
///
/// Values are always in range: constructors wrap out-of-range input
/// (`hours mod 24`, `minutes mod 60`) instead of failing, so a bad
/// simulated clock can never take down the render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeSample {
    hours: u32,
    minutes: u32,
}

impl TimeSample {
    /// Create a sample, wrapping hours into 0-23 and minutes into 0-59.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours: hours % 24,
            minutes: minutes % 60,
        }
    }

    /// Create a sample from possibly negative components.
    pub fn wrapping(hours: i64, minutes: i64) -> Self {
        Self {
            hours: hours.rem_euclid(24) as u32,
            minutes: minutes.rem_euclid(60) as u32,
        }
    }

    /// Capture hours and minutes from any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute())
    }

    /// Build a sample from seconds since midnight, wrapped into one day.
    pub fn from_seconds_of_day(seconds: f64) -> Self {
        let seconds = if seconds.is_finite() {
            seconds.rem_euclid(SECONDS_PER_DAY)
        } else {
            0.0
        };
        let total_minutes = (seconds / 60.0) as u32;
        Self::new(total_minutes / 60, total_minutes % 60)
    }

    /// Hour of day (0-23).
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Minute of hour (0-59).
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Return this sample with the hour rewritten for the given convention.
    pub fn with_convention(self, convention: HourConvention) -> Self {
        Self {
            hours: convention.display_hour(self.hours),
            minutes: self.minutes,
        }
    }
}

/// Split an hour into its tens and ones digits.
pub fn digits_of_hour(hours: u32) -> (u32, u32) {
    let hours = hours % 24;
    (hours / 10, hours % 10)
}

/// Split a minute into its tens and ones digits.
pub fn digits_of_minute(minutes: u32) -> (u32, u32) {
    let minutes = minutes % 60;
    (minutes / 10, minutes % 10)
}

/// Hour numbering shown on the dial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum HourConvention {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl HourConvention {
    /// Toggle between 12-hour and 24-hour numbering.
    pub fn toggle(&self) -> Self {
        match self {
            HourConvention::TwentyFourHour => HourConvention::TwelveHour,
            HourConvention::TwelveHour => HourConvention::TwentyFourHour,
        }
    }

    /// Map a 24-hour value to the hour displayed under this convention.
    pub fn display_hour(&self, hours: u32) -> u32 {
        let hours = hours % 24;
        match self {
            HourConvention::TwentyFourHour => hours,
            HourConvention::TwelveHour => match hours % 12 {
                0 => 12,
                h => h,
            },
        }
    }

    /// Short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            HourConvention::TwentyFourHour => "24h",
            HourConvention::TwelveHour => "12h",
        }
    }
}

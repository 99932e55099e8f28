//! Configuration for the dialplate clock.
//!
//! Settings live in `config.toml` under the platform config directory
//! (or wherever `DIALPLATE_CONFIG` points). A missing file means defaults;
//! every section and field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dialplate_core::{
    DEFAULT_TIME_LAPSE_MULTIPLIER, DigitSource, Direction, HourConvention, PLATE_COUNT,
    RotationMapper, RotationRule, RuleError, default_rules,
};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DIALPLATE_CONFIG";

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Radii of the stock plates, outermost first.
const DEFAULT_RADII: [f64; PLATE_COUNT] = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0];

/// Colors of the stock plates, darkest outside.
const DEFAULT_COLORS: [u32; PLATE_COUNT] =
    [0x4A4A4A, 0x5A5A5A, 0x6A6A6A, 0x7A7A7A, 0x8A8A8A, 0x9A9A9A];

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The `[[plates]]` list doesn't describe every plate.
    #[error("expected {expected} plates, found {found}", expected = PLATE_COUNT)]
    PlateCount {
        /// Number of plates in the file.
        found: usize,
    },

    /// A plate radius is not a positive number.
    #[error("plate {plate} has invalid radius {radius}")]
    InvalidRadius {
        /// Offending plate.
        plate: usize,
        /// The rejected radius.
        radius: f64,
    },

    /// Time-lapse multiplier is zero, negative or not finite.
    #[error("time-lapse multiplier must be a positive number, got {0}")]
    InvalidMultiplier(f64),

    /// Frame interval of zero would spin the render loop.
    #[error("frame interval must be at least 1 ms")]
    InvalidFrameInterval,

    /// The rule table is inconsistent.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Time-lapse settings.
    #[serde(default)]
    pub time_lapse: TimeLapseConfig,

    /// One entry per plate, outermost first.
    #[serde(default = "default_plates")]
    pub plates: Vec<PlateConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            time_lapse: TimeLapseConfig::default(),
            plates: default_plates(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    /// Hour numbering fed to the mapper.
    #[serde(default)]
    pub hour_convention: HourConvention,

    /// Time between frames in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Draw the reference grid behind the plates.
    #[serde(default)]
    pub show_grid: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hour_convention: HourConvention::default(),
            frame_interval_ms: default_frame_interval_ms(),
            show_grid: false,
        }
    }
}

/// Time-lapse settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeLapseConfig {
    /// Simulated seconds per real second.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for TimeLapseConfig {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
        }
    }
}

/// Geometry, color and optional rule of one plate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlateConfig {
    pub radius: f64,
    /// Color as `0xRRGGBB`.
    pub color: u32,
    /// Digit this plate follows; decorative when absent.
    #[serde(default)]
    pub rule: Option<RuleConfig>,
}

/// Digit binding of a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub digit: DigitSource,
    #[serde(default)]
    pub direction: Direction,
}

fn default_frame_interval_ms() -> u64 {
    50
}

fn default_multiplier() -> f64 {
    DEFAULT_TIME_LAPSE_MULTIPLIER
}

fn default_plates() -> Vec<PlateConfig> {
    let rules = default_rules();
    (0..PLATE_COUNT)
        .map(|index| PlateConfig {
            radius: DEFAULT_RADII[index],
            color: DEFAULT_COLORS[index],
            rule: rules
                .iter()
                .find(|rule| rule.plate.get() == index)
                .map(|rule| RuleConfig {
                    digit: rule.digit,
                    direction: rule.direction,
                }),
        })
        .collect()
}

impl Config {
    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or a validation
    /// error if the values are out of range.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Config::parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Load from `DIALPLATE_CONFIG` or the platform config directory.
    ///
    /// A file named by `DIALPLATE_CONFIG` must exist. The platform file is
    /// optional and defaults are used when it is missing.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading config from {CONFIG_ENV}");
            return Self::from_file(&path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => {
                debug!("no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Platform config file location, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dialplate").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Check ranges and the rule table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plates.len() != PLATE_COUNT {
            return Err(ConfigError::PlateCount {
                found: self.plates.len(),
            });
        }
        for (plate, cfg) in self.plates.iter().enumerate() {
            if !(cfg.radius.is_finite() && cfg.radius > 0.0) {
                return Err(ConfigError::InvalidRadius {
                    plate,
                    radius: cfg.radius,
                });
            }
        }
        let multiplier = self.time_lapse.multiplier;
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }
        if self.display.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        self.rotation_mapper()?;
        Ok(())
    }

    /// Rules declared on the plates, outermost first.
    pub fn rotation_rules(&self) -> Result<Vec<RotationRule>, RuleError> {
        self.plates
            .iter()
            .enumerate()
            .filter_map(|(index, plate)| plate.rule.map(|rule| (index, rule)))
            .map(|(index, rule)| RotationRule::new(index, rule.digit, rule.direction))
            .collect()
    }

    /// Build the mapper for the configured rule table.
    pub fn rotation_mapper(&self) -> Result<RotationMapper, RuleError> {
        RotationMapper::new(self.rotation_rules()?)
    }

    /// Time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.display.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialplate_core::{PlateIndex, TimeSample};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.plates.len(), PLATE_COUNT);
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
        assert_eq!(config.time_lapse.multiplier, 60.0);
        assert_eq!(config.rotation_rules().unwrap(), default_rules());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [display]
            hour_convention = "12h"
            frame_interval_ms = 100
            show_grid = true

            [time_lapse]
            multiplier = 600.0

            [[plates]]
            radius = 8.0
            color = 0x112233
            rule = { digit = "minute_ones", direction = "counter_clockwise" }

            [[plates]]
            radius = 7.0
            color = 0x223344
            rule = { digit = "minute_tens" }

            [[plates]]
            radius = 6.0
            color = 0x334455

            [[plates]]
            radius = 5.0
            color = 0x445566

            [[plates]]
            radius = 4.0
            color = 0x556677

            [[plates]]
            radius = 3.0
            color = 0x667788
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.display.hour_convention, HourConvention::TwelveHour);
        assert!(config.display.show_grid);
        assert_eq!(config.frame_interval(), Duration::from_millis(100));
        assert_eq!(config.time_lapse.multiplier, 600.0);
        assert_eq!(config.plates[0].color, 0x112233);
        assert_eq!(
            config.plates[1].rule,
            Some(RuleConfig {
                digit: DigitSource::MinuteTens,
                direction: Direction::Clockwise,
            })
        );

        let mapper = config.rotation_mapper().unwrap();
        let assignment = mapper.compute_assignment(&TimeSample::new(0, 34));
        let outer = PlateIndex::new(0).unwrap();
        let second = PlateIndex::new(1).unwrap();
        assert_eq!(assignment.degrees(outer), 216.0);
        assert_eq!(assignment.degrees(second), 180.0);
    }

    #[test]
    fn test_wrong_plate_count_rejected() {
        let toml = r#"
            [[plates]]
            radius = 8.0
            color = 0x112233
        "#;
        assert!(matches!(
            Config::parse(toml),
            Err(ConfigError::PlateCount { found: 1 })
        ));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let result = Config::parse("[time_lapse]\nmultiplier = 0.0\n");
        assert!(matches!(result, Err(ConfigError::InvalidMultiplier(_))));
        let result = Config::parse("[time_lapse]\nmultiplier = -5.0\n");
        assert!(matches!(result, Err(ConfigError::InvalidMultiplier(_))));
    }

    #[test]
    fn test_invalid_frame_interval_rejected() {
        let result = Config::parse("[display]\nframe_interval_ms = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidFrameInterval)));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut config = Config::default();
        config.plates[2].radius = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadius { plate: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_digit_is_parse_error() {
        let mut toml = String::new();
        for radius in [8, 7, 6, 5, 4, 3] {
            toml.push_str(&format!("[[plates]]\nradius = {radius}.0\ncolor = 0\n"));
        }
        toml.push_str("[[plates]]\nradius = 2.0\ncolor = 0\nrule = { digit = \"seconds\" }\n");
        assert!(matches!(Config::parse(&toml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::from_file(Path::new("/nonexistent/dialplate/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigError, MandalaError};

/// Prefix shared by every environment variable the workspace reads.
pub const ENV_PREFIX: &str = "MANDALA_";

/// Radius and stroke width of each clock hand, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandGeometryConfig {
    pub hour_radius: f64,
    pub minute_radius: f64,
    pub second_radius: f64,
    pub hour_width: f64,
    pub minute_width: f64,
    pub second_width: f64,
    /// The second hand is always computed; this only tells renderers to skip it.
    pub show_second_hand: bool,
}

impl Default for HandGeometryConfig {
    fn default() -> Self {
        Self {
            hour_radius: 180.0,
            minute_radius: 250.0,
            second_radius: 270.0,
            hour_width: 8.0,
            minute_width: 5.0,
            second_width: 2.0,
            show_second_hand: true,
        }
    }
}

/// Which day abbreviation a filler cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerLabels {
    /// Ring `r` shows the abbreviation of weekday `r` (Monday = 0).
    #[default]
    Aligned,
    /// Ring `r` shows the abbreviation of weekday `r - 1`; ring 0 stays blank.
    Shifted,
}

impl FromStr for FillerLabels {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "aligned" => Ok(FillerLabels::Aligned),
            "shifted" | "legacy" => Ok(FillerLabels::Shifted),
            other => Err(format!("unknown filler label mode `{other}`")),
        }
    }
}

impl fmt::Display for FillerLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillerLabels::Aligned => write!(f, "aligned"),
            FillerLabels::Shifted => write!(f, "shifted"),
        }
    }
}

/// Radial placement of the calendar rings and week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarGeometry {
    /// Distance between two neighbouring day rings.
    pub ring_spacing: f64,
    /// Radius added to every ring; ring 6 sits at `ring_spacing + base_offset`.
    pub base_offset: f64,
    pub week_label_radius: f64,
    pub filler_labels: FillerLabels,
}

impl Default for CalendarGeometry {
    fn default() -> Self {
        Self {
            ring_spacing: 50.0,
            base_offset: 400.0,
            week_label_radius: 400.0,
            filler_labels: FillerLabels::Aligned,
        }
    }
}

/// Radii of the numeral rings printed on the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceGeometry {
    pub minute_ring_radius: f64,
    pub hour24_ring_radius: f64,
    pub hour12_ring_radius: f64,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            minute_ring_radius: 350.0,
            hour24_ring_radius: 300.0,
            hour12_ring_radius: 250.0,
        }
    }
}

/// Offset applied to the canvas centre to obtain the hands' pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotAdjust {
    pub dx: f64,
    pub dy: f64,
}

impl Default for PivotAdjust {
    fn default() -> Self {
        Self { dx: 10.0, dy: 0.0 }
    }
}

/// Configuration built once at startup and handed to every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandalaConfig {
    pub tick_interval_ms: u64,
    pub language: String,
    pub hands: HandGeometryConfig,
    pub calendar: CalendarGeometry,
    pub face: FaceGeometry,
    pub pivot: PivotAdjust,
}

impl Default for MandalaConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            language: "en".to_string(),
            hands: HandGeometryConfig::default(),
            calendar: CalendarGeometry::default(),
            face: FaceGeometry::default(),
            pivot: PivotAdjust::default(),
        }
    }
}

impl MandalaConfig {
    /// Loads configuration from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Loads configuration from env vars prefixed with the provided value.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, |key| env::var(key))
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Missing or blank variables keep their default.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let defaults = Self::default();
        let read = |suffix: &str| -> Result<Option<String>, ConfigError> {
            let key = format!("{prefix}{suffix}");
            match lookup(&key) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value.trim().to_string())),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(err) => Err(ConfigError::InvalidEnvVar { key, source: err }),
            }
        };

        let hands = HandGeometryConfig {
            hour_radius: parse_value(prefix, "HOUR_RADIUS", read("HOUR_RADIUS")?)?
                .unwrap_or(defaults.hands.hour_radius),
            minute_radius: parse_value(prefix, "MINUTE_RADIUS", read("MINUTE_RADIUS")?)?
                .unwrap_or(defaults.hands.minute_radius),
            second_radius: parse_value(prefix, "SECOND_RADIUS", read("SECOND_RADIUS")?)?
                .unwrap_or(defaults.hands.second_radius),
            hour_width: parse_value(prefix, "HOUR_WIDTH", read("HOUR_WIDTH")?)?
                .unwrap_or(defaults.hands.hour_width),
            minute_width: parse_value(prefix, "MINUTE_WIDTH", read("MINUTE_WIDTH")?)?
                .unwrap_or(defaults.hands.minute_width),
            second_width: parse_value(prefix, "SECOND_WIDTH", read("SECOND_WIDTH")?)?
                .unwrap_or(defaults.hands.second_width),
            show_second_hand: read("SHOW_SECOND_HAND")?
                .map(|raw| parse_flag(prefix, "SHOW_SECOND_HAND", &raw))
                .transpose()?
                .unwrap_or(defaults.hands.show_second_hand),
        };

        let calendar = CalendarGeometry {
            ring_spacing: parse_value(prefix, "RING_SPACING", read("RING_SPACING")?)?
                .unwrap_or(defaults.calendar.ring_spacing),
            base_offset: parse_value(prefix, "BASE_OFFSET", read("BASE_OFFSET")?)?
                .unwrap_or(defaults.calendar.base_offset),
            week_label_radius: parse_value(prefix, "WEEK_LABEL_RADIUS", read("WEEK_LABEL_RADIUS")?)?
                .unwrap_or(defaults.calendar.week_label_radius),
            filler_labels: parse_value(prefix, "FILLER_LABELS", read("FILLER_LABELS")?)?
                .unwrap_or(defaults.calendar.filler_labels),
        };

        let face = FaceGeometry {
            minute_ring_radius: parse_value(prefix, "MINUTE_RING_RADIUS", read("MINUTE_RING_RADIUS")?)?
                .unwrap_or(defaults.face.minute_ring_radius),
            hour24_ring_radius: parse_value(prefix, "HOUR24_RING_RADIUS", read("HOUR24_RING_RADIUS")?)?
                .unwrap_or(defaults.face.hour24_ring_radius),
            hour12_ring_radius: parse_value(prefix, "HOUR12_RING_RADIUS", read("HOUR12_RING_RADIUS")?)?
                .unwrap_or(defaults.face.hour12_ring_radius),
        };

        let pivot = PivotAdjust {
            dx: parse_value(prefix, "PIVOT_DX", read("PIVOT_DX")?)?.unwrap_or(defaults.pivot.dx),
            dy: parse_value(prefix, "PIVOT_DY", read("PIVOT_DY")?)?.unwrap_or(defaults.pivot.dy),
        };

        let tick_interval_ms =
            parse_value(prefix, "TICK_MS", read("TICK_MS")?)?.unwrap_or(defaults.tick_interval_ms);
        let language = read("LANGUAGE")?.unwrap_or(defaults.language);

        let config = Self {
            tick_interval_ms,
            language,
            hands,
            calendar,
            face,
            pivot,
        };
        config.validate()?;
        debug!(?config, "configuration loaded from environment");
        Ok(config)
    }

    /// Loads configuration from a TOML file. Absent keys keep their default.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded from file");
        Ok(config)
    }

    /// Serializes the configuration in the format `from_toml_file` reads.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Internal(err.to_string()))
    }

    /// Rejects geometry a renderer cannot draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hands.hour_radius", self.hands.hour_radius),
            ("hands.minute_radius", self.hands.minute_radius),
            ("hands.second_radius", self.hands.second_radius),
            ("hands.hour_width", self.hands.hour_width),
            ("hands.minute_width", self.hands.minute_width),
            ("hands.second_width", self.hands.second_width),
            ("calendar.ring_spacing", self.calendar.ring_spacing),
            ("calendar.week_label_radius", self.calendar.week_label_radius),
            ("face.minute_ring_radius", self.face.minute_ring_radius),
            ("face.hour24_ring_radius", self.face.hour24_ring_radius),
            ("face.hour12_ring_radius", self.face.hour12_ring_radius),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        if !self.calendar.base_offset.is_finite() || self.calendar.base_offset < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "calendar.base_offset".to_string(),
                reason: "must be zero or positive".to_string(),
            });
        }

        if !(self.pivot.dx.is_finite() && self.pivot.dy.is_finite()) {
            return Err(ConfigError::InvalidValue {
                key: "pivot".to_string(),
                reason: "offsets must be finite".to_string(),
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_interval_ms".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Helper that loads config and converts to the canonical Mandala error type.
pub fn load_config(path: Option<&Path>) -> Result<MandalaConfig, MandalaError> {
    match path {
        Some(path) => Ok(MandalaConfig::from_toml_file(path)?),
        None => Ok(MandalaConfig::from_env()?),
    }
}

fn parse_value<T>(prefix: &str, suffix: &str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map(|value| {
        T::from_str(&value).map_err(|err| ConfigError::InvalidValue {
            key: format!("{prefix}{suffix}"),
            reason: err.to_string(),
        })
    })
    .transpose()
}

fn parse_flag(prefix: &str, suffix: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: format!("{prefix}{suffix}"),
            reason: format!("expected a boolean, got `{other}`"),
        }),
    }
}

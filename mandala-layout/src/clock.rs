//! Hand angles for the analog clock.
//!
//! Angles follow the canvas convention the renderer expects: a hand's tip
//! sits at `(r·sin a, r·cos a)` from the pivot with the y axis pointing
//! down. Every field is rotated half a turn before it is scaled, and the
//! result is negated so the hands sweep clockwise on screen.

use std::f64::consts::PI;
use std::fmt;

use chrono::{DateTime, NaiveTime, SecondsFormat, Timelike, Utc};
use mandala_core::HandGeometryConfig;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

const SECONDS_PER_DAY: u32 = 86_400;

/// Ratio between a hand's stroke width and the radius of the dot at its tip.
const CAP_RATIO: f64 = 2.3;

/// Wall-clock fields of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, LayoutError> {
        check_field("hours", hours, 24)?;
        check_field("minutes", minutes, 60)?;
        check_field("seconds", seconds, 60)?;
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Builds a time from seconds since midnight, wrapping past the end of the day.
    pub fn from_seconds_of_day(total: u32) -> Self {
        let total = total % SECONDS_PER_DAY;
        Self {
            hours: total / 3_600,
            minutes: total / 60 % 60,
            seconds: total % 60,
        }
    }

    pub fn from_timelike<T: Timelike>(value: &T) -> Self {
        Self {
            hours: value.hour(),
            minutes: value.minute(),
            // chrono reports leap seconds through the nanosecond field, so this stays below 60
            seconds: value.second().min(59),
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(value: NaiveTime) -> Self {
        Self::from_timelike(&value)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

fn check_field(field: &'static str, value: u32, limit: u32) -> Result<(), LayoutError> {
    if value < limit {
        Ok(())
    } else {
        Err(LayoutError::InvalidTimeField {
            field,
            value,
            limit,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

impl HandKind {
    /// Number of units in one full turn of the hand.
    pub fn period(self) -> f64 {
        match self {
            HandKind::Hour => 12.0,
            HandKind::Minute | HandKind::Second => 60.0,
        }
    }
}

/// Position and stroke of one hand for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandAngle {
    pub kind: HandKind,
    pub angle_radians: f64,
    pub radius_pixels: f64,
    pub width_pixels: f64,
}

impl HandAngle {
    fn new(kind: HandKind, position: f64, radius_pixels: f64, width_pixels: f64) -> Self {
        Self {
            kind,
            angle_radians: position / kind.period() * -2.0 * PI,
            radius_pixels,
            width_pixels,
        }
    }

    /// Offset of the hand's tip from the pivot, y axis pointing down.
    pub fn tip_offset(&self) -> (f64, f64) {
        (
            self.radius_pixels * self.angle_radians.sin(),
            self.radius_pixels * self.angle_radians.cos(),
        )
    }

    /// Radius of the dot drawn at the tip.
    pub fn cap_radius(&self) -> f64 {
        self.width_pixels / CAP_RATIO
    }
}

/// The three hands computed for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandAngles {
    pub hour: HandAngle,
    pub minute: HandAngle,
    pub second: HandAngle,
    pub show_second_hand: bool,
}

impl HandAngles {
    /// Hands a renderer should draw, hour hand first.
    pub fn visible(&self) -> impl Iterator<Item = &HandAngle> {
        let second = self.show_second_hand.then_some(&self.second);
        [&self.hour, &self.minute].into_iter().chain(second)
    }
}

fn half_turn(raw: f64, period: f64) -> f64 {
    let half = period / 2.0;
    if raw > half {
        raw - half
    } else {
        raw + half
    }
}

/// Hour hand position in hour units, including the sweep within the hour.
pub fn hour_position(time: TimeOfDay) -> f64 {
    let mut hours = f64::from(time.hours);
    if hours > 12.0 {
        hours -= 12.0;
    }
    half_turn(hours, HandKind::Hour.period()) + f64::from(time.minutes) / 60.0
}

pub fn minute_position(time: TimeOfDay) -> f64 {
    half_turn(f64::from(time.minutes), HandKind::Minute.period())
}

pub fn second_position(time: TimeOfDay) -> f64 {
    half_turn(f64::from(time.seconds), HandKind::Second.period())
}

/// Converts a time of day into hour, minute and second hand geometry.
///
/// The second hand is computed even when `show_second_hand` is off.
pub fn compute_hand_angles(time: TimeOfDay, geometry: &HandGeometryConfig) -> HandAngles {
    HandAngles {
        hour: HandAngle::new(
            HandKind::Hour,
            hour_position(time),
            geometry.hour_radius,
            geometry.hour_width,
        ),
        minute: HandAngle::new(
            HandKind::Minute,
            minute_position(time),
            geometry.minute_radius,
            geometry.minute_width,
        ),
        second: HandAngle::new(
            HandKind::Second,
            second_position(time),
            geometry.second_radius,
            geometry.second_width,
        ),
        show_second_hand: geometry.show_second_hand,
    }
}

/// `HH:MM:SS` text for the digital clock.
pub fn digital_readout(time: TimeOfDay) -> String {
    time.to_string()
}

/// ISO-8601 UTC timestamp with millisecond precision and a `Z` suffix.
pub fn zulu_readout(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Numerals printed around the clock face.

use mandala_core::FaceGeometry;
use serde::{Deserialize, Serialize};

const MINUTE_TICK: &str = "'";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralRing {
    /// Sixty positions: a number every five minutes, a tick mark in between.
    Minutes,
    /// 13 to 24, with 24 at the top.
    Hours24,
    /// 1 to 12, with 12 at the top.
    Hours12,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Numeral {
    pub ring: NumeralRing,
    pub label: String,
    /// False only for the tick marks of the minute ring.
    pub is_major: bool,
    pub angle_degrees: f64,
    pub radius_pixels: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockFace {
    pub minutes: Vec<Numeral>,
    pub hours_24: Vec<Numeral>,
    pub hours_12: Vec<Numeral>,
}

impl ClockFace {
    pub fn build(geometry: &FaceGeometry) -> Self {
        let minutes = (0..60u32)
            .map(|i| {
                let is_major = i % 5 == 0;
                Numeral {
                    ring: NumeralRing::Minutes,
                    label: if is_major {
                        i.to_string()
                    } else {
                        MINUTE_TICK.to_string()
                    },
                    is_major,
                    angle_degrees: f64::from(i) * (360.0 / 60.0),
                    radius_pixels: geometry.minute_ring_radius,
                }
            })
            .collect();

        let hour_ring = |ring: NumeralRing, radius: f64, top: u32, offset: u32| {
            (0..12u32)
                .map(|i| Numeral {
                    ring,
                    label: (if i == 0 { top } else { i + offset }).to_string(),
                    is_major: true,
                    angle_degrees: f64::from(i) * (360.0 / 12.0),
                    radius_pixels: radius,
                })
                .collect::<Vec<_>>()
        };

        Self {
            minutes,
            hours_24: hour_ring(NumeralRing::Hours24, geometry.hour24_ring_radius, 24, 12),
            hours_12: hour_ring(NumeralRing::Hours12, geometry.hour12_ring_radius, 12, 0),
        }
    }

    pub fn numerals(&self) -> impl Iterator<Item = &Numeral> {
        self.minutes
            .iter()
            .chain(self.hours_24.iter())
            .chain(self.hours_12.iter())
    }
}

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use mandala_core::HandGeometryConfig;
use mandala_layout::clock::{compute_hand_angles, digital_readout, zulu_readout, HandAngles, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Snapshot of the clock for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Local wall-clock time the frame was computed for.
    pub at: NaiveDateTime,
    pub time: TimeOfDay,
    pub hands: HandAngles,
    pub digital: String,
    pub zulu: String,
}

/// Computes frames with a fixed hand geometry.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuilder {
    geometry: HandGeometryConfig,
}

impl FrameBuilder {
    pub fn new(geometry: HandGeometryConfig) -> Self {
        Self { geometry }
    }

    pub fn build(&self, now: DateTime<FixedOffset>) -> Frame {
        let at = now.naive_local();
        let time = TimeOfDay::from_timelike(&at);
        Frame {
            at,
            time,
            hands: compute_hand_angles(time, &self.geometry),
            digital: digital_readout(time),
            zulu: zulu_readout(&now.with_timezone(&Utc)),
        }
    }
}

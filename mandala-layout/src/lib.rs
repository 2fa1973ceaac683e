//! Pure geometry for the mandala clock.
//!
//! Nothing in this crate touches a screen or a clock: callers hand in a
//! time of day or a date together with the geometry section of
//! [`mandala_core::MandalaConfig`], and get back angles and radii that a
//! rendering layer turns into shapes and text.

pub mod calendar;
pub mod clock;
pub mod error;
pub mod face;
pub mod locale;

pub use error::LayoutError;

pub mod prelude {
    pub use crate::calendar::{
        BandGlyph, CalendarCell, CalendarLayoutBuilder, CellKind, Highlight, WeekLabel, YearGrid,
    };
    pub use crate::clock::{compute_hand_angles, HandAngle, HandAngles, HandKind, TimeOfDay};
    pub use crate::face::{ClockFace, Numeral, NumeralRing};
    pub use crate::locale::Locale;
    pub use crate::LayoutError;
}

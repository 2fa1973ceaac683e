//! Mandala: a clock face whose hands and year calendar are laid out on
//! concentric rings.
//!
//! The workspace is split into several crates:
//!
//! * `mandala-core`: configuration, errors, logging and JSON helpers
//! * `mandala-layout`: pure geometry for the hands, face numerals and calendar rings
//! * `mandala-engine`: the tokio tick loop that recomputes a frame every second
//! * `mandala-cli`: the `mandala` binary and its terminal renderer

pub use mandala_core;
pub use mandala_engine;
pub use mandala_layout;

// Commonly used symbols
pub use mandala_core::{MandalaConfig, MandalaError};
pub use mandala_engine::{Frame, FrameSink, Ticker, TimeSource};
pub use mandala_layout::calendar::{CalendarLayoutBuilder, YearGrid};
pub use mandala_layout::clock::{compute_hand_angles, HandAngles, TimeOfDay};
pub use mandala_layout::locale::Locale;

/// Builds the calendar of the year containing `today` with the configured geometry.
pub fn year_grid(config: &MandalaConfig, locale: &Locale, today: chrono::NaiveDate) -> YearGrid {
    CalendarLayoutBuilder::new(&config.calendar, locale).build_year_grid(today, None)
}

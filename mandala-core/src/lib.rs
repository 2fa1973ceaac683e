//! Core shared library for the Mandala workspace.
//!
//! This crate exposes the primitives every other member depends on:
//! the canonical error type, configuration loading, logging setup and
//! JSON helpers used by the command-line front end.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;

pub use config::{
    CalendarGeometry, FaceGeometry, FillerLabels, HandGeometryConfig, MandalaConfig, PivotAdjust,
};
pub use errors::{ConfigError, MandalaError, Result as CoreResult};

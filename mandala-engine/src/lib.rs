//! Mandala Engine - recurring tick runtime for the clock and calendar.

pub mod error;
pub mod frame;
pub mod source;
pub mod ticker;

pub use error::EngineError;
pub use frame::{Frame, FrameBuilder};
pub use source::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use ticker::{FrameSink, Ticker, TickerHandle, TickerStats};

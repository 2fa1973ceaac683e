use thiserror::Error;

/// Errors that may occur when driving the tick runtime.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("ticker already stopped")]
    AlreadyStopped,
    #[error("ticker task failed: {0}")]
    Join(String),
}

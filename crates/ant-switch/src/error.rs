//! Error types for the antenna switch

use thiserror::Error;

/// Errors that can occur while setting up or driving the switch
#[derive(Debug, Error)]
pub enum SwitchError {
    /// Wrong number of output channels handed to the selector
    #[error("expected {expected} output channels, got {actual}")]
    ChannelCount { expected: usize, actual: usize },

    /// Antenna count outside the supported range
    #[error("unsupported antenna count: {0} (expected 2 or 3)")]
    InvalidAntennaCount(u8),

    /// Underlying device failed
    #[error("device error: {0}")]
    Device(String),

    /// The switch actor is no longer running
    #[error("switch actor is not running")]
    ActorClosed,
}

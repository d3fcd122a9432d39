//! Error types for the GPIO backend

use thiserror::Error;

/// Errors that can occur while binding GPIO pins
#[derive(Debug, Error)]
pub enum GpioError {
    /// Failed to open the GPIO controller
    #[error("failed to open GPIO controller: {0}")]
    Open(#[source] rppal::gpio::Error),

    /// Failed to acquire a pin
    #[error("failed to acquire GPIO {pin}: {source}")]
    Pin {
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },

    /// Failed to configure the button interrupt
    #[error("failed to configure interrupt on GPIO {pin}: {source}")]
    Interrupt {
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },
}

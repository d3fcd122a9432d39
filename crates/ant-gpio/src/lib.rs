//! Raspberry Pi GPIO backend for the antenna switch
//!
//! Binds the relay outputs and the push-button input through `rppal`. The
//! relay pins come from the configured antenna count; see
//! [`ant_switch::RELAY_PINS`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ant_gpio::GpioBackend;
//! use ant_switch::{AntennaSelector, SwitchConfig};
//!
//! let config = SwitchConfig::default();
//! let backend = GpioBackend::open(&config).unwrap();
//! let selector = AntennaSelector::new(config.antenna_count, backend.outputs).unwrap();
//! ```

pub mod button;
pub mod error;
pub mod output;

use ant_switch::SwitchConfig;
use rppal::gpio::Gpio;
use tracing::info;

pub use button::GpioButton;
pub use error::GpioError;
pub use output::{open_relays, GpioOutput};

/// Relay outputs and button bound for one configuration
#[derive(Debug)]
pub struct GpioBackend {
    /// Relay outputs, antenna 1 first
    pub outputs: Vec<GpioOutput>,
    /// Push-button input
    pub button: GpioButton,
}

impl GpioBackend {
    /// Open the GPIO controller and bind every pin the configuration needs
    pub fn open(config: &SwitchConfig) -> Result<Self, GpioError> {
        let gpio = Gpio::new().map_err(GpioError::Open)?;
        let outputs = open_relays(&gpio, config.antenna_count)?;
        let button = GpioButton::open(&gpio, config.button_pin, config.debounce)?;

        let relay_pins: Vec<u8> = outputs.iter().map(GpioOutput::pin_number).collect();
        info!(
            "GPIO ready: relays on {:?}, button on GPIO {}",
            relay_pins,
            button.pin_number()
        );

        Ok(Self { outputs, button })
    }
}

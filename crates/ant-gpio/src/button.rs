//! Push-button input on a GPIO pin

use std::time::Duration;

use ant_switch::{DebouncedInput, PressCallback, SwitchError};
use rppal::gpio::{Gpio, InputPin, Trigger};
use tracing::{debug, warn};

use crate::error::GpioError;

/// Push-button wired to ground with the internal pull-up enabled
///
/// A press is a falling edge. rppal filters edges closer together than the
/// debounce interval and runs the callback on its interrupt thread.
#[derive(Debug)]
pub struct GpioButton {
    pin_number: u8,
    debounce: Duration,
    input: Option<InputPin>,
}

impl GpioButton {
    /// Acquire `pin` as a pulled-up input
    pub fn open(gpio: &Gpio, pin: u8, debounce: Duration) -> Result<Self, GpioError> {
        let input = gpio
            .get(pin)
            .map_err(|source| GpioError::Pin { pin, source })?
            .into_input_pullup();

        debug!("GPIO {}: bound as button input", pin);
        Ok(Self {
            pin_number: pin,
            debounce,
            input: Some(input),
        })
    }

    /// BCM pin number
    pub fn pin_number(&self) -> u8 {
        self.pin_number
    }
}

impl DebouncedInput for GpioButton {
    fn debounce(&self) -> Duration {
        self.debounce
    }

    fn on_press(&mut self, mut callback: PressCallback) -> Result<(), SwitchError> {
        let pin = self.pin_number;
        let input = self
            .input
            .as_mut()
            .ok_or_else(|| SwitchError::Device(format!("GPIO {} already released", pin)))?;

        input
            .set_async_interrupt(Trigger::FallingEdge, Some(self.debounce), move |_event| {
                callback()
            })
            .map_err(|source| GpioError::Interrupt { pin, source })
            .map_err(|e| SwitchError::Device(e.to_string()))?;

        debug!(
            "GPIO {}: press interrupt armed ({} ms debounce)",
            pin,
            self.debounce.as_millis()
        );
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut input) = self.input.take() {
            if let Err(e) = input.clear_async_interrupt() {
                warn!("GPIO {}: failed to clear interrupt: {}", self.pin_number, e);
            }
            debug!("GPIO {}: released", self.pin_number);
        }
    }
}

//! Relay outputs on GPIO pins

use ant_switch::{AntennaCount, OutputChannel};
use rppal::gpio::{Gpio, OutputPin};
use tracing::{debug, warn};

use crate::error::GpioError;

/// Active-high relay output (relay driver and indicator LED share the pin)
#[derive(Debug)]
pub struct GpioOutput {
    pin_number: u8,
    pin: Option<OutputPin>,
}

impl GpioOutput {
    /// Acquire `pin` as an output, initially low
    pub fn open(gpio: &Gpio, pin: u8) -> Result<Self, GpioError> {
        let output = gpio
            .get(pin)
            .map_err(|source| GpioError::Pin { pin, source })?
            .into_output_low();

        debug!("GPIO {}: bound as relay output", pin);
        Ok(Self {
            pin_number: pin,
            pin: Some(output),
        })
    }

    /// BCM pin number
    pub fn pin_number(&self) -> u8 {
        self.pin_number
    }
}

impl OutputChannel for GpioOutput {
    fn activate(&mut self) {
        match self.pin.as_mut() {
            Some(pin) => pin.set_high(),
            None => warn!("GPIO {}: write after release ignored", self.pin_number),
        }
    }

    fn deactivate(&mut self) {
        if let Some(pin) = self.pin.as_mut() {
            pin.set_low();
        }
    }

    fn is_active(&self) -> bool {
        self.pin.as_ref().is_some_and(|pin| pin.is_set_high())
    }

    fn release(&mut self) {
        if let Some(mut pin) = self.pin.take() {
            pin.set_low();
            debug!("GPIO {}: released", self.pin_number);
        }
    }
}

/// Bind the relay output for every antenna of `count`, antenna 1 first
pub fn open_relays(gpio: &Gpio, count: AntennaCount) -> Result<Vec<GpioOutput>, GpioError> {
    count
        .relay_pins()
        .iter()
        .map(|&pin| GpioOutput::open(gpio, pin))
        .collect()
}

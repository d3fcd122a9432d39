//! Device collaborators
//!
//! The switch drives relays through [`OutputChannel`] and listens to the
//! push-button through [`DebouncedInput`]. Real GPIO and simulated
//! implementations live in their own crates.

use std::time::Duration;

use crate::error::SwitchError;

/// Callback invoked once per debounced button press
pub type PressCallback = Box<dyn FnMut() + Send + 'static>;

/// A boolean output bound to one relay (and its parallel indicator LED)
pub trait OutputChannel {
    /// Drive the output active (relay closed, LED on)
    fn activate(&mut self);

    /// Drive the output inactive
    fn deactivate(&mut self);

    /// Whether the output is currently active
    fn is_active(&self) -> bool;

    /// Release the underlying device handle
    ///
    /// Later calls to `activate` have no effect.
    fn release(&mut self);
}

impl<T: OutputChannel + ?Sized> OutputChannel for Box<T> {
    fn activate(&mut self) {
        (**self).activate()
    }

    fn deactivate(&mut self) {
        (**self).deactivate()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// A momentary input that reports presses after debounce filtering
pub trait DebouncedInput {
    /// Minimum interval between reported presses
    fn debounce(&self) -> Duration;

    /// Register the press callback, replacing any previous one
    fn on_press(&mut self, callback: PressCallback) -> Result<(), SwitchError>;

    /// Stop reporting presses and release the underlying device
    fn release(&mut self);
}

impl<T: DebouncedInput + ?Sized> DebouncedInput for Box<T> {
    fn debounce(&self) -> Duration {
        (**self).debounce()
    }

    fn on_press(&mut self, callback: PressCallback) -> Result<(), SwitchError> {
        (**self).on_press(callback)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

//! Simulated push-button
//!
//! Applies the same rule as the hardware input: a press is reported only if
//! at least the debounce interval has passed since the last reported press.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use ant_switch::{DebouncedInput, PressCallback, SwitchError};
use tracing::debug;

struct ButtonState {
    callback: Option<PressCallback>,
    last_accepted: Option<Instant>,
    released: bool,
    accepted: u64,
    filtered: u64,
}

/// Simulated debounced push-button
///
/// Clones share state, so the console can keep one to inject presses while
/// another is registered with the switch.
#[derive(Clone)]
pub struct SimulatedButton {
    debounce: Duration,
    state: Arc<Mutex<ButtonState>>,
}

impl SimulatedButton {
    /// Create a button with the given debounce interval
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            state: Arc::new(Mutex::new(ButtonState {
                callback: None,
                last_accepted: None,
                released: false,
                accepted: 0,
                filtered: 0,
            })),
        }
    }

    /// Press the button now
    ///
    /// Returns true if the press passed the debounce filter.
    pub fn press(&self) -> bool {
        self.press_at(Instant::now())
    }

    /// Press the button at a given instant
    ///
    /// The registered callback runs on the calling thread while the button
    /// state is locked, so it must not call back into this button.
    pub fn press_at(&self, at: Instant) -> bool {
        let mut state = self.lock();
        if state.released {
            debug!("Button (sim): press after release ignored");
            return false;
        }

        let bouncing = state
            .last_accepted
            .is_some_and(|last| at.saturating_duration_since(last) < self.debounce);
        if bouncing {
            state.filtered += 1;
            debug!("Button (sim): press inside debounce window filtered");
            return false;
        }

        state.last_accepted = Some(at);
        state.accepted += 1;
        if let Some(callback) = state.callback.as_mut() {
            callback();
        }
        true
    }

    /// Number of presses that passed the filter
    pub fn accepted(&self) -> u64 {
        self.lock().accepted
    }

    /// Number of presses dropped as bounces
    pub fn filtered(&self) -> u64 {
        self.lock().filtered
    }

    /// Whether the button has been released
    pub fn is_released(&self) -> bool {
        self.lock().released
    }

    fn lock(&self) -> MutexGuard<'_, ButtonState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DebouncedInput for SimulatedButton {
    fn debounce(&self) -> Duration {
        self.debounce
    }

    fn on_press(&mut self, callback: PressCallback) -> Result<(), SwitchError> {
        let mut state = self.lock();
        if state.released {
            return Err(SwitchError::Device("button already released".to_string()));
        }
        state.callback = Some(callback);
        Ok(())
    }

    fn release(&mut self) {
        let mut state = self.lock();
        state.callback = None;
        state.released = true;
        debug!("Button (sim): released");
    }
}

impl std::fmt::Debug for SimulatedButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedButton")
            .field("debounce", &self.debounce)
            .field("callback", &"<callback>")
            .finish()
    }
}

//! Button-driven cyclic advance
//!
//! Each debounced press moves the selection one antenna forward and wraps
//! after the last one. A press from OFF selects antenna 1; presses never turn
//! the switch off.

use tracing::debug;

use crate::config::AntennaCount;
use crate::device::OutputChannel;
use crate::selector::AntennaSelector;

/// Index selected by a press when the switch is at `current`
pub fn next_index(current: u8, count: AntennaCount) -> u8 {
    if current == 0 {
        1
    } else {
        (current % count.get()) + 1
    }
}

/// Advances the selector on button presses
///
/// The cycle length is the selector's antenna count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclicDriver;

impl CyclicDriver {
    /// Create a driver
    pub fn new() -> Self {
        Self
    }

    /// Handle one debounced press
    pub fn on_press<O: OutputChannel>(&self, selector: &mut AntennaSelector<O>) {
        let current = selector.current();
        let next = next_index(current, selector.count());
        debug!("Button press: {} -> {}", current, next);
        selector.set(i32::from(next));
    }
}

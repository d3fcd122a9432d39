//! Simulated relay outputs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ant_switch::{AntennaCount, OutputChannel};
use tracing::{debug, warn};

/// Simulated relay output
///
/// Clones share state, so a clone kept outside the selector acts as a probe
/// for the relay and its indicator LED.
#[derive(Debug, Clone)]
pub struct SimulatedOutput {
    pin: u8,
    active: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl SimulatedOutput {
    /// Create an inactive output labelled with a pin number
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            active: Arc::new(AtomicBool::new(false)),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Pin this output stands in for
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Whether the output has been released
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl OutputChannel for SimulatedOutput {
    fn activate(&mut self) {
        if self.is_released() {
            warn!("GPIO {} (sim): write after release ignored", self.pin);
            return;
        }
        self.active.store(true, Ordering::SeqCst);
        debug!("GPIO {} (sim): high", self.pin);
    }

    fn deactivate(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.released.store(true, Ordering::SeqCst);
        debug!("GPIO {} (sim): released", self.pin);
    }
}

/// Create one simulated output per relay pin for `count`
///
/// Returns the outputs to hand to the selector plus probes sharing their
/// state, antenna 1 first.
pub fn simulated_outputs(count: AntennaCount) -> (Vec<SimulatedOutput>, Vec<SimulatedOutput>) {
    let outputs: Vec<SimulatedOutput> = count
        .relay_pins()
        .iter()
        .map(|&pin| SimulatedOutput::new(pin))
        .collect();
    let probes = outputs.clone();
    (outputs, probes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_shares_state() {
        let mut output = SimulatedOutput::new(27);
        let probe = output.clone();

        output.activate();
        assert!(probe.is_active());

        output.deactivate();
        assert!(!probe.is_active());
    }

    #[test]
    fn test_release_blocks_activation() {
        let mut output = SimulatedOutput::new(22);
        output.activate();
        output.release();

        assert!(!output.is_active());
        assert!(output.is_released());

        output.activate();
        assert!(!output.is_active());
    }

    #[test]
    fn test_outputs_follow_pin_map() {
        let (outputs, probes) = simulated_outputs(AntennaCount::Three);
        let pins: Vec<u8> = outputs.iter().map(|o| o.pin()).collect();
        assert_eq!(pins, vec![27, 22, 4]);
        assert_eq!(probes.len(), 3);
    }
}

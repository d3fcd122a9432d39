//! Antenna Switch Simulation Library
//!
//! This crate provides stand-ins for the switch hardware so the controller
//! can run and be tested without a Raspberry Pi:
//!
//! - **SimulatedOutput**: a relay output whose state can be observed from a
//!   cloned probe
//! - **SimulatedButton**: a push-button with the same minimum-interval
//!   debounce as the real input, driven by [`SimulatedButton::press`]
//!
//! # Example
//!
//! ```rust
//! use ant_sim::{simulated_outputs, SimulatedButton};
//! use ant_switch::{AntennaCount, AntennaSelector, OutputChannel, DEFAULT_DEBOUNCE};
//!
//! let (outputs, probes) = simulated_outputs(AntennaCount::Two);
//! let mut selector = AntennaSelector::new(AntennaCount::Two, outputs).unwrap();
//!
//! selector.set(2);
//! assert!(!probes[0].is_active());
//! assert!(probes[1].is_active());
//!
//! let button = SimulatedButton::new(DEFAULT_DEBOUNCE);
//! assert!(button.press());
//! assert!(!button.press()); // inside the debounce window
//! ```

pub mod button;
pub mod output;

pub use button::SimulatedButton;
pub use output::{simulated_outputs, SimulatedOutput};

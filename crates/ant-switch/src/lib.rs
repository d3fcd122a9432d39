//! Antenna Switch Core
//!
//! This crate provides the selection logic for a relay antenna switch that
//! routes one of two or three antennas to the radio. Each antenna has a relay
//! driven by a single output pin, with an indicator LED wired in parallel.
//!
//! # Architecture
//!
//! Three components cooperate around a single owned selector:
//!
//! - **[`AntennaSelector`]**: owns the output channels and guarantees that at
//!   most one of them is active
//! - **[`CyclicDriver`]**: advances the selection one position per debounced
//!   button press (A1 → A2 → A3 → A1)
//! - **[`CommandInterpreter`]**: turns text tokens (`A1`, `OFF`, `STAT`, ...)
//!   into selections and status lines
//!
//! The driver and interpreter never talk to each other. In a running system
//! both feed the switch actor ([`run_switch_actor`]), which is the only owner
//! of the selector.
//!
//! # Example
//!
//! ```rust,ignore
//! use ant_switch::{AntennaCount, AntennaSelector, CommandInterpreter, CyclicDriver};
//!
//! let count = AntennaCount::Three;
//! let mut selector = AntennaSelector::new(count, outputs)?;
//! assert_eq!(selector.current(), 1);
//!
//! let interpreter = CommandInterpreter::new();
//! assert_eq!(interpreter.handle(&mut selector, "a2"), "Status: A2");
//!
//! CyclicDriver::new().on_press(&mut selector);
//! assert_eq!(selector.current(), 3);
//! ```

pub mod actor;
pub mod command;
pub mod config;
pub mod cycle;
pub mod device;
pub mod error;
pub mod events;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

pub use actor::{run_switch_actor, SwitchActorCommand, SwitchHandle};
pub use command::{is_error, Command, CommandError, CommandInterpreter, ERROR_MARKER};
pub use config::{AntennaCount, SwitchConfig, BUTTON_PIN, DEFAULT_DEBOUNCE, RELAY_PINS};
pub use cycle::{next_index, CyclicDriver};
pub use device::{DebouncedInput, OutputChannel, PressCallback};
pub use error::SwitchError;
pub use events::{ChangeSource, SwitchEvent};
pub use selector::{status_label, AntennaSelector, SwitchSnapshot};

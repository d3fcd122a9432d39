//! Switch configuration
//!
//! The antenna count is chosen once at startup. Pin assignments are fixed by
//! the board wiring and follow from the count.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SwitchError;

/// Relay output pins (BCM numbering) for antennas 1, 2 and 3
///
/// The indicator LEDs are wired in parallel with the relay drivers, so one
/// pin drives both.
pub const RELAY_PINS: [u8; 3] = [27, 22, 4];

/// Push-button input pin (BCM numbering), active low with pull-up
pub const BUTTON_PIN: u8 = 17;

/// Minimum interval between accepted button presses
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Number of antennas wired to the switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AntennaCount {
    /// Two antennas; the button toggles A1 ↔ A2
    Two,
    /// Three antennas; the button rotates A1 → A2 → A3
    #[default]
    Three,
}

impl AntennaCount {
    /// Number of antennas as an integer
    pub fn get(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Whether `index` is a valid selection (0 for OFF, or 1..=N)
    pub fn contains(self, index: i32) -> bool {
        (0..=i32::from(self.get())).contains(&index)
    }

    /// Command tokens accepted for this count
    pub fn valid_tokens(self) -> Vec<String> {
        (1..=self.get())
            .map(|k| format!("A{}", k))
            .chain(["OFF".to_string(), "STAT".to_string()])
            .collect()
    }

    /// Relay pins bound for this count, indexed by antenna - 1
    pub fn relay_pins(self) -> &'static [u8] {
        &RELAY_PINS[..usize::from(self.get())]
    }
}

impl TryFrom<u8> for AntennaCount {
    type Error = SwitchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(SwitchError::InvalidAntennaCount(other)),
        }
    }
}

impl From<AntennaCount> for u8 {
    fn from(count: AntennaCount) -> Self {
        count.get()
    }
}

impl std::fmt::Display for AntennaCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Startup configuration for the switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchConfig {
    /// Number of antennas
    pub antenna_count: AntennaCount,
    /// Button input pin
    pub button_pin: u8,
    /// Button debounce interval
    pub debounce: Duration,
}

impl SwitchConfig {
    /// Create a configuration for the given count with default wiring
    pub fn new(antenna_count: AntennaCount) -> Self {
        Self {
            antenna_count,
            ..Default::default()
        }
    }

    /// Relay pins bound for the configured count
    pub fn relay_pins(&self) -> &'static [u8] {
        self.antenna_count.relay_pins()
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            antenna_count: AntennaCount::default(),
            button_pin: BUTTON_PIN,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

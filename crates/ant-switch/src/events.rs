//! Switch events
//!
//! The switch actor reports everything observable about the switch through a
//! single event channel, so the console and logs see changes from both the
//! button and the command line in order.

/// What caused a selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Physical push-button
    Button,
    /// Text command
    Command,
}

impl ChangeSource {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Command => "command",
        }
    }
}

/// Events emitted by the switch actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchEvent {
    /// The selected antenna changed
    AntennaChanged {
        /// Previous index (0 = OFF)
        from: u8,
        /// New index (0 = OFF)
        to: u8,
        /// What triggered the change
        source: ChangeSource,
    },

    /// A command line was rejected
    CommandRejected {
        /// Input as received
        input: String,
        /// Response sent back
        response: String,
    },

    /// Outputs were driven off and released
    Released,
}

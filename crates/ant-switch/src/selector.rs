//! Antenna selector
//!
//! The selector owns one output channel per antenna and is the only code that
//! writes to them. Every selection first drives all channels inactive and
//! then activates at most one, so two relays are never closed together.

use tracing::{debug, info, warn};

use crate::config::AntennaCount;
use crate::device::OutputChannel;
use crate::error::SwitchError;

/// Antenna selected at startup
const DEFAULT_ANTENNA: i32 = 1;

/// Point-in-time view of the switch for status display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchSnapshot {
    /// Current index (0 = OFF)
    pub current: u8,
    /// Active state of each channel, antenna 1 first
    pub channels: Vec<bool>,
}

impl SwitchSnapshot {
    /// Status token for the current index ("OFF" or "A{k}")
    pub fn label(&self) -> String {
        status_label(self.current)
    }
}

/// Render an index the way status lines show it
pub fn status_label(index: u8) -> String {
    match index {
        0 => "OFF".to_string(),
        k => format!("A{}", k),
    }
}

/// Mutually exclusive antenna selector
pub struct AntennaSelector<O> {
    count: AntennaCount,
    channels: Vec<O>,
    current: u8,
    released: bool,
}

impl<O: OutputChannel> AntennaSelector<O> {
    /// Take ownership of the output channels and select the default antenna
    ///
    /// `channels` must hold exactly one channel per antenna, antenna 1 first.
    pub fn new(count: AntennaCount, channels: Vec<O>) -> Result<Self, SwitchError> {
        let expected = usize::from(count.get());
        if channels.len() != expected {
            return Err(SwitchError::ChannelCount {
                expected,
                actual: channels.len(),
            });
        }

        let mut selector = Self {
            count,
            channels,
            current: 0,
            released: false,
        };

        for channel in &mut selector.channels {
            channel.deactivate();
        }
        selector.set(DEFAULT_ANTENNA);

        info!("Antenna selector ready ({} antennas)", count);
        Ok(selector)
    }

    /// Configured antenna count
    pub fn count(&self) -> AntennaCount {
        self.count
    }

    /// Select antenna `index`, or all off for 0
    ///
    /// Indices outside 0..=N are ignored and leave the outputs untouched.
    pub fn set(&mut self, index: i32) {
        if !self.count.contains(index) {
            warn!("Ignoring out-of-range antenna index {}", index);
            return;
        }
        if self.released {
            warn!("Ignoring antenna index {} after release", index);
            return;
        }

        for channel in &mut self.channels {
            channel.deactivate();
        }
        if index != 0 {
            if let Some(channel) = self.channel_mut(index) {
                channel.activate();
            }
        }

        let previous = self.current;
        // Range checked above
        self.current = index as u8;

        if previous != self.current {
            info!(
                "Antenna {} -> {}",
                status_label(previous),
                status_label(self.current)
            );
        } else {
            debug!("Antenna re-selected: {}", status_label(self.current));
        }
    }

    /// Currently selected index (0 = OFF)
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Whether the relay for antenna `index` is active
    ///
    /// Returns false for indices that do not name an antenna.
    pub fn channel_state(&self, index: i32) -> bool {
        self.channel(index).is_some_and(|c| c.is_active())
    }

    /// Whether the indicator LED for antenna `index` is lit
    ///
    /// The LED shares the relay's output pin, so this always matches
    /// [`channel_state`](Self::channel_state).
    pub fn indicator_state(&self, index: i32) -> bool {
        self.channel_state(index)
    }

    /// Number of channels currently active
    pub fn active_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_active()).count()
    }

    /// Output channels, antenna 1 first
    pub fn channels(&self) -> &[O] {
        &self.channels
    }

    /// Capture the current index and channel states
    pub fn snapshot(&self) -> SwitchSnapshot {
        SwitchSnapshot {
            current: self.current,
            channels: self.channels.iter().map(|c| c.is_active()).collect(),
        }
    }

    /// Drive every channel inactive and release the devices
    ///
    /// The selection reads OFF afterwards. Safe to call more than once; only
    /// the first call touches the devices.
    pub fn release(&mut self) {
        if self.released {
            debug!("Antenna selector already released");
            return;
        }

        for channel in &mut self.channels {
            channel.deactivate();
        }
        for channel in &mut self.channels {
            channel.release();
        }
        self.current = 0;
        self.released = true;
        info!("Antenna outputs released");
    }

    /// Whether [`release`](Self::release) has run
    pub fn is_released(&self) -> bool {
        self.released
    }

    fn channel(&self, index: i32) -> Option<&O> {
        let slot = usize::try_from(index).ok()?.checked_sub(1)?;
        self.channels.get(slot)
    }

    fn channel_mut(&mut self, index: i32) -> Option<&mut O> {
        let slot = usize::try_from(index).ok()?.checked_sub(1)?;
        self.channels.get_mut(slot)
    }
}

impl<O> std::fmt::Debug for AntennaSelector<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AntennaSelector")
            .field("count", &self.count)
            .field("current", &self.current)
            .field("channels", &self.channels.len())
            .field("released", &self.released)
            .finish()
    }
}

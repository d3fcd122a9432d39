//! Command-line arguments

use std::path::PathBuf;

use ant_switch::AntennaCount;
use clap::Parser;

/// Relay antenna switch controller
#[derive(Debug, Parser)]
#[command(name = "antennactl", version, about)]
pub struct Cli {
    /// Number of antennas to cycle through with the button (2 or 3)
    #[arg(long, value_name = "N", value_parser = parse_antenna_count)]
    pub mode: Option<AntennaCount>,

    /// Minimum interval between button presses, in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Run against simulated outputs instead of GPIO (adds a PRESS command)
    #[arg(long)]
    pub simulate: bool,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    pub save: bool,
}

fn parse_antenna_count(value: &str) -> Result<AntennaCount, String> {
    let n: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    AntennaCount::try_from(n).map_err(|e| e.to_string())
}

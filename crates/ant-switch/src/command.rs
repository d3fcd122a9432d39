//! Text command interpreter
//!
//! Commands are single case-insensitive tokens:
//!
//! | Token | Effect |
//! |---|---|
//! | `A1`..`A{N}` | select that antenna |
//! | `OFF` | deselect all antennas |
//! | `STAT` | report the current selection |
//!
//! Every command produces one plain status line. Failures start with the
//! [`ERROR_MARKER`] so callers can branch on success without structured types.

use thiserror::Error;
use tracing::debug;

use crate::config::AntennaCount;
use crate::device::OutputChannel;
use crate::selector::{status_label, AntennaSelector};

/// Prefix carried by every failed response
pub const ERROR_MARKER: &str = "ERROR";

/// A parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select antenna k (1..=N)
    Select(u8),
    /// Deselect all antennas
    Off,
    /// Report status without changing it
    Stat,
}

/// Rejected command text
///
/// The display form is the response line sent back to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("ERROR: Empty command")]
    Empty,

    /// Token not in the valid set for this antenna count
    #[error("ERROR: Invalid command '{raw}'. Valid: {valid}")]
    Invalid {
        /// Input exactly as received
        raw: String,
        /// Comma-separated valid tokens
        valid: String,
    },
}

impl Command {
    /// Parse a command line for a switch with `count` antennas
    pub fn parse(text: &str, count: AntennaCount) -> Result<Self, CommandError> {
        let token = text.trim().to_uppercase();
        if token.is_empty() {
            return Err(CommandError::Empty);
        }

        match token.as_str() {
            "OFF" => return Ok(Self::Off),
            "STAT" => return Ok(Self::Stat),
            _ => {}
        }

        if let Some(k) = token
            .strip_prefix('A')
            .filter(|digits| digits.len() == 1)
            .and_then(|digits| digits.parse::<u8>().ok())
        {
            if (1..=count.get()).contains(&k) {
                return Ok(Self::Select(k));
            }
        }

        Err(CommandError::Invalid {
            raw: text.to_string(),
            valid: count.valid_tokens().join(", "),
        })
    }
}

/// Whether a response line reports a failure
pub fn is_error(response: &str) -> bool {
    response.contains(ERROR_MARKER)
}

/// Executes text commands against a selector
///
/// The valid token set comes from the selector's own antenna count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInterpreter;

impl CommandInterpreter {
    /// Create an interpreter
    pub fn new() -> Self {
        Self
    }

    /// Parse and execute one command line, returning the response line
    pub fn handle<O: OutputChannel>(
        &self,
        selector: &mut AntennaSelector<O>,
        text: &str,
    ) -> String {
        match Command::parse(text, selector.count()) {
            Ok(command) => {
                debug!("Executing {:?}", command);
                self.execute(selector, command)
            }
            Err(e) => {
                debug!("Rejected command {:?}: {}", text, e);
                e.to_string()
            }
        }
    }

    /// Execute an already parsed command
    pub fn execute<O: OutputChannel>(
        &self,
        selector: &mut AntennaSelector<O>,
        command: Command,
    ) -> String {
        match command {
            Command::Select(k) if !selector.count().contains(i32::from(k)) => {
                return CommandError::Invalid {
                    raw: status_label(k),
                    valid: selector.count().valid_tokens().join(", "),
                }
                .to_string();
            }
            Command::Select(k) => selector.set(i32::from(k)),
            Command::Off => selector.set(0),
            Command::Stat => {}
        }
        format!("Status: {}", status_label(selector.current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channels, TestChannel};

    fn setup(count: AntennaCount) -> (CommandInterpreter, AntennaSelector<TestChannel>) {
        let sel = AntennaSelector::new(count, channels(usize::from(count.get()))).unwrap();
        (CommandInterpreter::new(), sel)
    }

    #[test]
    fn test_parse_tokens() {
        let count = AntennaCount::Three;
        assert_eq!(Command::parse("A1", count), Ok(Command::Select(1)));
        assert_eq!(Command::parse("a3", count), Ok(Command::Select(3)));
        assert_eq!(Command::parse(" off ", count), Ok(Command::Off));
        assert_eq!(Command::parse("Stat", count), Ok(Command::Stat));
    }

    #[test]
    fn test_parse_rejects_out_of_set() {
        let count = AntennaCount::Three;
        for bad in ["A0", "A4", "A01", "A", "B1", "ON", "STATUS", "A1 A2"] {
            assert!(
                matches!(Command::parse(bad, count), Err(CommandError::Invalid { .. })),
                "{bad} should be rejected"
            );
        }
        assert_eq!(
            Command::parse("A3", AntennaCount::Two)
                .unwrap_err()
                .to_string(),
            "ERROR: Invalid command 'A3'. Valid: A1, A2, OFF, STAT"
        );
    }

    #[test]
    fn test_empty_command() {
        let (interp, mut sel) = setup(AntennaCount::Three);
        assert_eq!(interp.handle(&mut sel, ""), "ERROR: Empty command");
        assert_eq!(interp.handle(&mut sel, "   \t"), "ERROR: Empty command");
        assert_eq!(sel.current(), 1);
    }

    #[test]
    fn test_invalid_command_quotes_raw_input() {
        let (interp, mut sel) = setup(AntennaCount::Three);
        let response = interp.handle(&mut sel, " xyz ");
        assert_eq!(
            response,
            "ERROR: Invalid command ' xyz '. Valid: A1, A2, A3, OFF, STAT"
        );
        assert!(is_error(&response));
        assert_eq!(sel.current(), 1);
    }

    #[test]
    fn test_select_and_off() {
        let (interp, mut sel) = setup(AntennaCount::Three);

        assert_eq!(interp.handle(&mut sel, "A2"), "Status: A2");
        assert_eq!(sel.current(), 2);
        assert!(sel.channel_state(2));

        assert_eq!(interp.handle(&mut sel, "OFF"), "Status: OFF");
        assert_eq!(sel.current(), 0);
        assert_eq!(sel.active_count(), 0);
    }

    #[test]
    fn test_stat_does_not_mutate() {
        let (interp, mut sel) = setup(AntennaCount::Three);
        interp.handle(&mut sel, "A3");
        let before = sel.snapshot();

        for _ in 0..3 {
            assert_eq!(interp.handle(&mut sel, "STAT"), "Status: A3");
        }
        assert_eq!(sel.snapshot(), before);

        interp.handle(&mut sel, "OFF");
        assert_eq!(interp.handle(&mut sel, "stat"), "Status: OFF");
    }

    #[test]
    fn test_case_and_whitespace_invariance() {
        let (interp, mut sel) = setup(AntennaCount::Two);
        let responses: Vec<String> = [" a1 ", "A1", "a1"]
            .iter()
            .map(|text| {
                sel.set(2);
                interp.handle(&mut sel, text)
            })
            .collect();
        assert!(responses.iter().all(|r| r == "Status: A1"));
        assert_eq!(sel.current(), 1);
    }

    #[test]
    fn test_tokens_follow_selector_count() {
        let (interp, mut sel) = setup(AntennaCount::Two);
        sel.set(2);

        let response = interp.handle(&mut sel, "A3");
        assert_eq!(
            response,
            "ERROR: Invalid command 'A3'. Valid: A1, A2, OFF, STAT"
        );
        assert!(is_error(&response));
        assert_eq!(sel.current(), 2);
    }

    #[test]
    fn test_execute_rejects_select_beyond_count() {
        let (interp, mut sel) = setup(AntennaCount::Two);

        let response = interp.execute(&mut sel, Command::Select(3));
        assert!(is_error(&response));
        assert!(!response.contains("Status"));
        assert_eq!(sel.current(), 1);
        assert_eq!(sel.active_count(), 1);
    }

    #[test]
    fn test_is_error() {
        assert!(is_error("ERROR: Empty command"));
        assert!(!is_error("Status: A1"));
    }
}

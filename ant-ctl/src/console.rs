//! Interactive console
//!
//! Reads command lines from stdin, handles the local commands (HELP, STATUS,
//! QUIT, and PRESS in simulation mode) and forwards everything else to the
//! switch actor.

use std::io::{BufRead, Write};

use ant_sim::SimulatedButton;
use ant_switch::{
    is_error, status_label, AntennaCount, ChangeSource, SwitchEvent, SwitchHandle, SwitchSnapshot,
};
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const PROMPT: &str = "antenna> ";
const RULE_WIDTH: usize = 40;

/// How a console line is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Blank line
    Skip,
    /// Leave the console
    Quit,
    /// Print the command list
    Help,
    /// Print the status panel
    Status,
    /// Inject a simulated button press
    Press,
    /// Send to the command interpreter
    Switch(String),
}

impl ConsoleInput {
    /// Classify one line of input
    ///
    /// PRESS is only a local command when a simulated button is attached;
    /// otherwise it goes to the interpreter like any other token.
    pub fn classify(line: &str, simulated: bool) -> Self {
        let trimmed = line.trim();
        match trimmed.to_uppercase().as_str() {
            "" => Self::Skip,
            "QUIT" | "EXIT" | "Q" => Self::Quit,
            "HELP" => Self::Help,
            "STATUS" => Self::Status,
            "PRESS" if simulated => Self::Press,
            _ => Self::Switch(trimmed.to_string()),
        }
    }
}

/// Why the console loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// QUIT typed
    Quit,
    /// Stdin closed (Ctrl+D)
    EndOfInput,
    /// SIGINT or SIGTERM
    Signal(&'static str),
    /// Switch actor stopped
    SwitchStopped,
}

/// SIGINT and SIGTERM listeners
///
/// Install these before any relay is energized. A signal that arrives during
/// startup stays pending and ends the console as soon as it starts.
pub struct ShutdownSignals {
    sigint: Signal,
    sigterm: Signal,
}

impl ShutdownSignals {
    /// Register both handlers
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for either signal and return its name
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.sigint.recv() => "SIGINT",
            _ = self.sigterm.recv() => "SIGTERM",
        }
    }
}

/// Render the status panel
pub fn render_status(snapshot: &SwitchSnapshot) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\nCurrent Status:\n");

    match snapshot.current {
        0 => out.push_str("  Antenna: OFF\n"),
        _ => out.push_str(&format!("  Antenna: {} [ACTIVE]\n", snapshot.label())),
    }
    for (i, active) in snapshot.channels.iter().enumerate() {
        let led = if *active { "● (ON)" } else { "○ (off)" };
        out.push_str(&format!("  LED {}:   {}\n", i + 1, led));
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// Render the help text for `count` antennas
pub fn render_help(count: AntennaCount, simulated: bool) -> String {
    let mut out = String::from("Available Commands:\n");
    for k in 1..=count.get() {
        out.push_str(&format!("  A{k}      - Select Antenna {k}\n"));
    }
    out.push_str("  OFF     - Deactivate all antennas\n");
    out.push_str("  STAT    - Show current antenna status\n");
    out.push_str("  STATUS  - Show status panel\n");
    if simulated {
        out.push_str("  PRESS   - Press the simulated button\n");
    }
    out.push_str("  HELP    - Show this help message\n");
    out.push_str("  QUIT    - Exit program\n\n");

    out.push_str("Physical Button:\n");
    match count {
        AntennaCount::Two => out.push_str("  Press button to toggle A1 ↔ A2\n"),
        AntennaCount::Three => out.push_str("  Press button to cycle A1 → A2 → A3 → A1\n"),
    }
    out.push_str("  (Button does not cycle through OFF state)\n");
    out
}

/// Render the startup banner
pub fn render_banner(count: AntennaCount) -> String {
    let rule = "=".repeat(60);
    format!(
        "{rule}\n    ANTENNA CONTROLLER - Interactive CLI\n    \
         {count}-Antenna System with Physical Button Control\n{rule}\n"
    )
}

/// Interactive console bound to the switch actor
pub struct Console {
    handle: SwitchHandle,
    count: AntennaCount,
    sim_button: Option<SimulatedButton>,
}

impl Console {
    /// Create a console; pass the simulated button to enable PRESS
    pub fn new(
        handle: SwitchHandle,
        count: AntennaCount,
        sim_button: Option<SimulatedButton>,
    ) -> Self {
        Self {
            handle,
            count,
            sim_button,
        }
    }

    /// Run until QUIT, end of input, a termination signal, or actor exit
    pub async fn run(
        &self,
        mut event_rx: mpsc::Receiver<SwitchEvent>,
        signals: &mut ShutdownSignals,
    ) -> anyhow::Result<ExitReason> {
        let mut lines = spawn_stdin_reader()?;

        println!("{}", render_banner(self.count));
        println!("{}", render_help(self.count, self.sim_button.is_some()));
        self.print_status().await;
        println!("Enter commands (type HELP for command list):\n");

        loop {
            prompt();

            tokio::select! {
                name = signals.recv() => return Ok(ExitReason::Signal(name)),

                event = event_rx.recv() => {
                    let Some(event) = event else {
                        return Ok(ExitReason::SwitchStopped);
                    };
                    print_event(&event);
                }

                line = lines.recv() => {
                    let Some(line) = line else {
                        println!("\nExiting...");
                        return Ok(ExitReason::EndOfInput);
                    };
                    match ConsoleInput::classify(&line, self.sim_button.is_some()) {
                        ConsoleInput::Skip => {}
                        ConsoleInput::Quit => {
                            println!("\nExiting...");
                            return Ok(ExitReason::Quit);
                        }
                        ConsoleInput::Help => {
                            println!("{}", render_help(self.count, self.sim_button.is_some()));
                        }
                        ConsoleInput::Status => self.print_status().await,
                        ConsoleInput::Press => self.press(),
                        ConsoleInput::Switch(text) => {
                            if !self.execute(&text).await {
                                return Ok(ExitReason::SwitchStopped);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Forward a command line; returns false if the actor has stopped
    async fn execute(&self, text: &str) -> bool {
        let response = match self.handle.execute(text).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Command not delivered: {}", e);
                return false;
            }
        };

        if is_error(&response) {
            println!("  ✗ {}", response);
        } else {
            println!("  ✓ {}", response);
        }

        if !text.eq_ignore_ascii_case("STAT") {
            self.print_status().await;
        }
        true
    }

    fn press(&self) {
        if let Some(button) = &self.sim_button {
            if !button.press() {
                println!("  ✗ Press ignored (debounce)");
            }
        }
    }

    async fn print_status(&self) {
        match self.handle.snapshot().await {
            Ok(snapshot) => println!("{}", render_status(&snapshot)),
            Err(e) => warn!("Status unavailable: {}", e),
        }
    }
}

/// Line printed for a change the user did not type, if any
pub fn render_event(event: &SwitchEvent) -> Option<String> {
    match event {
        SwitchEvent::AntennaChanged {
            from,
            to,
            source: ChangeSource::Button,
        } => Some(format!(
            "\n  ● Button: {} → {}",
            status_label(*from),
            status_label(*to)
        )),
        _ => None,
    }
}

fn print_event(event: &SwitchEvent) {
    if let Some(line) = render_event(event) {
        println!("{}", line);
        return;
    }
    match event {
        SwitchEvent::AntennaChanged { from, to, source } => debug!(
            "Antenna {} -> {} ({})",
            status_label(*from),
            status_label(*to),
            source.name()
        ),
        other => debug!("Switch event: {:?}", other),
    }
}

fn prompt() {
    print!("{PROMPT}");
    let _ = std::io::stdout().flush();
}

/// Read stdin lines on a dedicated thread
///
/// A blocked read must not hold up runtime shutdown, so stdin is read with
/// blocking I/O outside the runtime. The channel closes at end of input.
fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            info!("Console input closed");
        })?;
    Ok(rx)
}

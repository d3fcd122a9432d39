//! Switch Actor
//!
//! This module provides an async actor that owns the [`AntennaSelector`].
//! The button interrupt and the console both send commands to the actor
//! through one channel, so selections are applied one at a time no matter
//! which thread the button callback runs on.
//!
//! # Example
//!
//! ```rust,ignore
//! use ant_switch::actor::{run_switch_actor, SwitchHandle};
//! use tokio::sync::mpsc;
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(32);
//! let (event_tx, mut event_rx) = mpsc::channel(32);
//!
//! let actor = tokio::spawn(run_switch_actor(selector, cmd_rx, event_tx));
//! let handle = SwitchHandle::new(cmd_tx);
//!
//! let response = handle.execute("A2").await?;
//! handle.shutdown().await;
//! actor.await?;
//! ```

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::command::{is_error, CommandInterpreter};
use crate::cycle::CyclicDriver;
use crate::device::OutputChannel;
use crate::error::SwitchError;
use crate::events::{ChangeSource, SwitchEvent};
use crate::selector::{AntennaSelector, SwitchSnapshot};

/// Commands sent to the switch actor
#[derive(Debug)]
pub enum SwitchActorCommand {
    /// A debounced button press
    Press,

    /// Execute a text command
    Execute {
        /// Command line as received
        text: String,
        /// Channel to send back the response line
        response: oneshot::Sender<String>,
    },

    /// Query the current selection and channel states
    Snapshot {
        /// Channel to send back the snapshot
        response: oneshot::Sender<SwitchSnapshot>,
    },

    /// Release the outputs and stop the actor
    Shutdown,
}

/// Run the switch actor until shutdown
///
/// The selector is released before this returns, whether the actor stopped
/// on [`SwitchActorCommand::Shutdown`] or because every sender was dropped.
pub async fn run_switch_actor<O: OutputChannel>(
    mut selector: AntennaSelector<O>,
    mut cmd_rx: mpsc::Receiver<SwitchActorCommand>,
    event_tx: mpsc::Sender<SwitchEvent>,
) {
    let driver = CyclicDriver::new();
    let interpreter = CommandInterpreter::new();
    info!("Switch actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SwitchActorCommand::Press => {
                let from = selector.current();
                driver.on_press(&mut selector);
                emit_change(&event_tx, from, selector.current(), ChangeSource::Button).await;
            }

            SwitchActorCommand::Execute { text, response } => {
                let from = selector.current();
                let reply = interpreter.handle(&mut selector, &text);

                if is_error(&reply) {
                    let _ = event_tx
                        .send(SwitchEvent::CommandRejected {
                            input: text,
                            response: reply.clone(),
                        })
                        .await;
                } else {
                    emit_change(&event_tx, from, selector.current(), ChangeSource::Command)
                        .await;
                }

                if response.send(reply).is_err() {
                    debug!("Command response dropped by caller");
                }
            }

            SwitchActorCommand::Snapshot { response } => {
                let _ = response.send(selector.snapshot());
            }

            SwitchActorCommand::Shutdown => {
                info!("Switch actor shutting down");
                break;
            }
        }
    }

    selector.release();
    let _ = event_tx.send(SwitchEvent::Released).await;
    info!("Switch actor stopped");
}

async fn emit_change(
    event_tx: &mpsc::Sender<SwitchEvent>,
    from: u8,
    to: u8,
    source: ChangeSource,
) {
    if from != to {
        let _ = event_tx
            .send(SwitchEvent::AntennaChanged { from, to, source })
            .await;
    }
}

/// Cloneable sender side of the switch actor
#[derive(Debug, Clone)]
pub struct SwitchHandle {
    cmd_tx: mpsc::Sender<SwitchActorCommand>,
}

impl SwitchHandle {
    /// Wrap the actor's command sender
    pub fn new(cmd_tx: mpsc::Sender<SwitchActorCommand>) -> Self {
        Self { cmd_tx }
    }

    /// Report a press without blocking
    ///
    /// Meant for interrupt callbacks. A press is dropped if the actor's queue
    /// is full or the actor has stopped.
    pub fn try_press(&self) {
        if let Err(e) = self.cmd_tx.try_send(SwitchActorCommand::Press) {
            warn!("Dropping button press: {}", e);
        }
    }

    /// Report a press, waiting for queue space
    pub async fn press(&self) -> Result<(), SwitchError> {
        self.cmd_tx
            .send(SwitchActorCommand::Press)
            .await
            .map_err(|_| SwitchError::ActorClosed)
    }

    /// Execute a text command and wait for the response line
    pub async fn execute(&self, text: impl Into<String>) -> Result<String, SwitchError> {
        let (response, rx) = oneshot::channel();
        self.cmd_tx
            .send(SwitchActorCommand::Execute {
                text: text.into(),
                response,
            })
            .await
            .map_err(|_| SwitchError::ActorClosed)?;
        rx.await.map_err(|_| SwitchError::ActorClosed)
    }

    /// Fetch the current selection and channel states
    pub async fn snapshot(&self) -> Result<SwitchSnapshot, SwitchError> {
        let (response, rx) = oneshot::channel();
        self.cmd_tx
            .send(SwitchActorCommand::Snapshot { response })
            .await
            .map_err(|_| SwitchError::ActorClosed)?;
        rx.await.map_err(|_| SwitchError::ActorClosed)
    }

    /// Ask the actor to release the outputs and stop
    pub async fn shutdown(&self) {
        if self.cmd_tx.send(SwitchActorCommand::Shutdown).await.is_err() {
            debug!("Switch actor already stopped");
        }
    }
}

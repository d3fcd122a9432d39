//! Antenna Switch Controller
//!
//! Console application for a relay antenna switch on a Raspberry Pi. The
//! push-button cycles antennas; the console selects them directly.

mod cli;
mod console;
mod settings;

use std::process::ExitCode;

use ant_gpio::GpioBackend;
use ant_sim::{simulated_outputs, SimulatedButton};
use ant_switch::{
    run_switch_actor, AntennaSelector, DebouncedInput, OutputChannel, SwitchConfig, SwitchHandle,
};
use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use console::{Console, ExitReason, ShutdownSignals};
use settings::Settings;

type BoxedOutput = Box<dyn OutputChannel + Send>;
type BoxedInput = Box<dyn DebouncedInput + Send>;

/// Queue depth between the event sources and the switch actor
const CHANNEL_DEPTH: usize = 32;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they do not interleave with the console on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "antennactl=info,ant_switch=info,ant_sim=info,ant_gpio=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Registered before the relays are energized so a signal during startup
    // still reaches the cleanup path
    let mut signals = ShutdownSignals::install().context("failed to install signal handlers")?;

    let mut settings = Settings::load(cli.config.as_deref());
    settings.apply(&cli);
    if cli.save {
        let path = settings.save(cli.config.as_deref())?;
        info!("Saved settings to {}", path.display());
    }

    let config = settings.switch_config();
    info!(
        "Starting antenna controller ({} antennas, {} ms debounce{})",
        config.antenna_count,
        config.debounce.as_millis(),
        if settings.simulate { ", simulated" } else { "" }
    );

    let (outputs, mut button, sim_button) = open_devices(&config, settings.simulate)?;
    let mut selector = AntennaSelector::new(config.antenna_count, outputs)?;

    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_DEPTH);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_DEPTH);
    let handle = SwitchHandle::new(cmd_tx);

    let press_handle = handle.clone();
    if let Err(e) = button.on_press(Box::new(move || press_handle.try_press())) {
        button.release();
        selector.release();
        return Err(e).context("failed to arm button");
    }
    info!(
        "Button handler active (GPIO {}, {} ms debounce)",
        config.button_pin,
        button.debounce().as_millis()
    );

    let actor = tokio::spawn(run_switch_actor(selector, cmd_rx, event_tx));

    let console = Console::new(handle.clone(), config.antenna_count, sim_button);
    let result = console.run(event_rx, &mut signals).await;

    match &result {
        Ok(ExitReason::Signal(name)) => info!("Received {}, shutting down", name),
        Ok(reason) => info!("Console closed ({:?}), shutting down", reason),
        Err(e) => warn!("Console failed: {:#}", e),
    }

    // Stop presses before the outputs go away
    button.release();
    handle.shutdown().await;
    if let Err(e) = actor.await {
        warn!("Switch actor did not stop cleanly: {}", e);
    }
    println!("✓ Cleanup complete");

    result.map(|_| ())
}

/// Bind outputs and the button, on GPIO or in simulation
fn open_devices(
    config: &SwitchConfig,
    simulate: bool,
) -> anyhow::Result<(Vec<BoxedOutput>, BoxedInput, Option<SimulatedButton>)> {
    if simulate {
        let (outputs, _probes) = simulated_outputs(config.antenna_count);
        let button = SimulatedButton::new(config.debounce);
        let outputs = outputs
            .into_iter()
            .map(|o| Box::new(o) as BoxedOutput)
            .collect();
        return Ok((outputs, Box::new(button.clone()), Some(button)));
    }

    let backend = GpioBackend::open(config).context("hardware initialization failed")?;
    let outputs = backend
        .outputs
        .into_iter()
        .map(|o| Box::new(o) as BoxedOutput)
        .collect();
    Ok((outputs, Box::new(backend.button), None))
}

//! Headless run of the whole pipeline against the simulated cube: replays a
//! move script, plays (or logs) the cues and prints every display update.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use audio_cues::{CuePlayer, RodioCuePlayer};
use clap::Parser;
use cube_core::{CubeController, DisplayUpdate};
use cube_driver::sim::{MoveScript, SimulatedConnector};
use cube_driver::MacAddressProvider;
use tracing::info;
use viewer::recording::RecordingPlayer;

#[derive(Parser, Debug)]
struct Args {
    /// JSON move script; the built-in demo scramble is used when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Directory holding the note clips.
    #[arg(long, default_value = "sounds")]
    sounds_dir: PathBuf,
    /// Simulated cube clock rate relative to the host clock.
    #[arg(long, default_value_t = 1.0)]
    clock_rate: f64,
    /// Log cues instead of playing them.
    #[arg(long)]
    silent: bool,
}

struct LoggingCues;

impl CuePlayer for LoggingCues {
    fn play(&self, notation: &str) {
        info!(notation, "cue");
    }
}

struct NoManualMac;

#[async_trait]
impl MacAddressProvider for NoManualMac {
    async fn resolve(&self, _device_name: &str, _is_fallback: bool) -> Option<String> {
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let script = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading move script {}", path.display()))?;
            MoveScript::from_json(&text).context("parsing move script")?
        }
        None => MoveScript::demo(),
    };

    let connector =
        Arc::new(SimulatedConnector::new(script).with_clock_rate(args.clock_rate));
    let player = Arc::new(RecordingPlayer::new());
    let cues: Arc<dyn CuePlayer> = if args.silent {
        Arc::new(LoggingCues)
    } else {
        Arc::new(RodioCuePlayer::new(args.sounds_dir))
    };

    let controller = CubeController::new(connector, player.clone(), cues);
    let mut updates = controller.subscribe_updates();

    controller.toggle_connection(Arc::new(NoManualMac)).await;
    if !controller.is_connected().await {
        anyhow::bail!("simulated cube failed to connect");
    }

    while let Ok(update) = updates.recv().await {
        match &update {
            DisplayUpdate::Skew(skew) => println!("skew: {skew}%"),
            DisplayUpdate::Battery(level) => println!("battery: {level}%"),
            DisplayUpdate::HardwareName(name) => {
                println!("hardware: {}", name.as_deref().unwrap_or("- n/a -"));
            }
            other => println!("{other:?}"),
        }
        if update == DisplayUpdate::Disconnected {
            break;
        }
    }

    // Let the last deferred cue finish before tearing the process down.
    tokio::time::sleep(cube_core::PAIR_WINDOW * 2).await;
    println!("moves seen: {}", player.appended_moves().join(" "));
    Ok(())
}

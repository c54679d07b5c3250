//! Desktop cube instrument: connects to a (simulated) smart cube, shows its
//! moves on a wireframe canvas and plays a note for every turn.

mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use cube_driver::sim::MoveScript;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::{spawn_backend_thread, BackendConfig};
use crate::controller::events::UiEvent;
use crate::ui::app::{KockaApp, PersistedSettings, SETTINGS_STORAGE_KEY};
use crate::ui::player::GuiPlayer;

#[derive(Parser, Debug)]
struct Args {
    /// Directory holding the note clips (c3.mp3 .. b4.mp3).
    #[arg(long, default_value = "sounds")]
    sounds_dir: PathBuf,
    /// JSON move script replayed by the simulated cube; a built-in demo
    /// scramble is used when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Clock rate of the simulated cube relative to the host, for exercising
    /// the skew readout.
    #[arg(long, default_value_t = 1.0)]
    clock_rate: f64,
    /// Pretend the cube's MAC cannot be discovered, forcing the manual field.
    #[arg(long)]
    unknown_mac: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let script = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading move script {}", path.display()))?;
            Some(MoveScript::from_json(&text).context("parsing move script")?)
        }
        None => None,
    };

    let player = GuiPlayer::new();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    spawn_backend_thread(
        BackendConfig {
            sounds_dir: args.sounds_dir,
            script,
            clock_rate: args.clock_rate,
            unknown_mac: args.unknown_mac,
        },
        player.clone(),
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Kocka hangszer")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Kocka hangszer",
        options,
        Box::new(move |cc| {
            player.attach_context(cc.egui_ctx.clone());
            let settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedSettings>(&text).ok())
            });
            Ok(Box::new(KockaApp::new(cmd_tx, ui_rx, player, settings)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("gui terminated with error: {err}"))
}

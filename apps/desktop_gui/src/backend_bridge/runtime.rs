//! Backend worker thread: owns the tokio runtime and the cube controller,
//! consumes UI commands and feeds display updates back.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use async_trait::async_trait;
use audio_cues::RodioCuePlayer;
use crossbeam_channel::{Receiver, Sender};
use cube_core::CubeController;
use cube_driver::sim::{MoveScript, SimulatedConnector};
use cube_driver::MacAddressProvider;
use tokio::sync::broadcast;
use viewer::CubePlayer;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub struct BackendConfig {
    pub sounds_dir: PathBuf,
    pub script: Option<MoveScript>,
    pub clock_rate: f64,
    pub unknown_mac: bool,
}

/// Resolves the cube MAC from the manually entered field. Stands in for the
/// browser prompt of a typical driver fallback path.
struct ManualMacProvider {
    manual_mac: Option<String>,
}

#[async_trait]
impl MacAddressProvider for ManualMacProvider {
    async fn resolve(&self, device_name: &str, is_fallback: bool) -> Option<String> {
        if self.manual_mac.is_none() {
            tracing::warn!(
                device_name,
                is_fallback,
                "MAC resolution requested but no manual address was entered"
            );
        }
        self.manual_mac.clone()
    }
}

pub fn spawn_backend_thread(
    config: BackendConfig,
    player: Arc<dyn CubePlayer>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "A háttérszál indítása nem sikerült: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let script = config.script.unwrap_or_else(MoveScript::demo);
            let mut connector =
                SimulatedConnector::new(script).with_clock_rate(config.clock_rate);
            if config.unknown_mac {
                connector = connector.without_known_mac();
            }
            let cues = Arc::new(RodioCuePlayer::new(config.sounds_dir));
            let controller =
                Arc::new(CubeController::new(Arc::new(connector), player, cues));

            let mut updates = controller.subscribe_updates();
            let forward_tx = ui_tx.clone();
            tokio::spawn(async move {
                loop {
                    match updates.recv().await {
                        Ok(update) => {
                            let _ = forward_tx.try_send(UiEvent::Display(update));
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "display update stream lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ToggleConnection { manual_mac } => {
                        controller
                            .toggle_connection(Arc::new(ManualMacProvider { manual_mac }))
                            .await;
                    }
                    BackendCommand::ResetState => {
                        controller.reset_state().await;
                    }
                }
            }
        });
    });
}

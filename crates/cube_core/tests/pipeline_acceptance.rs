//! End-to-end run against the simulated driver with real timers: scripted
//! moves flow through pairing, history, skew and the player, and the session
//! ends with a cube-side disconnect.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use audio_cues::CuePlayer;
use cube_core::{CubeController, DisplayUpdate};
use cube_driver::sim::{MoveScript, ScriptedMove, SimulatedConnector};
use cube_driver::MacAddressProvider;
use viewer::recording::RecordingPlayer;

struct CollectingCues {
    played: Mutex<Vec<String>>,
}

impl CollectingCues {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            played: Mutex::new(Vec::new()),
        })
    }

    fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

impl CuePlayer for CollectingCues {
    fn play(&self, notation: &str) {
        self.played.lock().unwrap().push(notation.to_string());
    }
}

struct NoMac;

#[async_trait]
impl MacAddressProvider for NoMac {
    async fn resolve(&self, _device_name: &str, _is_fallback: bool) -> Option<String> {
        None
    }
}

fn script(moves: &[(&str, u64)]) -> MoveScript {
    MoveScript {
        moves: moves
            .iter()
            .map(|(notation, delay_ms)| ScriptedMove {
                notation: notation.to_string(),
                delay_ms: *delay_ms,
            })
            .collect(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn scripted_session_pairs_slices_and_reports_until_disconnect() {
    // L then R' 20 ms apart must fuse into M'; the later U stands alone.
    let connector = Arc::new(SimulatedConnector::new(script(&[
        ("L", 10),
        ("R'", 20),
        ("U", 150),
    ])));
    let player = Arc::new(RecordingPlayer::new());
    let cues = CollectingCues::new();
    let controller = CubeController::new(connector, player.clone(), cues.clone());
    let mut updates = controller.subscribe_updates();

    controller.toggle_connection(Arc::new(NoMac)).await;
    assert!(controller.is_connected().await);

    let mut saw_battery = false;
    let mut saw_hardware = false;
    loop {
        let update = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("pipeline stalled")
            .expect("update stream closed");
        match update {
            DisplayUpdate::Battery(level) => {
                saw_battery = true;
                assert!(level <= 100);
            }
            DisplayUpdate::HardwareName(name) => {
                saw_hardware = true;
                assert!(name.is_some());
            }
            DisplayUpdate::Disconnected => break,
            _ => {}
        }
    }

    assert!(saw_battery && saw_hardware);
    assert!(!controller.is_connected().await);
    assert_eq!(player.appended_moves(), vec!["L", "R'", "U"]);
    // Player state cleared by the disconnect.
    assert_eq!(player.state().as_deref(), Some(""));

    // U's deferred cue fires 90 ms after the move; allow it to land.
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(cues.played(), vec!["M'", "U"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn skew_appears_once_enough_timestamped_moves_arrive() {
    let moves: Vec<(&str, u64)> = std::iter::repeat(("R", 10)).take(12).collect();
    let connector =
        Arc::new(SimulatedConnector::new(script(&moves)).with_clock_rate(1.05));
    let player = Arc::new(RecordingPlayer::new());
    let cues = CollectingCues::new();
    let controller = CubeController::new(connector, player, cues);
    let mut updates = controller.subscribe_updates();

    controller.toggle_connection(Arc::new(NoMac)).await;

    let mut skews = Vec::new();
    loop {
        let update = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("pipeline stalled")
            .expect("update stream closed");
        match update {
            DisplayUpdate::Skew(skew) => skews.push(skew),
            DisplayUpdate::Disconnected => break,
            _ => {}
        }
    }

    // 12 moves with an 11-move threshold: the 11th and 12th publish skew.
    assert_eq!(skews.len(), 2);
}

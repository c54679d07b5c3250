//! In-process stand-in for the Bluetooth driver.
//!
//! Behaves like a real session at the trait seam: answers the query commands
//! with the matching events, replays an optional scripted move sequence with
//! per-move delays, and lets tests inject arbitrary events. A configurable
//! clock-rate factor makes the emitted cube timestamps drift against the host
//! clock so the skew estimate has something to measure.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::domain::MoveEvent;
use shared::error::CubeError;
use shared::protocol::{CubeCommand, CubeEvent, HardwareInfo};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::{CubeConnector, CubeSession, MacAddressProvider};

const EVENT_CHANNEL_CAPACITY: usize = 256;
const SOLVED_FACELETS: &str =
    "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedMove {
    pub notation: String,
    /// Delay before this move fires, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveScript {
    pub moves: Vec<ScriptedMove>,
}

impl MoveScript {
    pub fn from_json(json: &str) -> Result<Self, CubeError> {
        serde_json::from_str(json).map_err(|err| CubeError::InvalidScript(err.to_string()))
    }

    /// A short scramble used when no script is supplied.
    pub fn demo() -> Self {
        let moves = ["R", "U", "R'", "U'", "L", "R'", "F", "B'", "R", "L'"]
            .into_iter()
            .map(|notation| ScriptedMove {
                notation: notation.to_string(),
                delay_ms: 400,
            })
            .collect();
        Self { moves }
    }
}

pub struct SimulatedConnector {
    device_name: String,
    device_mac: Option<String>,
    script: MoveScript,
    /// Cube clock rate relative to the host clock. 1.0 means no drift.
    clock_rate: f64,
}

impl SimulatedConnector {
    pub fn new(script: MoveScript) -> Self {
        Self {
            device_name: "GAN-SIM-001".to_string(),
            device_mac: Some("AB:12:34:5F:70:BE".to_string()),
            script,
            clock_rate: 1.0,
        }
    }

    /// Drop the preset MAC so connecting exercises the fallback provider.
    pub fn without_known_mac(mut self) -> Self {
        self.device_mac = None;
        self
    }

    pub fn with_clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = clock_rate;
        self
    }
}

#[async_trait]
impl CubeConnector for SimulatedConnector {
    async fn connect(
        &self,
        mac_provider: Arc<dyn MacAddressProvider>,
    ) -> anyhow::Result<Arc<dyn CubeSession>> {
        let mac = match &self.device_mac {
            Some(mac) => mac.clone(),
            None => mac_provider
                .resolve(&self.device_name, true)
                .await
                .ok_or_else(|| {
                    CubeError::ConnectFailed("MAC address resolution failed".to_string())
                })
                .context("simulated cube has no advertised MAC")?,
        };

        let session = Arc::new(SimulatedSession::new(
            self.device_name.clone(),
            mac,
            self.clock_rate,
        ));
        info!(device = %self.device_name, "simulated cube connected");

        if !self.script.moves.is_empty() {
            session.clone().spawn_replay(self.script.clone());
        }
        Ok(session)
    }
}

pub struct SimulatedSession {
    device_name: String,
    device_mac: String,
    clock_rate: f64,
    events_tx: broadcast::Sender<CubeEvent>,
    facelets: Mutex<String>,
    battery_level: u8,
}

impl SimulatedSession {
    pub fn new(device_name: String, device_mac: String, clock_rate: f64) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            device_name,
            device_mac,
            clock_rate,
            events_tx,
            facelets: Mutex::new(SOLVED_FACELETS.to_string()),
            battery_level: 87,
        }
    }

    /// Push an event to all subscribers, as if it arrived from the cube.
    pub fn inject(&self, event: CubeEvent) {
        let _ = self.events_tx.send(event);
    }

    fn spawn_replay(self: Arc<Self>, script: MoveScript) {
        tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            for scripted in &script.moves {
                tokio::time::sleep(Duration::from_millis(scripted.delay_ms)).await;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                let event = CubeEvent::Move(MoveEvent::new(
                    scripted.notation.clone(),
                    Some(elapsed_ms * self.clock_rate),
                    chrono::Utc::now().timestamp_millis() as f64,
                ));
                debug!(notation = %scripted.notation, "replaying scripted move");
                if self.events_tx.send(event).is_err() {
                    return;
                }
            }
            let _ = self.events_tx.send(CubeEvent::Disconnect);
        });
    }
}

#[async_trait]
impl CubeSession for SimulatedSession {
    fn device_name(&self) -> String {
        self.device_name.clone()
    }

    fn device_mac(&self) -> String {
        self.device_mac.clone()
    }

    async fn send_command(&self, command: CubeCommand) -> anyhow::Result<()> {
        match command {
            CubeCommand::RequestReset => {
                *self.facelets.lock().await = SOLVED_FACELETS.to_string();
            }
            CubeCommand::RequestHardware => {
                let _ = self.events_tx.send(CubeEvent::Hardware(HardwareInfo {
                    hardware_name: Some("GAN356i Carry Sim".to_string()),
                    hardware_version: Some("1.0".to_string()),
                    software_version: Some("sim".to_string()),
                    gyro_supported: Some(false),
                }));
            }
            CubeCommand::RequestFacelets => {
                let facelets = self.facelets.lock().await.clone();
                let _ = self.events_tx.send(CubeEvent::Facelets { facelets });
            }
            CubeCommand::RequestBattery => {
                let _ = self.events_tx.send(CubeEvent::Battery {
                    level: self.battery_level,
                });
            }
        }
        Ok(())
    }

    async fn disconnect(&self) {
        let _ = self.events_tx.send(CubeEvent::Disconnect);
    }

    fn subscribe_events(&self) -> broadcast::Receiver<CubeEvent> {
        self.events_tx.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/sim_tests.rs"]
mod tests;

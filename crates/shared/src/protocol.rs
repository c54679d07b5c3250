use serde::{Deserialize, Serialize};

use crate::domain::MoveEvent;

/// Events published by a cube session, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CubeEvent {
    Move(MoveEvent),
    Hardware(HardwareInfo),
    Battery {
        /// Charge level in percent, 0..=100.
        level: u8,
    },
    Facelets {
        facelets: String,
    },
    Gyro,
    Disconnect,
}

/// Hardware identification reported by the cube. Every field is optional:
/// older firmware omits parts of the report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub hardware_name: Option<String>,
    pub hardware_version: Option<String>,
    pub software_version: Option<String>,
    pub gyro_supported: Option<bool>,
}

/// Commands accepted by a cube session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CubeCommand {
    RequestReset,
    RequestHardware,
    RequestFacelets,
    RequestBattery,
}

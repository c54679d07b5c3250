//! Seam to the Bluetooth cube driver.
//!
//! The actual transport (GATT plumbing, packet decryption, move decoding)
//! belongs to an external driver; this crate defines the traits the rest of
//! the application programs against, the timestamp-skew estimate computed
//! over decoded moves, and an in-process simulated driver used by the
//! binaries and tests.

use std::sync::Arc;

use async_trait::async_trait;
use shared::protocol::{CubeCommand, CubeEvent};
use tokio::sync::broadcast;

pub mod sim;
pub mod skew;

/// Resolves the cube's MAC address when the platform cannot discover it
/// automatically.
///
/// Called once with `is_fallback = false` when the platform lacks
/// advertisement watching, and again with `is_fallback = true` if automatic
/// discovery ran and failed. Returning `None` aborts the connection attempt.
#[async_trait]
pub trait MacAddressProvider: Send + Sync {
    async fn resolve(&self, device_name: &str, is_fallback: bool) -> Option<String>;
}

/// An open session with a cube.
#[async_trait]
pub trait CubeSession: Send + Sync {
    fn device_name(&self) -> String;
    fn device_mac(&self) -> String;
    async fn send_command(&self, command: CubeCommand) -> anyhow::Result<()>;
    async fn disconnect(&self);
    fn subscribe_events(&self) -> broadcast::Receiver<CubeEvent>;
}

#[async_trait]
pub trait CubeConnector: Send + Sync {
    async fn connect(
        &self,
        mac_provider: Arc<dyn MacAddressProvider>,
    ) -> anyhow::Result<Arc<dyn CubeSession>>;
}

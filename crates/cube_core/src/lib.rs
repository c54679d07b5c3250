//! Coordination between the cube driver, the visualization player and the
//! audio cues.
//!
//! `CubeController` owns every piece of mutable session state: the connection
//! handle, the single pending unconfirmed move, and the trailing move
//! history. All of it lives behind one lock and is touched only from the
//! controller's own tasks, so ordering follows event arrival order.

use std::sync::Arc;
use std::time::Duration;

use audio_cues::CuePlayer;
use cube_driver::skew::calc_timestamp_skew;
use cube_driver::{CubeConnector, CubeSession, MacAddressProvider};
use futures::StreamExt;
use shared::domain::MoveEvent;
use shared::protocol::{CubeCommand, CubeEvent};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, info, warn};
use viewer::{AppendOptions, CubePlayer};

/// Grace period during which a move may still be reinterpreted as half of a
/// slice turn before its own cue plays.
pub const PAIR_WINDOW: Duration = Duration::from_millis(90);

/// Most recent moves retained for the skew diagnostic.
pub const HISTORY_CAPACITY: usize = 256;

/// Skew is published once the history holds more moves than this.
const SKEW_MIN_WINDOW: usize = 10;

const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Display-facing state changes published by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayUpdate {
    Connected {
        device_name: String,
        device_mac: String,
    },
    ConnectFailed {
        message: String,
    },
    /// User-initiated disconnect: only the connect control reverts.
    SessionClosed,
    /// The cube dropped the connection: every info field reverts too.
    Disconnected,
    HardwareName(Option<String>),
    Battery(u8),
    Skew(f64),
}

struct PendingMove {
    notation: String,
    /// Monotonic arm counter; a deferred task only fires if the slot still
    /// holds its own sequence number.
    seq: u64,
    timer: JoinHandle<()>,
}

struct Inner {
    session: Option<Arc<dyn CubeSession>>,
    router_task: Option<JoinHandle<()>>,
    pending: Option<PendingMove>,
    next_pending_seq: u64,
    history: Vec<MoveEvent>,
}

struct Shared {
    inner: Mutex<Inner>,
    player: Arc<dyn CubePlayer>,
    cues: Arc<dyn CuePlayer>,
    updates_tx: broadcast::Sender<DisplayUpdate>,
}

pub struct CubeController {
    connector: Arc<dyn CubeConnector>,
    shared: Arc<Shared>,
}

impl CubeController {
    pub fn new(
        connector: Arc<dyn CubeConnector>,
        player: Arc<dyn CubePlayer>,
        cues: Arc<dyn CuePlayer>,
    ) -> Self {
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            connector,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    session: None,
                    router_task: None,
                    pending: None,
                    next_pending_seq: 0,
                    history: Vec::new(),
                }),
                player,
                cues,
                updates_tx,
            }),
        }
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<DisplayUpdate> {
        self.shared.updates_tx.subscribe()
    }

    pub async fn is_connected(&self) -> bool {
        self.shared.inner.lock().await.session.is_some()
    }

    /// Snapshot of the trailing move history, oldest first.
    pub async fn history_snapshot(&self) -> Vec<MoveEvent> {
        self.shared.inner.lock().await.history.clone()
    }

    /// Connect when disconnected, disconnect when connected.
    ///
    /// A failed connection attempt is published as `ConnectFailed` and leaves
    /// the controller disconnected; nothing is retried automatically.
    pub async fn toggle_connection(&self, mac_provider: Arc<dyn MacAddressProvider>) {
        let existing = {
            let mut inner = self.shared.inner.lock().await;
            let session = inner.session.take();
            let router_task = inner.router_task.take();
            session.map(|session| (session, router_task))
        };

        if let Some((session, router_task)) = existing {
            if let Some(task) = router_task {
                task.abort();
            }
            session.disconnect().await;
            info!(device = %session.device_name(), "cube session closed");
            self.shared.publish(DisplayUpdate::SessionClosed);
            return;
        }

        let session = match self.connector.connect(mac_provider).await {
            Ok(session) => session,
            Err(err) => {
                error!("connection attempt failed: {err:#}");
                self.shared.publish(DisplayUpdate::ConnectFailed {
                    message: err.to_string(),
                });
                return;
            }
        };

        let router_task = Shared::spawn_router(self.shared.clone(), session.clone());
        {
            let mut inner = self.shared.inner.lock().await;
            inner.session = Some(session.clone());
            inner.router_task = Some(router_task);
        }

        for command in [
            CubeCommand::RequestHardware,
            CubeCommand::RequestFacelets,
            CubeCommand::RequestBattery,
        ] {
            if let Err(err) = session.send_command(command).await {
                warn!(?command, "setup command failed: {err:#}");
            }
        }

        info!(device = %session.device_name(), mac = %session.device_mac(), "cube connected");
        self.shared.publish(DisplayUpdate::Connected {
            device_name: session.device_name(),
            device_mac: session.device_mac(),
        });
    }

    /// Ask the cube to reset to solved and clear the displayed sequence.
    /// No-op while disconnected.
    pub async fn reset_state(&self) {
        let session = self.shared.inner.lock().await.session.clone();
        let Some(session) = session else {
            return;
        };
        if let Err(err) = session.send_command(CubeCommand::RequestReset).await {
            warn!("reset command failed: {err:#}");
        }
        self.shared.player.set_state("");
    }
}

impl Shared {
    fn publish(&self, update: DisplayUpdate) {
        let _ = self.updates_tx.send(update);
    }

    fn spawn_router(shared: Arc<Shared>, session: Arc<dyn CubeSession>) -> JoinHandle<()> {
        let mut events = BroadcastStream::new(session.subscribe_events());
        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        let disconnected = matches!(event, CubeEvent::Disconnect);
                        Shared::route_event(&shared, event).await;
                        if disconnected {
                            break;
                        }
                    }
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        warn!(skipped, "event stream lagged; moves were dropped");
                    }
                }
            }
        })
    }

    async fn route_event(shared: &Arc<Self>, event: CubeEvent) {
        match event {
            CubeEvent::Move(ev) => Shared::handle_move(shared, ev).await,
            CubeEvent::Hardware(info) => {
                shared.publish(DisplayUpdate::HardwareName(info.hardware_name));
            }
            CubeEvent::Battery { level } => {
                shared.publish(DisplayUpdate::Battery(level));
            }
            CubeEvent::Disconnect => {
                let mut inner = shared.inner.lock().await;
                inner.session = None;
                inner.router_task = None;
                drop(inner);
                shared.player.set_state("");
                info!("cube reported disconnect");
                shared.publish(DisplayUpdate::Disconnected);
            }
            CubeEvent::Gyro | CubeEvent::Facelets { .. } => {}
        }
    }

    async fn handle_move(shared: &Arc<Self>, ev: MoveEvent) {
        let mut inner = shared.inner.lock().await;

        // The armed deferral is always cancelled before anything else is
        // decided, so it can never fire for a move that found a partner.
        let prior = inner.pending.take();
        if let Some(pending) = &prior {
            pending.timer.abort();
        }

        match prior {
            Some(pending) if pending.notation == "L" && ev.notation == "R'" => {
                debug!("detected L -> R' sequence, playing M'");
                shared.cues.play("M'");
            }
            Some(pending) if pending.notation == "R" && ev.notation == "L'" => {
                debug!("detected R -> L' sequence, playing M");
                shared.cues.play("M");
            }
            _ => {
                let seq = inner.next_pending_seq;
                inner.next_pending_seq += 1;
                let timer = Shared::spawn_deferred_cue(shared, ev.notation.clone(), seq);
                inner.pending = Some(PendingMove {
                    notation: ev.notation.clone(),
                    seq,
                    timer,
                });
            }
        }

        shared
            .player
            .append_move(&ev.notation, AppendOptions { cancel: false });

        inner.history.push(ev);
        if inner.history.len() > HISTORY_CAPACITY {
            let excess = inner.history.len() - HISTORY_CAPACITY;
            inner.history.drain(..excess);
        }
        if inner.history.len() > SKEW_MIN_WINDOW {
            if let Some(skew) = calc_timestamp_skew(&inner.history) {
                shared.publish(DisplayUpdate::Skew(skew));
            }
        }
    }

    /// Arm the single-slot deferral that plays the move's own cue if nothing
    /// pairs with it inside the window.
    fn spawn_deferred_cue(shared: &Arc<Self>, notation: String, seq: u64) -> JoinHandle<()> {
        let shared = shared.clone();
        tokio::spawn(async move {
            tokio::time::sleep(PAIR_WINDOW).await;
            let mut inner = shared.inner.lock().await;
            let still_armed = inner.pending.as_ref().is_some_and(|p| p.seq == seq);
            if still_armed {
                inner.pending = None;
                drop(inner);
                shared.cues.play(&notation);
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

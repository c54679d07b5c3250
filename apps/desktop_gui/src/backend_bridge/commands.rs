//! Backend commands queued from UI actions to the backend worker.

pub enum BackendCommand {
    /// Connect when disconnected, disconnect when connected. Carries the
    /// manually entered MAC address, used when automatic resolution fails.
    ToggleConnection { manual_mac: Option<String> },
    ResetState,
}

//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::ToggleConnection { .. } => "toggle_connection",
        BackendCommand::ResetState => "reset_state",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "A parancssor megtelt, próbáld újra.".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "A háttérszál leállt, indítsd újra az alkalmazást.".to_string();
        }
    }
}

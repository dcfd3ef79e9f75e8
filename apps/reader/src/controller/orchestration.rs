//! Command orchestration from UI actions and view callbacks to the backend
//! command queue.

use crossbeam_channel::{Sender, TrySendError};
use list_view::Action;

use crate::backend_bridge::commands::FeedCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Queued,
    QueueFull,
    Disconnected,
}

pub fn dispatch_feed_command(cmd_tx: &Sender<FeedCommand>, cmd: FeedCommand) -> DispatchOutcome {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            DispatchOutcome::Queued
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "feed command queue is full; dropping command");
            DispatchOutcome::QueueFull
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(
                command = cmd_name,
                "backend worker disconnected (possible startup/runtime failure)"
            );
            DispatchOutcome::Disconnected
        }
    }
}

/// View callback that queues `cmd` each time it is invoked.
pub fn command_action(cmd_tx: &Sender<FeedCommand>, cmd: FeedCommand) -> Action {
    let cmd_tx = cmd_tx.clone();
    Action::new(move || {
        dispatch_feed_command(&cmd_tx, cmd.clone());
    })
}

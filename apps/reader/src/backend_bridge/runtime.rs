//! Backend worker: owns the tokio runtime and the fetch controller, drains the
//! command queue, and forwards feed snapshots to the UI.

use std::{sync::Arc, thread};

use client_core::{FeedState, FetchController, ListingSource, RedditListingClient};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::{runtime::Handle, sync::watch};

use crate::{backend_bridge::commands::FeedCommand, config::ReaderSettings, controller::events::UiEvent};

pub fn launch(
    settings: ReaderSettings,
    cmd_rx: Receiver<FeedCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let source = match RedditListingClient::new(
            settings.base_url.clone(),
            settings.request_timeout(),
            &settings.user_agent,
        ) {
            Ok(source) => source,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                tracing::error!(base_url = %settings.base_url, "failed to build listing client: {err}");
                return;
            }
        };
        tracing::info!(base_url = %source.base_url(), "listing client ready");

        let controller = FetchController::new(Arc::new(source) as Arc<dyn ListingSource>);
        serve_commands(runtime.handle(), controller, cmd_rx, ui_tx);
    })
}

/// Blocks the calling thread until `Shutdown` arrives or every sender is
/// gone, then unmounts the controller.
pub fn serve_commands(
    handle: &Handle,
    controller: Arc<FetchController>,
    cmd_rx: Receiver<FeedCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let _runtime = handle.enter();
    let forwarder = handle.spawn(forward_snapshots(controller.subscribe(), ui_tx.clone()));
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::info!(command = cmd.name(), "backend: feed command");
        let issued = match cmd {
            FeedCommand::Submit { text } => controller.submit(&text),
            FeedCommand::LoadMore => controller.load_more(),
            FeedCommand::Retry => controller.retry(),
            FeedCommand::Shutdown => break,
        };
        if issued.is_none() {
            tracing::debug!("backend: command produced no fetch");
        }
    }

    controller.unmount();
    forwarder.abort();
    tracing::info!("backend worker stopped");
}

async fn forward_snapshots(mut updates: watch::Receiver<FeedState>, ui_tx: Sender<UiEvent>) {
    while updates.changed().await.is_ok() {
        let props = updates.borrow_and_update().props();
        if let Err(TrySendError::Disconnected(_)) = ui_tx.try_send(UiEvent::Feed(props)) {
            break;
        }
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;

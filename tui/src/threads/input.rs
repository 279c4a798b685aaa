use std::{sync::mpsc::Sender, time::Duration};

use ratatui::crossterm::event::{self, Event};
use tokio_util::sync::CancellationToken;

use crate::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Forwards key and mouse events until shutdown. Polling with a timeout
/// lets the thread notice the shutdown signal without waiting for a key.
pub fn watch_input_events(transmitter: Sender<AppEvent>, shutdown_signal: CancellationToken) {
    while !shutdown_signal.is_cancelled() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(error) => {
                tracing::error!(%error, "terminal poll failed");
                break;
            }
        }

        match event::read() {
            Ok(event @ (Event::Key(_) | Event::Mouse(_) | Event::Resize(..))) => {
                // the main thread may already be gone, input is not worth keeping
                if transmitter.send(AppEvent::Input(event)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                tracing::error!(%error, "terminal read failed");
                break;
            }
        }
    }
}

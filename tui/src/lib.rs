mod error;
pub use error::{Error, FmtError, Result};

mod app;
pub mod chart;
mod events;
pub mod pages;
mod post_handle_event;
pub mod theme;
mod threads;
mod traits;

#[cfg(test)]
mod tests;

pub use app::{App, SharedState};
pub use events::AppEvent;

use egx_utils::config::Config;

/// Opens the interactive prices page and blocks until the user quits.
pub async fn run(config: &Config) -> crate::Result<()> {
    let mut app = App::new(config)?;
    tracing::info!(base_url = %app.shared_state().base_url, "starting prices page");
    app.run().await
}

use std::io::stdout;

use ratatui::crossterm::{event::DisableMouseCapture, execute};

/// Restores the terminal before printing the panic, otherwise the message is
/// lost in the alternate screen.
pub fn set() {
    std::panic::set_hook(Box::new(|info| {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        let msg = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            info.to_string()
        };

        if let Some(loc) = info.location() {
            tracing::error!(%msg, file = loc.file(), line = loc.line(), "panic");
            eprintln!("Panic: {msg:?} at {}:{}", loc.file(), loc.line());
        } else {
            tracing::error!(%msg, "panic");
            eprintln!("Panic: {msg:?}");
        }

        eprintln!("This is a bug! The log file may have more details.");
    }));
}

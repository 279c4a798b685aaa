use egx_ratatui_extra::act::Act;

/// Actions that the App should take after handling an event. This
/// is passed to all the components and they can modify it to indicate
/// what actions the App should take after the event is handled.
#[derive(Default, Debug)]
pub struct PostHandleEventActions {
    /// Enable if current page wants to handle the [ESC] key.
    ignore_esc: bool,
    /// Error
    error: Option<crate::Error>,
}

impl Act for PostHandleEventActions {
    fn ignore_esc(&mut self) {
        self.ignore_esc = true;
    }

    fn is_esc_ignored(&self) -> bool {
        self.ignore_esc
    }
}

impl PostHandleEventActions {
    /// Sets an error to be displayed by the App.
    pub fn set_error(&mut self, error: crate::Error) {
        self.error = Some(error);
    }

    pub fn take_error(&mut self) -> Option<crate::Error> {
        self.error.take()
    }
}

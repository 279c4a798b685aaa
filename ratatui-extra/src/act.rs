/// Lets a widget tell its owner what should happen after an event was handled.
pub trait Act: Default {
    fn ignore_esc(&mut self);

    fn is_esc_ignored(&self) -> bool;
}

use ratatui::{style::Style, widgets::BorderType};

pub trait Thematize {
    fn popup(&self) -> Self;

    fn error_popup(&self) -> Self;

    fn style(&self) -> Style;

    fn style_dim(&self) -> Style;

    fn border_type(&self) -> BorderType;

    fn button_focused(&self) -> Style;

    fn button_notfocused(&self) -> Style;

    fn cursor(&self) -> Style;

    fn boxed(&self) -> bool;
}

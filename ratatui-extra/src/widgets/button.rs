use crate::extensions::{BorderedWidget, KeyEventExt, MouseEventExt, RectExt};
use crate::thematize::Thematize;
use ratatui::{
    buffer::Buffer,
    crossterm::event::{Event, KeyCode},
    layout::Rect,
    text::Line,
    widgets::{Block, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    label: &'static str,
}

impl Button {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Calls `on_press` for Enter while focused, or for a left click inside the button.
    pub fn handle_event<E, F>(
        &self,
        event: Option<&Event>,
        area: Rect,
        focused: bool,
        on_press: F,
    ) -> Result<bool, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        let pressed = match event {
            Some(Event::Key(key_event)) => focused && key_event.is_pressed(KeyCode::Enter),
            Some(Event::Mouse(mouse_event)) => {
                mouse_event.is_left_click() && self.area(area).contains(mouse_event.position())
            }
            _ => false,
        };

        if pressed {
            on_press()?;
        }
        Ok(pressed)
    }

    pub fn area(&self, area: Rect) -> Rect {
        Rect {
            width: (self.label.chars().count() as u16 + 4).min(area.width),
            height: 3.min(area.height),
            x: area.x,
            y: area.y,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, focus: bool, theme: &impl Thematize) {
        let button_area = self.area(area);

        if theme.boxed() {
            Line::from(self.label).render_with_block(
                button_area,
                buf,
                Block::bordered()
                    .border_type(theme.border_type())
                    .style(if focus {
                        theme.button_focused()
                    } else {
                        theme.button_notfocused()
                    }),
            );
        } else {
            Block::default()
                .style(if focus {
                    theme.button_focused()
                } else {
                    theme.button_notfocused()
                })
                .render(button_area, buf);

            Line::from(self.label).render(button_area.block_inner().margin_left(1), buf);
        }
    }
}

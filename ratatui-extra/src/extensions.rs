use ratatui::{
    buffer::Buffer,
    crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    layout::{Position, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Widget},
};

use crate::thematize::Thematize;

pub trait ThemedWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &impl Thematize);
}

pub trait RenderTextWrapped {
    fn render_wrapped(&self, area: Rect, buf: &mut Buffer);
}

pub(crate) fn render_wrapped_lines(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let mut wrapped = Text::default();
    for line in text_wrap(text, area.width) {
        wrapped.push_line(Line::raw(line).style(style));
    }
    wrapped.render(area, buf);
}

/// Wraps every paragraph of `text` on word boundaries to `width` columns.
pub fn text_wrap(text: &str, width: u16) -> Vec<String> {
    let width = (width as usize).max(1);
    text.lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.into_owned())
                    .collect()
            }
        })
        .collect()
}

impl RenderTextWrapped for &str {
    fn render_wrapped(&self, area: Rect, buf: &mut Buffer) {
        render_wrapped_lines(self, Style::default(), area, buf);
    }
}

pub trait BorderedWidget {
    fn render_with_block(&self, area: Rect, buf: &mut Buffer, block: Block<'_>);
}

impl BorderedWidget for Line<'_> {
    fn render_with_block(&self, area: Rect, buf: &mut Buffer, block: Block<'_>) {
        let inner_area = block.inner(area);
        block.render(area, buf);
        self.clone().render(inner_area, buf);
    }
}

pub trait RectExt {
    fn change_height(self, new_height: u16) -> Rect;

    fn margin_h(self, m: u16) -> Rect;

    fn margin_top(self, m: u16) -> Rect;

    fn margin_left(self, m: u16) -> Rect;

    fn block_inner(self) -> Rect;

    /// Removes `h` rows from the top, `None` once nothing is left.
    fn consume_height(self, h: u16) -> Option<Rect>;

    /// A rect of at most `width`x`height` centered inside `self`.
    fn centered(self, width: u16, height: u16) -> Rect;
}

impl RectExt for Rect {
    #[track_caller]
    fn change_height(self, new_height: u16) -> Rect {
        Rect {
            height: new_height,
            ..self
        }
    }

    #[track_caller]
    fn margin_h(self, x: u16) -> Rect {
        Rect {
            x: self.x + x,
            y: self.y,
            width: self.width.saturating_sub(2 * x),
            height: self.height,
        }
    }

    #[track_caller]
    fn margin_top(self, m: u16) -> Rect {
        Rect {
            x: self.x,
            y: self.y + m,
            width: self.width,
            height: self.height.saturating_sub(m),
        }
    }

    #[track_caller]
    fn margin_left(self, m: u16) -> Rect {
        Rect {
            x: self.x + m,
            y: self.y,
            width: self.width.saturating_sub(m),
            height: self.height,
        }
    }

    #[track_caller]
    fn block_inner(self) -> Rect {
        Rect {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }

    fn consume_height(self, h: u16) -> Option<Rect> {
        if self.height <= h {
            None
        } else {
            Some(self.margin_top(h))
        }
    }

    fn centered(self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }
}

pub trait EventExt {
    fn key_event(&self) -> Option<&KeyEvent>;

    fn is_key_pressed(&self, key: KeyCode) -> bool;

    fn key_code(&self) -> Option<KeyCode>;
}

impl EventExt for Event {
    fn key_event(&self) -> Option<&KeyEvent> {
        if let Event::Key(key_event) = self {
            Some(key_event)
        } else {
            None
        }
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_event()
            .is_some_and(|ke| ke.kind == KeyEventKind::Press && ke.code == key)
    }

    fn key_code(&self) -> Option<KeyCode> {
        self.key_event().map(|ke| ke.code)
    }
}

impl EventExt for Option<&Event> {
    fn key_event(&self) -> Option<&KeyEvent> {
        self.and_then(|event| event.key_event())
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.map(|event| event.is_key_pressed(key)).unwrap_or(false)
    }

    fn key_code(&self) -> Option<KeyCode> {
        self.and_then(|event| event.key_code())
    }
}

pub trait KeyEventExt {
    fn is_pressed(&self, key: KeyCode) -> bool;
}

impl KeyEventExt for Option<&KeyEvent> {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.map(|key_event| key_event.is_pressed(key))
            .unwrap_or(false)
    }
}

impl KeyEventExt for &KeyEvent {
    fn is_pressed(&self, key: KeyCode) -> bool {
        matches!(
            self,
            KeyEvent {
                kind: KeyEventKind::Press,
                code,
                modifiers: KeyModifiers::NONE,
                ..
            } if *code == key
        )
    }
}

pub trait MouseEventExt {
    fn is_left_click(&self) -> bool;

    fn position(&self) -> Position;
}

impl MouseEventExt for MouseEvent {
    #[inline]
    fn is_left_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }

    #[inline]
    fn position(&self) -> Position {
        Position {
            x: self.column,
            y: self.row,
        }
    }
}

use ratatui::{
    buffer::Buffer,
    crossterm::event::{Event, KeyCode, KeyModifiers},
    layout::{Position, Rect},
    text::Span,
    widgets::{Block, Widget},
};

use crate::{
    extensions::{MouseEventExt, RectExt},
    thematize::Thematize,
};

/// Byte offset of the char at `cursor`, or the end of the string.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn char_at(text: &str, cursor: usize) -> char {
    text.chars().nth(cursor).unwrap_or(' ')
}

fn option_delete(text_input: &mut String, text_cursor: &mut usize) {
    loop {
        if *text_cursor == 0 {
            break;
        }
        text_input.remove(byte_index(text_input, *text_cursor - 1));
        *text_cursor -= 1;
        if *text_cursor == 0 {
            break;
        }
        if char_at(text_input, *text_cursor - 1) == ' ' {
            break;
        }
    }
}

fn option_left(text_input: &str, text_cursor: &mut usize) {
    loop {
        if *text_cursor == 0 {
            break;
        }
        *text_cursor -= 1;
        if char_at(text_input, *text_cursor) == ' ' {
            break;
        }
    }
}

fn option_right(text_input: &str, text_cursor: &mut usize) {
    let len = text_input.chars().count();
    loop {
        if *text_cursor >= len {
            break;
        }
        *text_cursor += 1;
        if char_at(text_input, *text_cursor) == ' ' {
            break;
        }
    }
}

/// First char shown when the text is wider than the box.
fn scroll_start(text_cursor: usize, width: usize) -> usize {
    if width == 0 {
        text_cursor
    } else {
        (text_cursor + 1).saturating_sub(width)
    }
}

/// Single line text input. The caller owns the text and the cursor,
/// the cursor counts chars, not bytes.
pub struct InputBox<'a> {
    pub focus: bool,
    pub label: &'static str,
    pub text: &'a str,
    pub empty_text: Option<&'static str>,
}

impl InputBox<'_> {
    pub const HEIGHT: u16 = 3;

    fn text_area(area: Rect) -> Rect {
        area.change_height(Self::HEIGHT.min(area.height))
            .block_inner()
            .margin_h(1)
    }

    /// Returns true when the event was consumed by the input.
    pub fn handle_event(
        input_event: Option<&Event>,
        area: Rect,
        text_input: &mut String,
        text_cursor: &mut usize,
    ) -> bool {
        let len = text_input.chars().count();
        *text_cursor = (*text_cursor).min(len);

        if let Some(input_event) = input_event {
            match input_event {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Left => {
                        if key_event.modifiers == KeyModifiers::ALT {
                            option_left(text_input, text_cursor);
                        } else if *text_cursor > 0 {
                            *text_cursor -= 1
                        }
                        return true;
                    }
                    KeyCode::Right => {
                        if key_event.modifiers == KeyModifiers::ALT {
                            option_right(text_input, text_cursor);
                        } else if *text_cursor < len {
                            *text_cursor += 1
                        }
                        return true;
                    }
                    KeyCode::Home => {
                        *text_cursor = 0;
                        return true;
                    }
                    KeyCode::End => {
                        *text_cursor = len;
                        return true;
                    }
                    KeyCode::Char(char) => {
                        if char == 'u' && key_event.modifiers == KeyModifiers::CONTROL {
                            *text_input = text_input.split_off(byte_index(text_input, *text_cursor));
                            *text_cursor = 0;
                        } else if char == 'a' && key_event.modifiers == KeyModifiers::CONTROL {
                            *text_cursor = 0;
                        } else if char == 'e' && key_event.modifiers == KeyModifiers::CONTROL {
                            *text_cursor = len;
                        } else if char == 'w' && key_event.modifiers == KeyModifiers::CONTROL {
                            option_delete(text_input, text_cursor);
                        } else if char == 'b' && key_event.modifiers == KeyModifiers::ALT {
                            option_left(text_input, text_cursor);
                        } else if char == 'f' && key_event.modifiers == KeyModifiers::ALT {
                            option_right(text_input, text_cursor);
                        } else if key_event.modifiers == KeyModifiers::NONE
                            || key_event.modifiers == KeyModifiers::SHIFT
                        {
                            text_input.insert(byte_index(text_input, *text_cursor), char);
                            *text_cursor += 1;
                        } else {
                            return false;
                        }
                        return true;
                    }
                    KeyCode::Backspace => {
                        if key_event.modifiers == KeyModifiers::ALT {
                            option_delete(text_input, text_cursor);
                        } else if *text_cursor > 0 {
                            *text_cursor -= 1;
                            text_input.remove(byte_index(text_input, *text_cursor));
                        }
                        return true;
                    }
                    KeyCode::Delete => {
                        if *text_cursor < len {
                            text_input.remove(byte_index(text_input, *text_cursor));
                        }
                        return true;
                    }
                    _ => {}
                },
                Event::Mouse(mouse_event) => {
                    let text_area = Self::text_area(area);
                    if mouse_event.is_left_click() && text_area.contains(mouse_event.position()) {
                        let start = scroll_start(*text_cursor, text_area.width as usize);
                        let relative_x = mouse_event.column.saturating_sub(text_area.x) as usize;
                        *text_cursor = (start + relative_x).min(len);
                        return true;
                    }
                }
                _ => {}
            }
        }

        false
    }

    pub fn render(self, area: Rect, buf: &mut Buffer, text_cursor: &usize, theme: &impl Thematize) {
        let area_used = area.change_height(Self::HEIGHT.min(area.height));
        let text_area = Self::text_area(area);

        if theme.boxed() {
            Block::bordered()
                .border_type(theme.border_type())
                .title(self.label)
                .render(area_used, buf);
        } else {
            Span::raw(self.label)
                .style(theme.style_dim())
                .render(area_used, buf);
            Span::raw(">")
                .style(theme.style())
                .render(area_used.margin_top(1), buf);
        }

        let width = text_area.width as usize;
        let text_cursor = (*text_cursor).min(self.text.chars().count());
        let start = scroll_start(text_cursor, width);
        let visible: String = self.text.chars().skip(start).take(width).collect();
        Span::raw(visible).render(text_area, buf);

        if self.text.is_empty() {
            if let Some(empty_text) = self.empty_text {
                Span::raw(empty_text)
                    .style(theme.style_dim())
                    .render(text_area, buf);
            }
        }

        if self.focus && width > 0 {
            let cx = text_area.x + (text_cursor - start) as u16;
            let Some(cell) = buf.cell_mut(Position::new(cx, text_area.y)) else {
                return;
            };

            if cell.symbol().is_empty() {
                cell.set_symbol(" ");
            }

            let cur_style = cell.style();
            cell.set_style(cur_style.patch(theme.cursor()));
        }
    }
}

use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind},
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use crate::extensions::{text_wrap, RectExt};

use super::scroll_bar::ScrollBar;

/// Read-only text view that wraps lines and scrolls vertically.
#[derive(Debug, Default)]
pub struct TextScroll {
    pub text: String,
    pub scroll_offset: usize,
}

impl TextScroll {
    pub fn new(text: String) -> Self {
        Self {
            text,
            scroll_offset: 0,
        }
    }

    pub fn set_text(&mut self, text: String, scroll_to_top: bool) {
        self.text = text;
        if scroll_to_top {
            self.scroll_offset = 0;
        }
    }

    fn lines(&self, width: usize) -> Vec<String> {
        text_wrap(&self.text, width as u16)
    }

    pub fn lines_count(&self, width: usize) -> usize {
        self.lines(width).len()
    }

    fn max_offset(&self, area: Rect) -> usize {
        let text_area = Self::text_area(area);
        self.lines_count(text_area.width as usize)
            .saturating_sub(text_area.height as usize)
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(by);
    }

    pub fn scroll_down(&mut self, by: usize, area: Rect) {
        self.scroll_offset = (self.scroll_offset + by).min(self.max_offset(area));
    }

    pub fn get_visible_text(&self, area: Rect) -> (Vec<String>, usize) {
        let lines = self.lines(area.width as usize);
        let total = lines.len();
        (
            lines
                .into_iter()
                .skip(self.scroll_offset)
                .take(area.height as usize)
                .map(|line| line.trim_end().to_string())
                .collect(),
            total,
        )
    }

    /// Up/Down move one line, PageUp/PageDown one screen.
    pub fn handle_event(&mut self, key_event: Option<&KeyEvent>, area: Rect) -> bool {
        let Some(key_event) = key_event else {
            return false;
        };
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        let page = (area.height as usize).max(1);
        match key_event.code {
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1, area),
            KeyCode::PageUp => self.scroll_up(page),
            KeyCode::PageDown => self.scroll_down(page, area),
            _ => return false,
        }
        true
    }

    fn text_area(area: Rect) -> Rect {
        let [text_area, _] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        text_area
    }
}

impl Widget for &TextScroll {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [mut text_area, scroll_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        let (lines, total) = self.get_visible_text(text_area);
        for line in &lines {
            line.as_str().render(text_area, buf);
            let Some(text_area_new) = text_area.consume_height(1) else {
                break;
            };
            text_area = text_area_new;
        }

        if total > area.height as usize {
            ScrollBar {
                offset: self.scroll_offset,
                max_offset: total - area.height as usize,
                total_lines: total,
            }
            .render(scroll_area, buf);
        }
    }
}

use egx_ratatui_extra::{extensions::RectExt, thematize::Thematize};
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use crate::theme::Theme;

pub struct Footer<'a> {
    pub exit: &'a bool,
    pub popup_open: &'a bool,
}

impl Footer<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        buf.set_style(area, theme.style_dim());
        let footer_text = if *self.exit {
            "exiting please wait..."
        } else if *self.popup_open {
            "[ESC] or [ENTER] to close"
        } else {
            "[TAB] focus | [ENTER] fetch | [PGUP]/[PGDN] scroll preview | control c or [ESC] to quit"
        };
        Line::from(footer_text)
            .style(theme.style_dim())
            .render(area.margin_h(1), buf);
    }
}

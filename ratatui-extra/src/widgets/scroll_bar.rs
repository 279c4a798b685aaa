use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

const TRACK: &str = "║";
const THUMB: &str = "█";

/// One column wide scroll indicator for content taller than its area.
pub struct ScrollBar {
    pub offset: usize,
    pub max_offset: usize,
    pub total_lines: usize,
}

impl Widget for ScrollBar {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let height = area.height as usize;
        if height == 0 || area.width == 0 {
            return;
        }

        let (start, len) = thumb(self.offset, self.max_offset, self.total_lines, height);
        for y in 0..height {
            let symbol = if (start..start + len).contains(&y) {
                THUMB
            } else {
                TRACK
            };
            buf.set_string(area.x, area.y + y as u16, symbol, Style::default());
        }
    }
}

/// Start row and length of the thumb. The thumb is never empty and always
/// fits in `height`, it touches the bottom once `offset` reaches `max_offset`.
fn thumb(offset: usize, max_offset: usize, total_lines: usize, height: usize) -> (usize, usize) {
    let len = (height * height / total_lines.max(1)).clamp(1, height);
    let free = height - len;
    let start = if max_offset == 0 {
        0
    } else {
        offset.min(max_offset) * free / max_offset
    };
    (start, len)
}

use std::sync::mpsc;

use egx_ratatui_extra::{extensions::RectExt, thematize::Thematize};
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};
use tokio_util::sync::CancellationToken;

use crate::{
    app::SharedState, post_handle_event::PostHandleEventActions, traits::Component, AppEvent,
};

pub struct Title;

impl Component for Title {
    fn handle_event(
        &mut self,
        _event: &AppEvent,
        _area: Rect,
        _popup_area: Rect,
        _transmitter: &mpsc::Sender<AppEvent>,
        _shutdown_signal: &CancellationToken,
        _shared_state: &SharedState,
    ) -> crate::Result<PostHandleEventActions> {
        Ok(PostHandleEventActions::default())
    }

    fn render_component(
        &self,
        area: Rect,
        _popup_area: Rect,
        buf: &mut Buffer,
        shared_state: &SharedState,
    ) -> Rect
    where
        Self: Sized,
    {
        buf.set_style(area, shared_state.theme.style_dim());
        let area = area.margin_h(1);

        Line::from("egx prices")
            .style(shared_state.theme.style())
            .render(area, buf);

        let display = if shared_state.online == Some(false) {
            "offline".to_string()
        } else {
            shared_state.base_url.to_string()
        };

        Line::from(display)
            .style(shared_state.theme.style())
            .right_aligned()
            .render(area, buf);

        area
    }
}

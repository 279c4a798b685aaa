use std::sync::mpsc;

use egx_ratatui_extra::thematize::Thematize;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};
use tokio_util::sync::CancellationToken;

use crate::{app::SharedState, post_handle_event::PostHandleEventActions, AppEvent};

pub trait Component {
    /// Waits for background work started by the component, called once the
    /// shutdown signal has been cancelled.
    #[allow(async_fn_in_trait)]
    async fn exit_threads(&mut self) {}

    /// Handles an event and returns any actions to be performed.
    /// This cannot be async to prevent TUI render from blocking.
    fn handle_event(
        &mut self,
        event: &AppEvent,
        area: Rect,
        popup_area: Rect,
        transmitter: &mpsc::Sender<AppEvent>,
        shutdown_signal: &CancellationToken,
        shared_state: &SharedState,
    ) -> crate::Result<PostHandleEventActions>;

    /// Renders the component into the given area and returns the area that was
    /// actually used.
    fn render_component(
        &self,
        area: Rect,
        popup_area: Rect,
        buf: &mut Buffer,
        shared_state: &SharedState,
    ) -> Rect
    where
        Self: Sized;

    fn render_component_with_block(
        &self,
        area: Rect,
        popup_area: Rect,
        buf: &mut Buffer,
        block: Block<'_>,
        shared_state: &SharedState,
    ) -> Rect
    where
        Self: Sized,
    {
        let inner_area = block.inner(area);
        block
            .style(shared_state.theme.style())
            .border_type(shared_state.theme.border_type())
            .render(area, buf);
        self.render_component(inner_area, popup_area, buf, shared_state);
        area
    }
}

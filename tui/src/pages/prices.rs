use std::sync::mpsc;

use egx_ratatui_extra::{
    button::Button,
    candle_chart::{ChartOptions, ChartSurface},
    extensions::{EventExt, MouseEventExt, RectExt, ThemedWidget},
    input_box::InputBox,
    popup::PopupWidget,
    text_popup::TextPopup,
    text_scroll::TextScroll,
    thematize::Thematize,
};
use egx_utils::{
    prices::{preview_json, PriceRow, PricesClient, PricesResponse, SeriesMeta, PREVIEW_LIMIT},
    shutdown::handle_abort,
};
use ratatui::{
    buffer::Buffer,
    crossterm::event::{Event, KeyCode},
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Widget},
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    app::SharedState, chart::ChartRenderer, post_handle_event::PostHandleEventActions,
    traits::Component, AppEvent,
};

pub const FETCH_FAILED_MESSAGE: &str = "Error fetching data. Ensure the backend is running.";

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Whether a result tagged `incoming` belongs to the request still awaited.
pub fn should_apply_fetch_result(pending: Option<u64>, incoming: u64) -> bool {
    pending == Some(incoming)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Symbol,
    FetchButton,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Symbol => Focus::FetchButton,
            Focus::FetchButton => Focus::Symbol,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
    Failed,
}

struct Areas {
    input_area: Rect,
    button_area: Rect,
    status_area: Rect,
    chart_area: Rect,
    preview_area: Rect,
}

/// Symbol box, fetch button, candlestick chart and a JSON preview of the
/// first rows of the current series.
#[derive(Debug)]
pub struct PricesPage {
    focus: Focus,
    symbol: String,
    cursor: usize,
    button: Button,

    client: PricesClient,
    series: Vec<PriceRow>,
    meta: Option<SeriesMeta>,

    next_request_id: u64,
    pending_request_id: Option<u64>,
    fetch_tasks: Vec<JoinHandle<()>>,
    spinner: usize,

    chart: ChartRenderer,
    preview: TextScroll,
    alert: TextPopup,
    alerts_shown: usize,
}

impl PricesPage {
    pub fn new(
        client: PricesClient,
        symbol: String,
        surface: ChartSurface,
        options: ChartOptions,
    ) -> crate::Result<Self> {
        let mut chart = ChartRenderer::new(surface, options);
        chart.set_series(None)?;

        Ok(Self {
            focus: Focus::default(),
            cursor: symbol.chars().count(),
            symbol,
            button: Button::new("Fetch"),

            client,
            series: Vec::new(),
            meta: None,

            next_request_id: 0,
            pending_request_id: None,
            fetch_tasks: Vec::new(),
            spinner: 0,

            chart,
            preview: TextScroll::new(preview_json(&[])?),
            alert: TextPopup::default()
                .with_title("Error")
                .with_note("Press Esc or Enter to close"),
            alerts_shown: 0,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
        self.cursor = self.symbol.chars().count();
    }

    pub fn series(&self) -> &[PriceRow] {
        &self.series
    }

    pub fn meta(&self) -> Option<&SeriesMeta> {
        self.meta.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    #[cfg(test)]
    pub(crate) fn chart_mut(&mut self) -> &mut ChartRenderer {
        &mut self.chart
    }

    pub fn preview_text(&self) -> &str {
        &self.preview.text
    }

    pub fn preview_scroll(&self) -> usize {
        self.preview.scroll_offset
    }

    pub fn alert(&self) -> &TextPopup {
        &self.alert
    }

    /// Number of times the fetch failure alert was raised.
    pub fn alerts_shown(&self) -> usize {
        self.alerts_shown
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request_id.is_some()
    }

    pub fn pending_request_id(&self) -> Option<u64> {
        self.pending_request_id
    }

    /// Starts a request for the current symbol and returns its id. Only the
    /// result of the most recent request is applied.
    pub fn fetch_data(
        &mut self,
        transmitter: &mpsc::Sender<AppEvent>,
        shutdown_signal: &CancellationToken,
    ) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.pending_request_id = Some(request_id);

        let symbol = self.symbol.clone();
        tracing::info!(request_id, %symbol, url = %self.client.prices_url(&symbol), "fetching prices");

        let client = self.client.clone();
        let tr = transmitter.clone();
        let shutdown_signal = shutdown_signal.clone();

        self.fetch_tasks.retain(|task| !task.is_finished());
        self.fetch_tasks.push(tokio::spawn(async move {
            let result = handle_abort(&shutdown_signal, || client.fetch_prices(&symbol))
                .await
                .and_then(|result| result);

            let event = match result {
                Ok(response) => AppEvent::PricesUpdate {
                    request_id,
                    symbol,
                    response,
                },
                Err(egx_utils::Error::AbortDueToShutdown) => return,
                Err(error) => AppEvent::PricesUpdateError {
                    request_id,
                    symbol,
                    error,
                },
            };
            if tr.send(event).is_err() {
                tracing::debug!(request_id, "app loop is gone, dropping fetch result");
            }
        }));

        request_id
    }

    pub fn apply_prices(
        &mut self,
        request_id: u64,
        symbol: &str,
        response: PricesResponse,
    ) -> crate::Result<FetchOutcome> {
        if !should_apply_fetch_result(self.pending_request_id, request_id) {
            tracing::debug!(request_id, symbol, "discarding stale prices");
            return Ok(FetchOutcome::Stale);
        }
        self.pending_request_id = None;

        let (meta, series) = response.into_parts();
        tracing::info!(request_id, symbol, rows = series.len(), "prices received");

        let preview = preview_json(&series)?;
        self.chart.set_series(Some(&series))?;
        self.preview.set_text(preview, true);
        self.series = series;
        self.meta = Some(meta);

        Ok(FetchOutcome::Applied)
    }

    /// The series is kept as it was, only the alert is raised.
    pub fn apply_error(
        &mut self,
        request_id: u64,
        symbol: &str,
        error: &egx_utils::Error,
    ) -> FetchOutcome {
        if !should_apply_fetch_result(self.pending_request_id, request_id) {
            tracing::debug!(request_id, symbol, "discarding stale fetch error");
            return FetchOutcome::Stale;
        }
        self.pending_request_id = None;

        tracing::error!(
            request_id,
            symbol,
            status = ?error.status(),
            %error,
            "error fetching prices"
        );
        self.alert.set_text(FETCH_FAILED_MESSAGE.to_string(), true);
        self.alerts_shown += 1;

        FetchOutcome::Failed
    }

    fn status_line(&self) -> String {
        if self.is_loading() {
            return format!(
                "{} loading {}",
                SPINNER[self.spinner % SPINNER.len()],
                self.symbol
            );
        }

        match &self.meta {
            Some(meta) => meta.summary(),
            None => "no data".to_string(),
        }
    }

    fn get_areas(&self, area: Rect) -> Areas {
        let [top_area, status_area, body_area] = Layout::vertical([
            Constraint::Length(InputBox::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let [input_area, button_area] = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(self.button.area(top_area).width + 1),
        ])
        .areas(top_area);

        let [chart_area, preview_area] = Layout::horizontal([
            Constraint::Max(self.chart_width() + 2),
            Constraint::Min(24),
        ])
        .areas(body_area);

        Areas {
            input_area,
            button_area: Rect {
                x: button_area.x + 1,
                width: button_area.width.saturating_sub(1),
                ..button_area
            },
            status_area,
            chart_area,
            preview_area,
        }
    }

    fn chart_width(&self) -> u16 {
        self.chart.chart().map(|c| c.options().width).unwrap_or(0)
    }
}

impl Component for PricesPage {
    async fn exit_threads(&mut self) {
        for task in self.fetch_tasks.drain(..) {
            if let Err(error) = task.await {
                tracing::debug!(%error, "fetch task did not finish cleanly");
            }
        }
    }

    fn handle_event(
        &mut self,
        event: &AppEvent,
        area: Rect,
        popup_area: Rect,
        transmitter: &mpsc::Sender<AppEvent>,
        shutdown_signal: &CancellationToken,
        _shared_state: &SharedState,
    ) -> crate::Result<PostHandleEventActions> {
        let mut handle_result = PostHandleEventActions::default();
        let areas = self.get_areas(area);

        match event {
            AppEvent::PricesUpdate {
                request_id,
                symbol,
                response,
            } => {
                if let Err(error) = self.apply_prices(*request_id, symbol, response.clone()) {
                    handle_result.set_error(error);
                }
            }
            AppEvent::PricesUpdateError {
                request_id,
                symbol,
                error,
            } => {
                self.apply_error(*request_id, symbol, error);
            }
            AppEvent::Tick => {
                if self.is_loading() {
                    self.spinner = self.spinner.wrapping_add(1);
                }
            }
            AppEvent::Input(input) => {
                if self.alert.is_open() {
                    self.alert
                        .handle_event(Some(input), popup_area, &mut handle_result);
                    return Ok(handle_result);
                }

                match input.key_code() {
                    Some(KeyCode::Tab) | Some(KeyCode::BackTab) => {
                        self.focus = self.focus.toggle();
                        return Ok(handle_result);
                    }
                    Some(KeyCode::PageUp) | Some(KeyCode::PageDown) => {
                        self.preview
                            .handle_event(input.key_event(), areas.preview_area.block_inner());
                        return Ok(handle_result);
                    }
                    _ => {}
                }

                if let Event::Mouse(mouse_event) = input {
                    if mouse_event.is_left_click() {
                        if areas.input_area.contains(mouse_event.position()) {
                            self.focus = Focus::Symbol;
                        } else if self.button.area(areas.button_area).contains(mouse_event.position()) {
                            self.focus = Focus::FetchButton;
                        }
                    }
                }

                let button = self.button;
                let pressed = button.handle_event(
                    Some(input),
                    areas.button_area,
                    self.focus == Focus::FetchButton,
                    || {
                        self.fetch_data(transmitter, shutdown_signal);
                        Ok::<(), crate::Error>(())
                    },
                )?;

                if !pressed && self.focus == Focus::Symbol {
                    if input.is_key_pressed(KeyCode::Enter) {
                        self.fetch_data(transmitter, shutdown_signal);
                    } else {
                        InputBox::handle_event(
                            Some(input),
                            areas.input_area,
                            &mut self.symbol,
                            &mut self.cursor,
                        );
                    }
                }
            }
        }

        Ok(handle_result)
    }

    fn render_component(
        &self,
        area: Rect,
        popup_area: Rect,
        buf: &mut Buffer,
        shared_state: &SharedState,
    ) -> Rect
    where
        Self: Sized,
    {
        let theme = &shared_state.theme;
        let areas = self.get_areas(area);

        InputBox {
            focus: self.focus == Focus::Symbol && !self.alert.is_open(),
            label: "Symbol",
            text: &self.symbol,
            empty_text: Some("e.g. CIB"),
        }
        .render(areas.input_area, buf, &self.cursor, theme);

        self.button.render(
            areas.button_area,
            buf,
            self.focus == Focus::FetchButton && !self.alert.is_open(),
            theme,
        );

        Line::from(self.status_line())
            .style(theme.style_dim())
            .render(areas.status_area, buf);

        let chart_block = Block::bordered()
            .title("Chart")
            .border_type(theme.border_type());
        let chart_inner = chart_block.inner(areas.chart_area);
        chart_block.render(areas.chart_area, buf);
        self.chart.render(chart_inner, buf);

        let preview_block = Block::bordered()
            .title(format!("Preview (first {PREVIEW_LIMIT} rows)"))
            .border_type(theme.border_type());
        let preview_inner = preview_block.inner(areas.preview_area);
        preview_block.render(areas.preview_area, buf);
        (&self.preview).render(preview_inner, buf);

        self.alert.render(popup_area, buf, &theme.error_popup());

        area
    }
}

use std::{io, str::FromStr, sync::mpsc};

use egx_ratatui_extra::{
    act::Act,
    candle_chart::{ChartOptions, ChartSurface},
    extensions::{RectExt, ThemedWidget},
    popup::PopupWidget,
    text_popup::TextPopup,
    thematize::Thematize,
};
use egx_utils::{config::Config, prices::PricesClient};
use ratatui::{
    buffer::Buffer,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
        execute,
    },
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Widget},
    DefaultTerminal,
};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    error::FmtError,
    events::AppEvent,
    pages::{footer::Footer, prices::PricesPage, title::Title},
    post_handle_event::PostHandleEventActions,
    theme::{Theme, ThemeName},
    threads,
    traits::Component,
};

pub struct SharedState {
    pub theme: Theme,
    pub base_url: Url,
    /// `Some(false)` once the backend refused a connection, until the next success.
    pub online: Option<bool>,
}

pub struct App {
    exit: bool,
    page: PricesPage,
    shared_state: SharedState,

    fatal_error_popup: TextPopup,

    input_thread: Option<std::thread::JoinHandle<()>>,
    tick_thread: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(config: &Config) -> crate::Result<Self> {
        let base_url = config.get_base_url()?;
        let theme = Theme::new(ThemeName::from_str(config.get_theme_name())?);

        let page = PricesPage::new(
            PricesClient::new(base_url.clone()),
            config.default_symbol.clone(),
            ChartSurface::new(),
            ChartOptions {
                width: config.chart_width,
                height: config.chart_height,
            },
        )?;

        Ok(Self {
            exit: false,
            page,
            shared_state: SharedState {
                theme,
                base_url,
                online: None,
            },

            fatal_error_popup: TextPopup::default()
                .with_title("Fatal Error")
                .with_note("Press Esc to close"),

            input_thread: None,
            tick_thread: None,
        })
    }

    pub fn page(&self) -> &PricesPage {
        &self.page
    }

    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    pub fn is_exiting(&self) -> bool {
        self.exit
    }

    pub async fn run(&mut self) -> crate::Result<()> {
        let (event_tr, event_rc) = mpsc::channel::<AppEvent>();
        let shutdown = CancellationToken::new();
        let mut terminal = ratatui::init();
        let _ = execute!(io::stdout(), EnableMouseCapture);

        self.init_threads(&event_tr, &shutdown);

        let result = self
            .run_loop(&mut terminal, &event_tr, &event_rc, &shutdown)
            .await;

        // signal all the threads to exit
        shutdown.cancel();
        let exit_result = self.exit_threads().await;

        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();

        result.and(exit_result)
    }

    async fn run_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_tr: &mpsc::Sender<AppEvent>,
        event_rc: &mpsc::Receiver<AppEvent>,
        shutdown: &CancellationToken,
    ) -> crate::Result<()> {
        self.draw(terminal).map_err(crate::Error::Draw)?;

        // the page loads the configured symbol as soon as it is shown
        self.page.fetch_data(event_tr, shutdown);

        while !self.exit {
            let area = self.draw(terminal).map_err(crate::Error::Draw)?;

            let event = event_rc.recv()?;
            self.handle_event(event, area, event_tr, shutdown)
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "unexpected error in the ui loop");
                    self.fatal_error_popup.set_text(e.fmt_err("App"), true);
                });
        }

        // final render before exiting
        self.draw(terminal).map_err(crate::Error::Draw)?;

        Ok(())
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> io::Result<Rect> {
        let completed_frame = terminal.draw(|frame| {
            frame.render_widget(self, frame.area());
        })?;
        Ok(completed_frame.area)
    }

    fn init_threads(&mut self, tr: &mpsc::Sender<AppEvent>, sd: &CancellationToken) {
        let tr_input = tr.clone();
        let shutdown_signal = sd.clone();
        self.input_thread = Some(std::thread::spawn(move || {
            threads::input::watch_input_events(tr_input, shutdown_signal);
        }));

        let tr_tick = tr.clone();
        let shutdown_signal = sd.clone();
        self.tick_thread = Some(tokio::spawn(async move {
            threads::tick::start_ticking(tr_tick, shutdown_signal).await;
        }));
    }

    pub async fn exit_threads(&mut self) -> crate::Result<()> {
        if let Some(thread) = self.tick_thread.take() {
            let _ = thread.await;
        }

        self.page.exit_threads().await;

        if let Some(thread) = self.input_thread.take() {
            thread.join().map_err(|_| crate::Error::InputThreadCrashed)?;
        }

        Ok(())
    }

    pub fn handle_event(
        &mut self,
        event: AppEvent,
        area: Rect,
        tr: &mpsc::Sender<AppEvent>,
        sd: &CancellationToken,
    ) -> crate::Result<()> {
        let [_, body_area, _] = self.get_areas(area);
        let popup_area = Self::popup_area(area);

        // only input is held back by the fatal error popup, fetch results still land
        let mut result = if self.fatal_error_popup.is_open() && event.is_input() {
            let mut actions = PostHandleEventActions::default();
            self.fatal_error_popup
                .handle_event(event.input_event(), popup_area, &mut actions);
            actions
        } else {
            self.page.handle_event(
                &event,
                body_area.block_inner(),
                popup_area,
                tr,
                sd,
                &self.shared_state,
            )?
        };

        if let Some(error) = result.take_error() {
            self.fatal_error_popup
                .set_text(error.fmt_err("PricesPage"), true);
        }

        match &event {
            AppEvent::Input(_) => {
                if event.is_ctrl_pressed('c') {
                    self.exit = true;
                }
                if event.is_key_pressed(KeyCode::Esc) && !result.is_esc_ignored() {
                    self.exit = true;
                }
            }
            AppEvent::PricesUpdate { .. } => {
                self.shared_state.online = Some(true);
            }
            AppEvent::PricesUpdateError { error, .. } => {
                if error.is_connect() {
                    self.shared_state.online = Some(false);
                }
            }
            AppEvent::Tick => {}
        }

        Ok(())
    }

    fn get_areas(&self, area: Rect) -> [Rect; 3] {
        let [title_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);
        [title_area, body_area, footer_area]
    }

    fn popup_area(area: Rect) -> Rect {
        area.centered(64, 12)
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [title_area, body_area, footer_area] = self.get_areas(area);
        let popup_area = App::popup_area(area);

        Title.render_component(title_area, popup_area, buf, &self.shared_state);

        self.page.render_component_with_block(
            body_area,
            popup_area,
            buf,
            Block::bordered(),
            &self.shared_state,
        );

        Footer {
            exit: &self.exit,
            popup_open: &(self.page.alert().is_open() || self.fatal_error_popup.is_open()),
        }
        .render(footer_area, buf, &self.shared_state.theme);

        self.fatal_error_popup
            .render(popup_area, buf, &self.shared_state.theme.error_popup());
    }
}

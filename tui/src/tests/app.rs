use std::sync::mpsc;

use egx_ratatui_extra::{
    popup::PopupWidget,
    testutils::{esc, key, key_ctrl, TestTerminal},
};
use egx_utils::config::Config;
use ratatui::{layout::Rect, widgets::Widget};
use tokio_util::sync::CancellationToken;

use crate::{App, AppEvent};

const AREA: Rect = Rect::new(0, 0, 120, 30);

fn send(app: &mut App, event: AppEvent) {
    let (tr, _rc) = mpsc::channel();
    app.handle_event(event, AREA, &tr, &CancellationToken::new())
        .unwrap();
}

#[test]
fn new_uses_config_values() {
    let config = Config::default().with_overrides(
        Some("http://prices.local:9000".to_string()),
        Some("COMI".to_string()),
    );

    let app = App::new(&config).unwrap();

    assert_eq!(app.page().symbol(), "COMI");
    assert_eq!(
        app.shared_state().base_url.as_str(),
        "http://prices.local:9000/"
    );
    assert_eq!(app.shared_state().online, None);
}

#[test]
fn new_rejects_bad_config() {
    let mut config = Config::default();
    config.theme_name = "Neon".to_string();
    assert!(matches!(
        App::new(&config),
        Err(crate::Error::UnknownTheme(_))
    ));

    let config = Config::default().with_overrides(Some("ftp://prices.local".to_string()), None);
    assert!(matches!(App::new(&config), Err(crate::Error::UtilsError(_))));

    let mut config = Config::default();
    config.chart_height = 1;
    assert!(matches!(
        App::new(&config),
        Err(crate::Error::RatatuiExtraError(_))
    ));
}

#[test]
fn esc_quits() {
    let mut app = App::new(&Config::default()).unwrap();

    send(&mut app, AppEvent::Input(esc()));

    assert!(app.is_exiting());
}

#[test]
fn ctrl_c_quits() {
    let mut app = App::new(&Config::default()).unwrap();

    send(&mut app, AppEvent::Input(key_ctrl('c')));

    assert!(app.is_exiting());
}

#[test]
fn typing_does_not_quit() {
    let mut app = App::new(&Config::default()).unwrap();

    send(&mut app, AppEvent::Input(key('q')));

    assert!(!app.is_exiting());
    assert_eq!(app.page().symbol(), "CIBq");
}

#[test]
fn stale_failure_does_not_alert() {
    let mut app = App::new(&Config::default()).unwrap();
    assert_eq!(app.page().pending_request_id(), None);

    send(
        &mut app,
        AppEvent::PricesUpdateError {
            request_id: 0,
            symbol: "CIB".to_string(),
            error: egx_utils::Error::InvalidUrl("x".to_string()),
        },
    );

    assert!(!app.page().alert().is_open());
    assert_eq!(app.shared_state().online, None);
}

#[test]
fn connect_errors_mark_offline_until_next_success() {
    let mut app = App::new(&Config::default()).unwrap();
    let url = app.shared_state().base_url.clone();

    send(
        &mut app,
        AppEvent::PricesUpdateError {
            request_id: 0,
            symbol: "CIB".to_string(),
            error: egx_utils::Error::Internet(url),
        },
    );
    assert_eq!(app.shared_state().online, Some(false));

    let mut term = TestTerminal::new(AREA.width, AREA.height);
    (&app).render(term.area, &mut term.buffer);
    assert!(term.render_to_string().lines().next().unwrap().contains("offline"));

    send(
        &mut app,
        AppEvent::PricesUpdate {
            request_id: 0,
            symbol: "CIB".to_string(),
            response: Default::default(),
        },
    );
    assert_eq!(app.shared_state().online, Some(true));
}

#[test]
fn render_has_title_and_footer() {
    let app = App::new(&Config::default()).unwrap();
    let mut term = TestTerminal::new(AREA.width, AREA.height);

    (&app).render(term.area, &mut term.buffer);

    let output = term.render_to_string();
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].contains("egx prices"), "{output}");
    assert!(lines[0].contains("http://localhost:8000/"), "{output}");
    assert!(output.contains("control c or [ESC] to quit"), "{output}");
}

use egx_ratatui_extra::candle_chart::{ChartOptions, ChartPoint, ChartSurface};
use egx_ratatui_extra::testutils::TestTerminal;
use egx_utils::prices::PriceRow;
use ratatui::widgets::Widget;
use serde_json::{json, Value};

use crate::chart::{calendar_day, to_chart_points, ChartRenderer, ChartState};

fn renderer() -> ChartRenderer {
    ChartRenderer::new(ChartSurface::new(), ChartOptions::default())
}

fn rows(n: usize) -> Vec<PriceRow> {
    (0..n)
        .map(|i| {
            let close = 10.0 + i as f64;
            PriceRow::new(
                format!("2024-01-{:02}T00:00:00", i + 1),
                close - 1.0,
                close + 1.0,
                close - 2.0,
                close,
            )
        })
        .collect()
}

// ============================================================================
// Row mapping tests
// ============================================================================

#[test]
fn calendar_day_keeps_plain_dates() {
    assert_eq!(calendar_day("2024-01-02"), "2024-01-02");
}

#[test]
fn calendar_day_drops_time_of_day() {
    assert_eq!(calendar_day("2024-01-02T00:00:00"), "2024-01-02");
    assert_eq!(calendar_day("2024-01-02T15:45:10.250"), "2024-01-02");
}

#[test]
fn calendar_day_uses_utc_for_offsets() {
    assert_eq!(calendar_day("2024-01-02T23:30:00-02:00"), "2024-01-03");
    assert_eq!(calendar_day("2024-01-02T01:00:00+02:00"), "2024-01-01");
    assert_eq!(calendar_day("2024-01-02T10:00:00Z"), "2024-01-02");
}

#[test]
fn calendar_day_passes_unparseable_through() {
    assert_eq!(calendar_day("garbage"), "garbage");
    assert_eq!(calendar_day("day-oneT12"), "day-one");
    assert_eq!(calendar_day("20240102-long-text"), "20240102-l");
    assert_eq!(calendar_day(""), "");
}

#[test]
fn points_follow_row_order() {
    let series = vec![
        PriceRow::new("2024-01-03", 3.0, 4.0, 2.0, 3.5),
        PriceRow::new("2024-01-02", 10.0, 12.0, 9.0, 11.0),
    ];

    assert_eq!(
        to_chart_points(&series),
        vec![
            ChartPoint::new("2024-01-03", 3.0, 4.0, 2.0, 3.5),
            ChartPoint::new("2024-01-02", 10.0, 12.0, 9.0, 11.0),
        ]
    );
}

#[test]
fn points_ignore_extra_columns() {
    let mut row = PriceRow::new("2024-01-02T00:00:00", 10.0, 12.0, 9.0, 11.0);
    row.volume = Some(json!(5000));
    row.extra.insert("SMA_20".to_string(), Value::Null);

    assert_eq!(
        to_chart_points(&[row]),
        vec![ChartPoint::new("2024-01-02", 10.0, 12.0, 9.0, 11.0)]
    );
}

#[test]
fn missing_prices_become_nan() {
    let row: PriceRow = serde_json::from_value(json!({
        "Date": "2024-01-03",
        "Open": null,
        "High": "n/a",
        "Close": 11.0,
    }))
    .unwrap();

    let point = &to_chart_points(&[row])[0];
    assert_eq!(point.time, "2024-01-03");
    assert!(point.open.is_nan());
    assert!(point.high.is_nan());
    assert!(point.low.is_nan());
    assert_eq!(point.close, 11.0);
}

#[test]
fn missing_date_maps_to_empty_time() {
    let row: PriceRow = serde_json::from_value(json!({"Close": 1.0})).unwrap();
    assert_eq!(to_chart_points(&[row])[0].time, "");
}

// ============================================================================
// Lifecycle tests
// ============================================================================

#[test]
fn starts_uninitialized_without_a_chart() {
    let renderer = renderer();

    assert!(matches!(renderer.state(), ChartState::Uninitialized));
    assert!(renderer.chart().is_none());
    assert_eq!(renderer.surface().live_charts(), 0);
}

#[test]
fn absent_series_mounts_empty_chart() {
    let mut renderer = renderer();

    renderer.set_series(None).unwrap();

    let chart = renderer.chart().unwrap();
    assert_eq!(chart.series().len(), 1);
    assert!(chart.series()[0].data().is_empty());
    assert_eq!(renderer.surface().live_charts(), 1);
}

#[test]
fn series_change_replaces_the_chart() {
    let mut renderer = renderer();

    for n in [3, 0, 7, 1] {
        renderer.set_series(Some(&rows(n))).unwrap();

        assert!(matches!(renderer.state(), ChartState::Mounted(_)));
        assert_eq!(renderer.surface().live_charts(), 1);
        let chart = renderer.chart().unwrap();
        assert_eq!(chart.series().len(), 1);
        assert_eq!(chart.series()[0].data().len(), n);
    }
}

#[test]
fn unmount_detaches_the_chart() {
    let mut renderer = renderer();
    renderer.set_series(Some(&rows(2))).unwrap();

    renderer.unmount();

    assert!(matches!(renderer.state(), ChartState::Unmounted));
    assert_eq!(renderer.surface().live_charts(), 0);
}

#[test]
fn unmount_before_mount_keeps_state() {
    let mut renderer = renderer();

    renderer.unmount();

    assert!(matches!(renderer.state(), ChartState::Uninitialized));
}

#[test]
fn remount_after_unmount() {
    let mut renderer = renderer();
    renderer.set_series(Some(&rows(2))).unwrap();
    renderer.unmount();

    renderer.set_series(Some(&rows(4))).unwrap();

    assert_eq!(renderer.surface().live_charts(), 1);
    assert_eq!(renderer.chart().unwrap().series()[0].data().len(), 4);
}

#[test]
fn dropping_the_renderer_detaches() {
    let surface = ChartSurface::new();
    {
        let mut renderer = ChartRenderer::new(surface.clone(), ChartOptions::default());
        renderer.set_series(Some(&rows(3))).unwrap();
        assert_eq!(surface.live_charts(), 1);
    }
    assert_eq!(surface.live_charts(), 0);
}

#[test]
fn invalid_size_is_an_error() {
    let mut renderer = ChartRenderer::new(
        ChartSurface::new(),
        ChartOptions {
            width: 2,
            height: 2,
        },
    );

    assert!(matches!(
        renderer.set_series(None),
        Err(crate::Error::RatatuiExtraError(_))
    ));
    assert_eq!(renderer.surface().live_charts(), 0);
}

// ============================================================================
// Rendering tests
// ============================================================================

#[test]
fn unmounted_renders_nothing() {
    let mut term = TestTerminal::new(40, 10);
    let renderer = renderer();

    (&renderer).render(term.area, &mut term.buffer);

    assert_eq!(term.render_to_string(), "");
}

#[test]
fn mounted_renders_candles_and_dates() {
    let mut term = TestTerminal::new(60, 12);
    let mut renderer = renderer();
    renderer.set_series(Some(&rows(3))).unwrap();

    (&renderer).render(term.area, &mut term.buffer);

    let output = term.render_to_string();
    assert!(output.contains('┃'), "{output}");
    assert!(output.contains("2024-01-03"), "{output}");
}

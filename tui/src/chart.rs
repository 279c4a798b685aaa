use chrono::{DateTime, NaiveDate, NaiveDateTime};
use egx_ratatui_extra::candle_chart::{CandleChart, ChartOptions, ChartPoint, ChartSurface};
use egx_utils::prices::PriceRow;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

#[derive(Debug, Default)]
pub enum ChartState {
    #[default]
    Uninitialized,
    Mounted(CandleChart),
    Unmounted,
}

/// Keeps at most one chart attached to its surface and rebuilds it whenever the
/// series changes.
#[derive(Debug)]
pub struct ChartRenderer {
    surface: ChartSurface,
    options: ChartOptions,
    state: ChartState,
}

impl ChartRenderer {
    pub fn new(surface: ChartSurface, options: ChartOptions) -> Self {
        Self {
            surface,
            options,
            state: ChartState::Uninitialized,
        }
    }

    /// Tears down the current chart and mounts a fresh one with `series`.
    /// `None` mounts a chart with no points.
    pub fn set_series(&mut self, series: Option<&[PriceRow]>) -> crate::Result<()> {
        self.unmount();

        let mut chart = CandleChart::create(&self.surface, self.options)?;
        chart
            .add_candlestick_series()
            .set_data(to_chart_points(series.unwrap_or_default()));

        self.state = ChartState::Mounted(chart);
        Ok(())
    }

    /// Detaches the current chart, if any. Without a mounted chart the state is
    /// left as it was.
    pub fn unmount(&mut self) {
        match std::mem::replace(&mut self.state, ChartState::Unmounted) {
            ChartState::Mounted(chart) => chart.remove(),
            other => self.state = other,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_options(&mut self, options: ChartOptions) {
        self.options = options;
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn chart(&self) -> Option<&CandleChart> {
        match &self.state {
            ChartState::Mounted(chart) => Some(chart),
            _ => None,
        }
    }

    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }
}

impl Drop for ChartRenderer {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl Widget for &ChartRenderer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(chart) = self.chart() {
            chart.render(area, buf);
        }
    }
}

/// Missing or non-numeric prices become `NaN`, the chart leaves those out of
/// its scale and draws nothing for them.
pub fn to_chart_points(series: &[PriceRow]) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|row| {
            ChartPoint::new(
                calendar_day(row.date()),
                row.open(),
                row.high(),
                row.low(),
                row.close(),
            )
        })
        .collect()
}

/// Day part of a date string. Timestamps with an offset are moved to UTC
/// first, anything unparseable keeps its prefix up to the `T`.
pub fn calendar_day(date: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date) {
        return datetime.naive_utc().date().format("%Y-%m-%d").to_string();
    }
    if let Ok(datetime) = date.parse::<NaiveDateTime>() {
        return datetime.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(day) = date.parse::<NaiveDate>() {
        return day.format("%Y-%m-%d").to_string();
    }

    match date.split_once('T') {
        Some((day, _)) => day.to_string(),
        None => date.chars().take(10).collect(),
    }
}

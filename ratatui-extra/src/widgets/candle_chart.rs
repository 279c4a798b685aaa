use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::{Error, Result};

/// Rows below the plot: the axis line and the date labels.
const X_AXIS_HEIGHT: u16 = 2;
/// Columns between two date labels on the x axis.
const LABEL_GAP: usize = 8;
pub const MIN_CHART_SIZE: u16 = 4;

/// One candle as the chart consumes it. `time` is a calendar day `YYYY-MM-DD`,
/// anything else is still drawn but labelled verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartPoint {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl ChartPoint {
    pub fn new(time: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
        }
    }

    pub fn calc_y(&self, y_scale: f64, g_min: f64) -> [f64; 4] {
        [self.open, self.high, self.low, self.close].map(|v| (v - g_min) / y_scale)
    }

    pub fn bear_bull(&self) -> Color {
        if self.open <= self.close {
            Color::LightGreen
        } else {
            Color::Red
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.time, "%Y-%m-%d").ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u16,
    pub height: u16,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 20,
        }
    }
}

/// The region charts attach to. Clones share the same attachment count.
#[derive(Clone, Debug, Default)]
pub struct ChartSurface {
    attached: Arc<AtomicUsize>,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts currently attached to this surface.
    pub fn live_charts(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct CandlestickSeries {
    points: Vec<ChartPoint>,
}

impl CandlestickSeries {
    /// Replaces the whole series, points are kept in the given order.
    pub fn set_data(&mut self, points: Vec<ChartPoint>) {
        self.points = points;
    }

    pub fn data(&self) -> &[ChartPoint] {
        &self.points
    }
}

/// A candlestick chart attached to a [`ChartSurface`] for as long as it lives.
/// Dropping it, or calling [`CandleChart::remove`], detaches it.
#[derive(Debug)]
pub struct CandleChart {
    surface: ChartSurface,
    options: ChartOptions,
    series: Vec<CandlestickSeries>,
}

impl CandleChart {
    pub fn create(surface: &ChartSurface, options: ChartOptions) -> Result<Self> {
        if options.width < MIN_CHART_SIZE || options.height < MIN_CHART_SIZE {
            return Err(Error::InvalidChartSize {
                width: options.width,
                height: options.height,
                min: MIN_CHART_SIZE,
            });
        }

        surface.attached.fetch_add(1, Ordering::SeqCst);
        Ok(Self {
            surface: surface.clone(),
            options,
            series: Vec::new(),
        })
    }

    pub fn options(&self) -> ChartOptions {
        self.options
    }

    pub fn add_candlestick_series(&mut self) -> &mut CandlestickSeries {
        let idx = self.series.len();
        self.series.push(CandlestickSeries::default());
        &mut self.series[idx]
    }

    pub fn series(&self) -> &[CandlestickSeries] {
        &self.series
    }

    pub fn remove(self) {
        drop(self)
    }

    /// Size actually drawn inside `area`, never more than the options ask for.
    pub fn area(&self, area: Rect) -> Rect {
        Rect {
            width: area.width.min(self.options.width),
            height: area.height.min(self.options.height),
            ..area
        }
    }
}

impl Drop for CandleChart {
    fn drop(&mut self) {
        self.surface.attached.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Widget for &CandleChart {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let area = self.area(area);
        if area.height <= X_AXIS_HEIGHT {
            return;
        }
        let y_height = area.height - X_AXIS_HEIGHT;

        let all_points: Vec<&ChartPoint> = self.series.iter().flat_map(|s| &s.points).collect();
        let (y_max_all, y_min_all) = value_range(&all_points);
        let y_width = std::cmp::max(
            numeric_format(y_max_all).len(),
            numeric_format(y_min_all).len(),
        ) as u16
            + 4;
        if area.width <= y_width + 2 {
            return;
        }
        let chart_width = area.width - y_width - 2;

        // the visible window is the most recent points, so the range is recomputed on it
        let visible: Vec<Vec<&ChartPoint>> = self
            .series
            .iter()
            .map(|s| {
                let skip = s.points.len().saturating_sub(chart_width as usize);
                s.points.iter().skip(skip).collect()
            })
            .collect();
        let (y_max_all, y_min_all) =
            value_range(&visible.iter().flatten().copied().collect::<Vec<_>>());
        let y_scale = (y_max_all - y_min_all) / y_height as f64;
        let max_chars = std::cmp::max(
            numeric_format(y_max_all).len(),
            numeric_format(y_min_all).len(),
        );

        for i in 0..y_height {
            if i % 4 == 0 {
                let value = y_max_all - (y_scale * i as f64);
                buf.set_string(
                    area.x + chart_width,
                    area.y + i,
                    format!(" ┤ {} ", numeric_format(value)),
                    Style::default(),
                );
            } else {
                buf.set_string(
                    area.x + chart_width,
                    area.y + i,
                    format!(" │ {} ", " ".repeat(max_chars)),
                    Style::default(),
                );
            }
        }

        let longest = visible.iter().map(Vec::len).max().unwrap_or(0);
        let labelled = visible.iter().find(|v| v.len() == longest);
        let x_axis_strings = x_axis(labelled.map(Vec::as_slice).unwrap_or(&[]), chart_width);
        for (y, string) in x_axis_strings.iter().enumerate() {
            buf.set_string(
                area.x,
                area.y + y_height + y as u16,
                string,
                Style::default(),
            );
        }
        buf.set_string(
            area.x + chart_width,
            area.y + y_height,
            "─┘",
            Style::default(),
        );

        for points in &visible {
            let offset = chart_width as usize - points.len();
            for (i, candle) in points.iter().enumerate() {
                let x = area.x + (offset + i) as u16;
                render_candle(candle, x, area.y, y_height, y_scale, y_min_all, buf);
            }
        }
    }
}

/// Max high and min low, widened when every value is the same so the scale
/// never collapses to zero.
fn value_range(points: &[&ChartPoint]) -> (f64, f64) {
    let y_max = points
        .iter()
        .map(|c| c.high.max(c.open).max(c.close))
        .filter(|v| v.is_finite())
        .reduce(f64::max);
    let y_min = points
        .iter()
        .map(|c| c.low.min(c.open).min(c.close))
        .filter(|v| v.is_finite())
        .reduce(f64::min);

    match (y_max, y_min) {
        (Some(max), Some(min)) if max > min => (max, min),
        (Some(max), Some(_)) => (max + 0.5, max - 0.5),
        _ => (1.0, 0.0),
    }
}

fn render_candle(
    candle: &ChartPoint,
    x: u16,
    top: u16,
    y_height: u16,
    y_scale: f64,
    y_min_all: f64,
    buf: &mut Buffer,
) {
    let [y_open, y_high, y_low, y_close] = candle.calc_y(y_scale, y_min_all);
    let y_max = std::cmp::max_by(y_open, y_close, f64::total_cmp);
    let y_min = std::cmp::min_by(y_open, y_close, f64::total_cmp);
    let high_max_diff = y_high - y_max;
    let min_low_diff = y_min - y_low;
    let mut is_body = false;

    for y_chart in (0..y_height).rev() {
        let row = top + y_height - y_chart - 1;
        let y_chart = y_chart as f64;
        let char = if y_high.ceil() >= y_chart && y_chart >= y_max.floor() {
            if y_high - y_chart > 0.5 {
                if high_max_diff < 0.25 {
                    is_body = true;
                    UNICODE_BODY
                } else if high_max_diff < 0.75 {
                    if is_body {
                        UNICODE_BODY
                    } else {
                        is_body = true;
                        UNICODE_UP
                    }
                } else {
                    UNICODE_WICK
                }
            } else if y_high - y_chart >= 0. {
                if high_max_diff < 0.25 {
                    UNICODE_HALF_BODY_BOTTOM
                } else {
                    UNICODE_HALF_WICK_BOTTOM
                }
            } else {
                UNICODE_VOID
            }
        } else if y_max.floor() >= y_chart && y_chart >= y_min.ceil() {
            is_body = true;
            UNICODE_BODY
        } else if y_min.ceil() >= y_chart && y_chart >= y_low.floor() {
            if y_low - y_chart < 0.5 {
                if min_low_diff < 0.25 {
                    is_body = true;
                    UNICODE_BODY
                } else if min_low_diff < 0.75 {
                    if is_body {
                        is_body = false;
                        UNICODE_DOWN
                    } else {
                        UNICODE_WICK
                    }
                } else {
                    UNICODE_WICK
                }
            } else if y_low - y_chart <= 1.0 {
                if min_low_diff < 0.25 {
                    UNICODE_HALF_BODY_TOP
                } else {
                    UNICODE_HALF_WICK_TOP
                }
            } else {
                UNICODE_VOID
            }
        } else {
            UNICODE_VOID
        };
        buf.set_string(x, row, char, candle.bear_bull());
    }
}

/// The axis line and the label row under the plot. The most recent point is
/// always labelled in full, older ones get a short label every few columns
/// when there is room for it.
fn x_axis(points: &[&ChartPoint], chart_width: u16) -> [String; 2] {
    let width = chart_width as usize;
    let mut line = "─".repeat(width).chars().collect::<Vec<char>>();
    let mut labels = " ".repeat(width).chars().collect::<Vec<char>>();
    let offset = width - points.len();

    if let Some(last) = points.last() {
        let col = width - 1;
        let written = overwrite_chars(
            &mut labels,
            col as isize - (last.time.chars().count() / 2) as isize,
            &last.time,
            true,
        );
        if written {
            line[col] = '┴';
        }
    }

    for (idx, point) in points.iter().enumerate().rev().skip(1) {
        if (points.len() - 1 - idx) % LABEL_GAP != 0 {
            continue;
        }
        let prev = idx.checked_sub(1).map(|i| points[i]);
        let rendered = short_label(prev, point);
        if rendered.is_empty() {
            continue;
        }

        let col = offset + idx;
        let written = overwrite_chars(
            &mut labels,
            col as isize - (rendered.chars().count() / 2) as isize - 1,
            &format!(" {rendered} "),
            false,
        );
        if written {
            line[col] = '┴';
        }
    }

    [String::from_iter(line), String::from_iter(labels)]
}

/// Year when it changed since `prev`, otherwise month and day.
fn short_label(prev: Option<&ChartPoint>, now: &ChartPoint) -> String {
    let Some(now_date) = now.date() else {
        return now.time.clone();
    };

    match prev.and_then(ChartPoint::date) {
        Some(prev_date) if prev_date.year() != now_date.year() => now_date.format("%Y").to_string(),
        Some(prev_date) if prev_date == now_date => String::default(),
        _ => now_date.format("%m/%d").to_string(),
    }
}

fn overwrite_chars(chars: &mut Vec<char>, idx: isize, value: &str, overlap: bool) -> bool {
    let value_len = value.chars().count();
    if chars.len() < value_len {
        return false;
    }

    let idx = if idx < 0 {
        0
    } else if chars.len() < idx as usize + value_len {
        chars.len() - value_len
    } else {
        idx as usize
    };

    if !overlap && chars[idx..(idx + value_len)].iter().any(|&char| char != ' ') {
        return false;
    }

    chars.splice(idx..(idx + value_len), value.chars());

    true
}

fn numeric_format(value: f64) -> String {
    let precision = 9;
    let scale = 3;
    format!("{value:>precision$.scale$}")
}

const UNICODE_VOID: &str = " ";
const UNICODE_BODY: &str = "┃";
const UNICODE_WICK: &str = "│";
const UNICODE_UP: &str = "╽";
const UNICODE_DOWN: &str = "╿";
const UNICODE_HALF_BODY_BOTTOM: &str = "╻";
const UNICODE_HALF_WICK_BOTTOM: &str = "╷";
const UNICODE_HALF_BODY_TOP: &str = "╹";
const UNICODE_HALF_WICK_TOP: &str = "╵";

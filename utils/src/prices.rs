//! Client for the pricing API: `GET {base}/api/v1/prices/{symbol}`.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::Reqwest;

pub const PRICES_PATH: &str = "api/v1/prices";

/// Number of rows shown in the raw JSON preview.
pub const PREVIEW_LIMIT: usize = 20;

/// One trading day for one symbol, as sent by the API.
///
/// Every column is kept as the backend sent it, including `null` values,
/// so that the preview shows the raw row. The numeric accessors read the
/// OHLC columns as `f64` and give `NaN` for anything missing or non-numeric.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "Date", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(rename = "Open", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub open: Option<Value>,
    #[serde(rename = "High", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub high: Option<Value>,
    #[serde(rename = "Low", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub low: Option<Value>,
    #[serde(rename = "Close", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub close: Option<Value>,
    #[serde(rename = "Volume", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub volume: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `Some` for any value the key carried, `null` included. Absent keys fall
/// back to `None` through `default`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn number(value: &Option<Value>) -> f64 {
    value.as_ref().and_then(Value::as_f64).unwrap_or(f64::NAN)
}

impl PriceRow {
    pub fn new(date: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date: Some(Value::String(date.into())),
            open: Some(open.into()),
            high: Some(high.into()),
            low: Some(low.into()),
            close: Some(close.into()),
            volume: None,
            extra: BTreeMap::new(),
        }
    }

    /// The `Date` column, empty when it is missing or not a string.
    pub fn date(&self) -> &str {
        self.date.as_ref().and_then(Value::as_str).unwrap_or_default()
    }

    pub fn open(&self) -> f64 {
        number(&self.open)
    }

    pub fn high(&self) -> f64 {
        number(&self.high)
    }

    pub fn low(&self) -> f64 {
        number(&self.low)
    }

    pub fn close(&self) -> f64 {
        number(&self.close)
    }

    pub fn volume(&self) -> Option<f64> {
        self.volume.as_ref().and_then(Value::as_f64)
    }
}

/// Response envelope. Only `data` matters for the chart, the rest is shown
/// in the status line when the backend sends it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub mapped: Option<String>,
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub data: Option<Vec<PriceRow>>,
}

impl PricesResponse {
    /// Splits the envelope, a missing or `null` `data` becomes an empty series.
    pub fn into_parts(self) -> (SeriesMeta, Vec<PriceRow>) {
        let series = self.data.unwrap_or_default();
        let meta = SeriesMeta {
            symbol: self.symbol,
            mapped: self.mapped,
            rows: self.rows.unwrap_or(series.len()),
        };
        (meta, series)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesMeta {
    pub symbol: Option<String>,
    pub mapped: Option<String>,
    pub rows: usize,
}

impl SeriesMeta {
    pub fn summary(&self) -> String {
        let rows = match self.rows {
            1 => "1 row".to_string(),
            n => format!("{n} rows"),
        };

        match (&self.symbol, &self.mapped) {
            (Some(symbol), Some(mapped)) if symbol != mapped => {
                format!("{symbol} ({mapped}) · {rows}")
            }
            (Some(symbol), _) => format!("{symbol} · {rows}"),
            (None, Some(mapped)) => format!("{mapped} · {rows}"),
            (None, None) => rows,
        }
    }
}

pub fn preview_rows(series: &[PriceRow]) -> &[PriceRow] {
    &series[..series.len().min(PREVIEW_LIMIT)]
}

/// Pretty JSON of the first [`PREVIEW_LIMIT`] rows.
pub fn preview_json(series: &[PriceRow]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(preview_rows(series))?)
}

#[derive(Debug, Deserialize)]
struct RootResponse {
    message: String,
}

#[derive(Clone, Debug)]
pub struct PricesClient {
    client: Client,
    base_url: Url,
}

impl PricesClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The symbol is substituted verbatim, no validation or case folding.
    pub fn prices_url(&self, symbol: &str) -> String {
        format!(
            "{}/{PRICES_PATH}/{symbol}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    pub async fn fetch_prices(&self, symbol: &str) -> crate::Result<PricesResponse> {
        Reqwest::get_with(&self.client, self.prices_url(symbol))?
            .receive_json::<PricesResponse>()
            .await
    }

    /// Hits the API root, which answers with a short status message.
    pub async fn ping(&self) -> crate::Result<String> {
        Reqwest::get_with(&self.client, self.base_url.as_str())?
            .receive_json::<RootResponse>()
            .await
            .map(|resp| resp.message)
    }
}

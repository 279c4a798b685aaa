use serde_json::json;

use crate::prices::{
    preview_json, preview_rows, PriceRow, PricesClient, PricesResponse, SeriesMeta, PREVIEW_LIMIT,
};
use crate::serde::serde_response_parse;
use crate::testutils::many_rows_body;

fn rows(n: usize) -> Vec<PriceRow> {
    (0..n)
        .map(|i| PriceRow::new(format!("2024-01-{:02}", 1 + i % 28), 1.0, 2.0, 0.5, 1.5))
        .collect()
}

// ============================================================================
// Response parsing
// ============================================================================

#[test]
fn parse_single_row_body() {
    let body = r#"{"data": [{"Date":"2024-01-02","Open":10.0,"High":12.0,"Low":9.0,"Close":11.0}]}"#;
    let response: PricesResponse = serde_response_parse(body).unwrap();
    let (_, series) = response.into_parts();

    assert_eq!(
        series,
        vec![PriceRow::new("2024-01-02", 10.0, 12.0, 9.0, 11.0)]
    );
}

#[test]
fn parse_missing_data_is_empty_series() {
    let response: PricesResponse = serde_response_parse(r#"{"symbol": "CIB"}"#).unwrap();
    let (meta, series) = response.into_parts();

    assert!(series.is_empty());
    assert_eq!(meta.rows, 0);
    assert_eq!(meta.symbol.as_deref(), Some("CIB"));
}

#[test]
fn parse_null_data_is_empty_series() {
    let response: PricesResponse = serde_response_parse(r#"{"data": null}"#).unwrap();
    assert!(response.into_parts().1.is_empty());
}

#[test]
fn parse_keeps_volume_and_indicator_columns() {
    let body = json!({
        "data": [{
            "Date": "2024-01-02T00:00:00+02:00",
            "Open": 10.5, "High": 12, "Low": 9, "Close": 11,
            "Volume": 1200,
            "SMA_20": null,
            "RSI_14": 55.5,
        }]
    })
    .to_string();
    let response: PricesResponse = serde_response_parse(&body).unwrap();
    let row = &response.data.unwrap()[0];

    assert_eq!(row.date(), "2024-01-02T00:00:00+02:00");
    assert_eq!(row.open(), 10.5);
    assert_eq!(row.high(), 12.0);
    assert_eq!(row.volume(), Some(1200.0));
    assert_eq!(row.extra.get("SMA_20"), Some(&json!(null)));
    assert_eq!(row.extra.get("RSI_14"), Some(&json!(55.5)));
    assert!(!row.extra.contains_key("Open"));
}

#[test]
fn parse_keeps_rows_with_null_and_missing_prices() {
    let body = json!({
        "data": [
            {"Date": "2024-01-02", "Open": 10.0, "High": 12.0, "Low": 9.0, "Close": 11.0},
            {"Date": "2024-01-03", "Open": null, "High": null, "Low": null, "Close": null, "Volume": null},
            {"Date": "2024-01-04", "Open": "ten"},
        ]
    })
    .to_string();
    let response: PricesResponse = serde_response_parse(&body).unwrap();
    let (_, series) = response.into_parts();

    assert_eq!(series.len(), 3);
    assert_eq!(series[1].open, Some(json!(null)));
    assert!(series[1].open().is_nan());
    assert_eq!(series[1].volume(), None);
    assert_eq!(series[2].open, Some(json!("ten")));
    assert!(series[2].open().is_nan());
    assert_eq!(series[2].close, None);
    assert!(series[2].close().is_nan());
}

#[test]
fn parse_reports_path_of_non_object_row() {
    let body = r#"{"data": [{"Date":"2024-01-02"}, 42]}"#;
    let err = serde_response_parse::<PricesResponse>(body).unwrap_err();
    assert!(err.path().to_string().starts_with("data[1]"), "{}", err.path());
}

#[test]
fn parse_rejects_non_object_body() {
    assert!(serde_response_parse::<PricesResponse>("[1, 2, 3]").is_err());
}

#[test]
fn parse_backend_shaped_body() {
    let body = many_rows_body("CIB", 3).to_string();
    let response: PricesResponse = serde_response_parse(&body).unwrap();
    let (meta, series) = response.into_parts();

    assert_eq!(series.len(), 3);
    assert_eq!(meta.mapped.as_deref(), Some("CIB.CA"));
    assert_eq!(meta.rows, 3);
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn preview_caps_at_limit() {
    let series = rows(100);
    assert_eq!(preview_rows(&series).len(), PREVIEW_LIMIT);
    assert_eq!(PREVIEW_LIMIT, 20);
}

#[test]
fn preview_shorter_series_is_whole_series() {
    let series = rows(3);
    assert_eq!(preview_rows(&series), &series[..]);
    assert!(preview_rows(&[]).is_empty());
}

#[test]
fn preview_json_has_twenty_entries() {
    let json = preview_json(&rows(100)).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 20);
}

#[test]
fn preview_json_empty_series() {
    assert_eq!(preview_json(&[]).unwrap(), "[]");
}

#[test]
fn preview_json_uses_api_field_names() {
    let json = preview_json(&[PriceRow::new("2024-01-02", 10.0, 12.0, 9.0, 11.0)]).unwrap();
    let expected = "\
[
  {
    \"Date\": \"2024-01-02\",
    \"Open\": 10.0,
    \"High\": 12.0,
    \"Low\": 9.0,
    \"Close\": 11.0
  }
]";
    assert_eq!(json, expected);
}

#[test]
fn preview_json_keeps_null_columns() {
    let body = json!({
        "data": [{
            "Date": "2024-01-03",
            "Open": null, "High": null, "Low": null, "Close": null,
            "Volume": null,
            "SMA_20": null,
        }]
    })
    .to_string();
    let response: PricesResponse = serde_response_parse(&body).unwrap();

    let json = preview_json(&response.into_parts().1).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

    for column in ["Open", "High", "Low", "Close", "Volume", "SMA_20"] {
        assert_eq!(parsed[0].get(column), Some(&json!(null)), "{column}");
    }
    assert_eq!(parsed[0]["Date"], json!("2024-01-03"));
}

#[test]
fn preview_json_leaves_out_absent_columns() {
    let body = r#"{"data": [{"Date":"2024-01-03","Close":11.0}]}"#;
    let response: PricesResponse = serde_response_parse(body).unwrap();

    let json = preview_json(&response.into_parts().1).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed[0], json!({"Date": "2024-01-03", "Close": 11.0}));
}

// ============================================================================
// Status line
// ============================================================================

#[test]
fn summary_variants() {
    let mut meta = SeriesMeta {
        symbol: Some("CIB".to_string()),
        mapped: Some("CIB.CA".to_string()),
        rows: 62,
    };
    assert_eq!(meta.summary(), "CIB (CIB.CA) · 62 rows");

    meta.mapped = Some("CIB".to_string());
    assert_eq!(meta.summary(), "CIB · 62 rows");

    meta.symbol = None;
    meta.mapped = None;
    meta.rows = 1;
    assert_eq!(meta.summary(), "1 row");
}

// ============================================================================
// URL building
// ============================================================================

#[test]
fn prices_url_substitutes_symbol_verbatim() {
    let client = PricesClient::new("http://localhost:8000".parse().unwrap());
    assert_eq!(
        client.prices_url("CIB"),
        "http://localhost:8000/api/v1/prices/CIB"
    );
    assert_eq!(
        client.prices_url("comi.CA"),
        "http://localhost:8000/api/v1/prices/comi.CA"
    );
}

#[test]
fn prices_url_with_base_path() {
    let client = PricesClient::new("http://example.com/backend/".parse().unwrap());
    assert_eq!(
        client.prices_url("CIB"),
        "http://example.com/backend/api/v1/prices/CIB"
    );
}

//! In-process stand-in for the pricing API, used by tests.
//!
//! Replies are registered per symbol; unknown symbols get a 404 like the real
//! backend does when it has no data.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Raw(&'static str),
}

#[derive(Clone, Default)]
struct BackendState {
    hits: Arc<Mutex<Vec<String>>>,
    replies: Arc<Mutex<HashMap<String, (Duration, Reply)>>>,
}

pub struct FakeBackend {
    base_url: Url,
    state: BackendState,
}

impl FakeBackend {
    /// Binds to a random local port and serves until the runtime shuts down.
    pub async fn start() -> Self {
        let state = BackendState::default();
        let app = Router::new()
            .route("/", get(root))
            .route("/api/v1/prices/{symbol}", get(prices))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}").parse().expect("fake backend url"),
            state,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn reply(&self, symbol: &str, reply: Reply) {
        self.reply_after(symbol, Duration::ZERO, reply);
    }

    pub fn reply_after(&self, symbol: &str, delay: Duration, reply: Reply) {
        self.state
            .replies
            .lock()
            .expect("replies lock")
            .insert(symbol.to_string(), (delay, reply));
    }

    /// Symbols requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().expect("hits lock").clone()
    }
}

/// Body with a single OHLC row.
pub fn one_row_body() -> Value {
    json!({
        "data": [{"Date": "2024-01-02", "Open": 10.0, "High": 12.0, "Low": 9.0, "Close": 11.0}]
    })
}

/// Body shaped like the real backend output, with `n` consecutive days.
pub fn many_rows_body(symbol: &str, n: usize) -> Value {
    let data: Vec<Value> = (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            json!({
                "Date": format!("2024-{:02}-{:02}T00:00:00", 1 + i / 28, 1 + i % 28),
                "Open": close - 1.0,
                "High": close + 2.0,
                "Low": close - 3.0,
                "Close": close,
                "Volume": 1000 + i,
                "SMA_20": null,
            })
        })
        .collect();

    json!({
        "symbol": symbol,
        "mapped": format!("{symbol}.CA"),
        "rows": n,
        "data": data,
    })
}

async fn root() -> Json<Value> {
    Json(json!({"message": "EGX Analytics API is running"}))
}

async fn prices(State(state): State<BackendState>, Path(symbol): Path<String>) -> Response {
    state.hits.lock().expect("hits lock").push(symbol.clone());

    let (delay, reply) = state
        .replies
        .lock()
        .expect("replies lock")
        .get(&symbol)
        .cloned()
        .unwrap_or((Duration::ZERO, Reply::Status(404)));

    tokio::time::sleep(delay).await;

    match reply {
        Reply::Json(value) => Json(value).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Raw(body) => body.into_response(),
    }
}

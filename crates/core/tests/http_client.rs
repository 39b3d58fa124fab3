use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use stockpulse_core::api::{FetchError, FetchErrorKind, HttpMarketDataClient, MarketDataClient};
use stockpulse_core::domain::market::Trend;
use stockpulse_core::domain::symbol::Symbol;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

async fn latest(Path(symbol): Path<String>) -> Json<Value> {
    Json(json!({
        "symbol": symbol,
        "price": 189.84,
        "timestamp": "2026-03-02T14:03:11.123456"
    }))
}

async fn predict(Path(symbol): Path<String>) -> Json<Value> {
    if symbol == "NVDA" {
        return Json(json!({"error": "Not enough data for prediction"}));
    }
    Json(json!({
        "symbol": symbol,
        "current_price": 100.0,
        "predicted_price": 105.0,
        "trend": "uptrend",
        "confidence_lower": 98.0,
        "confidence_upper": 108.0
    }))
}

async fn history(Path(symbol): Path<String>) -> Result<Json<Value>, (StatusCode, &'static str)> {
    match symbol.as_str() {
        "TSLA" => Err((StatusCode::INTERNAL_SERVER_ERROR, "boom")),
        "META" => Ok(Json(json!({"symbol": symbol}))),
        _ => {
            let points: Vec<_> = (0..25)
                .map(|i| {
                    json!({
                        "timestamp": format!("2026-03-02 {:02}:00:00", i % 24),
                        "price": 100.0 + i as f64
                    })
                })
                .collect();
            Ok(Json(json!({"symbol": symbol, "history": points})))
        }
    }
}

fn router() -> Router {
    Router::new()
        .route("/latest/:symbol", get(latest))
        .route("/predict/:symbol", get(predict))
        .route("/history/:symbol", get(history))
}

fn fetch_error(err: &anyhow::Error) -> &FetchError {
    err.downcast_ref::<FetchError>()
        .expect("client errors carry a FetchError")
}

#[tokio::test]
async fn fetches_latest_snapshot() {
    let base = serve(router()).await;
    let client = HttpMarketDataClient::new(&base, None).unwrap();

    let snapshot = client.fetch_latest(Symbol::Aapl).await.unwrap();
    assert_eq!(snapshot.symbol, "AAPL");
    assert_eq!(snapshot.price, 189.84);
}

#[tokio::test]
async fn fetches_prediction_with_interval() {
    let base = serve(router()).await;
    let client = HttpMarketDataClient::new(&base, None).unwrap();

    let prediction = client.fetch_prediction(Symbol::Msft).await.unwrap();
    assert_eq!(prediction.symbol.as_deref(), Some("MSFT"));
    assert_eq!(prediction.trend, Some(Trend::Uptrend));
    assert_eq!(prediction.confidence_upper, Some(108.0));
}

#[tokio::test]
async fn prediction_error_body_is_a_fetch_failure() {
    let base = serve(router()).await;
    let client = HttpMarketDataClient::new(&base, None).unwrap();

    let err = client.fetch_prediction(Symbol::Nvda).await.unwrap_err();
    let diag = fetch_error(&err);
    assert_eq!(diag.kind, FetchErrorKind::Upstream);
    assert_eq!(diag.symbol, Symbol::Nvda);
    assert_eq!(diag.detail, "Not enough data for prediction");
}

#[tokio::test]
async fn fetches_full_history() {
    let base = serve(router()).await;
    let client = HttpMarketDataClient::new(&base, None).unwrap();

    let history = client.fetch_history(Symbol::Googl).await.unwrap();
    assert_eq!(history.len(), 25);
    assert_eq!(history[24].price, 124.0);

    let empty = client.fetch_history(Symbol::Meta).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn server_error_is_a_status_failure() {
    let base = serve(router()).await;
    let client = HttpMarketDataClient::new(&base, None).unwrap();

    let err = client.fetch_history(Symbol::Tsla).await.unwrap_err();
    let diag = fetch_error(&err);
    assert_eq!(diag.kind, FetchErrorKind::Status(500));
    assert_eq!(diag.detail, "boom");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpMarketDataClient::new(&format!("http://{addr}"), None).unwrap();
    let err = client.fetch_latest(Symbol::Amzn).await.unwrap_err();
    assert_eq!(fetch_error(&err).kind, FetchErrorKind::Transport);
}

use crate::api::{Endpoint, FetchError, FetchErrorKind, MarketDataClient};
use crate::config::Settings;
use crate::domain::market::{HistoryPoint, HistoryResponse, PredictionResult, StockSnapshot};
use crate::domain::symbol::Symbol;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};

// Keeps error details readable when the server answers with an HTML error page.
const MAX_DETAIL_CHARS: usize = 256;

#[derive(Debug, Clone)]
pub struct HttpMarketDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMarketDataClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings.http_timeout)
    }

    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        anyhow::ensure!(!base_url.trim().is_empty(), "API base URL must be non-empty");

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim().to_string(),
        })
    }

    fn url(&self, endpoint: Endpoint, symbol: Symbol) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path_segment(),
            symbol.ticker()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint, symbol: Symbol) -> Result<T> {
        let url = self.url(endpoint, symbol);
        let t0 = Instant::now();

        let res = self.http.get(&url).send().await.map_err(|e| {
            FetchError::new(endpoint, symbol, FetchErrorKind::Transport, e.to_string())
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            FetchError::new(endpoint, symbol, FetchErrorKind::Transport, e.to_string())
        })?;

        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis(),
            "market data response"
        );

        Ok(decode_body(endpoint, symbol, status, &text)?)
    }
}

fn decode_body<T: DeserializeOwned>(
    endpoint: Endpoint,
    symbol: Symbol,
    status: StatusCode,
    text: &str,
) -> Result<T, FetchError> {
    if !status.is_success() {
        return Err(FetchError::new(
            endpoint,
            symbol,
            FetchErrorKind::Status(status.as_u16()),
            truncate(text),
        ));
    }

    let raw_json = serde_json::from_str::<Value>(text).map_err(|e| {
        FetchError::new(
            endpoint,
            symbol,
            FetchErrorKind::Payload,
            format!("response is not valid JSON ({e}): {}", truncate(text)),
        )
    })?;

    if let Some(message) = raw_json.get("error") {
        let message = match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FetchError::new(
            endpoint,
            symbol,
            FetchErrorKind::Upstream,
            message,
        ));
    }

    serde_json::from_value::<T>(raw_json).map_err(|e| {
        FetchError::new(endpoint, symbol, FetchErrorKind::Payload, e.to_string())
    })
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_DETAIL_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_DETAIL_CHARS).collect();
    out.push('…');
    out
}

#[async_trait::async_trait]
impl MarketDataClient for HttpMarketDataClient {
    async fn fetch_latest(&self, symbol: Symbol) -> Result<StockSnapshot> {
        self.get_json(Endpoint::Latest, symbol).await
    }

    async fn fetch_prediction(&self, symbol: Symbol) -> Result<PredictionResult> {
        self.get_json(Endpoint::Predict, symbol).await
    }

    async fn fetch_history(&self, symbol: Symbol) -> Result<Vec<HistoryPoint>> {
        let resp: HistoryResponse = self.get_json(Endpoint::History, symbol).await?;
        Ok(resp.history)
    }
}

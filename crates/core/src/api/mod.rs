pub mod error;
pub mod http;

use crate::domain::market::{HistoryPoint, PredictionResult, StockSnapshot};
use crate::domain::symbol::Symbol;
use std::fmt;

pub use error::{FetchError, FetchErrorKind};
pub use http::HttpMarketDataClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Latest,
    Predict,
    History,
}

impl Endpoint {
    pub fn path_segment(self) -> &'static str {
        match self {
            Endpoint::Latest => "latest",
            Endpoint::Predict => "predict",
            Endpoint::History => "history",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Read-only access to the prediction API. One round trip per call, no retries.
#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    async fn fetch_latest(&self, symbol: Symbol) -> anyhow::Result<StockSnapshot>;

    async fn fetch_prediction(&self, symbol: Symbol) -> anyhow::Result<PredictionResult>;

    /// The full history series as served; callers pick the window they display.
    async fn fetch_history(&self, symbol: Symbol) -> anyhow::Result<Vec<HistoryPoint>>;
}

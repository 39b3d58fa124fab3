use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest known price for a symbol. Replaced wholesale on every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: String,
    pub price: f64,
    #[serde(deserialize_with = "crate::time::stamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Uptrend => "uptrend",
            Trend::Downtrend => "downtrend",
        }
    }
}

/// Point forecast plus interval, as supplied by the predictor. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub symbol: Option<String>,
    pub current_price: Option<f64>,
    pub predicted_price: Option<f64>,
    pub trend: Option<Trend>,
    pub confidence_lower: Option<f64>,
    pub confidence_upper: Option<f64>,
}

impl PredictionResult {
    /// `(current, predicted)` when both are present and finite.
    pub fn price_pair(&self) -> Option<(f64, f64)> {
        let current = self.current_price.filter(|v| v.is_finite())?;
        let predicted = self.predicted_price.filter(|v| v.is_finite())?;
        Some((current, predicted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub price: f64,
    #[serde(deserialize_with = "crate::time::stamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_latest_payload_with_naive_timestamp() {
        let v = json!({
            "symbol": "AAPL",
            "price": 189.84,
            "timestamp": "2026-03-02T14:03:11.123456"
        });
        let snapshot: StockSnapshot = serde_json::from_value(v).unwrap();
        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.price, 189.84);
        assert_eq!(
            snapshot.timestamp.date_naive(),
            Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap().date_naive()
        );
    }

    #[test]
    fn rejects_latest_payload_without_price() {
        let v = json!({"symbol": "AAPL", "timestamp": "2026-03-02T14:03:11"});
        assert!(serde_json::from_value::<StockSnapshot>(v).is_err());
    }

    #[test]
    fn prediction_without_confidence_interval_still_parses() {
        let v = json!({
            "symbol": "MSFT",
            "current_price": 410.12,
            "predicted_price": 412.5,
            "trend": "uptrend"
        });
        let p: PredictionResult = serde_json::from_value(v).unwrap();
        assert_eq!(p.trend, Some(Trend::Uptrend));
        assert_eq!(p.confidence_lower, None);
        assert_eq!(p.confidence_upper, None);
        assert_eq!(p.price_pair(), Some((410.12, 412.5)));
    }

    #[test]
    fn prediction_price_pair_requires_both_prices() {
        let p = PredictionResult {
            current_price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(p.price_pair(), None);
        assert_eq!(PredictionResult::default().price_pair(), None);
    }

    #[test]
    fn unknown_trend_is_rejected() {
        let v = json!({"current_price": 1.0, "predicted_price": 2.0, "trend": "sideways"});
        assert!(serde_json::from_value::<PredictionResult>(v).is_err());
    }

    #[test]
    fn history_defaults_to_empty_when_key_missing() {
        let parsed: HistoryResponse = serde_json::from_value(json!({"symbol": "TSLA"})).unwrap();
        assert!(parsed.history.is_empty());

        let parsed: HistoryResponse = serde_json::from_value(json!({
            "symbol": "TSLA",
            "history": [
                {"timestamp": "2026-03-02 14:00:00", "price": 201.5},
                {"timestamp": "2026-03-02 15:00:00", "price": 203.25}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.history.len(), 2);
        assert_eq!(parsed.history[1].price, 203.25);
    }
}

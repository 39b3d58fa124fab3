use crate::domain::market::{PredictionResult, Trend};
use crate::view::format;

pub const TITLE: &str = "AI Prediction";
pub const ANALYZING_DESCRIPTION: &str = "Analyzing market trends...";
pub const INSUFFICIENT_DESCRIPTION: &str = "Gathering data for prediction";
pub const INSUFFICIENT_BODY: &str =
    "The AI model needs at least 10 historical data points.\nPlease wait while the backend collects data.";
pub const READY_DESCRIPTION: &str = "Short-term price forecast";

/// Card colouring. Driven by the server's `trend` label, never by the sign of the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendStyle {
    Bullish,
    Bearish,
}

impl TrendStyle {
    pub fn from_trend(trend: Option<Trend>) -> Self {
        match trend {
            Some(Trend::Uptrend) => TrendStyle::Bullish,
            _ => TrendStyle::Bearish,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSummary {
    pub current: f64,
    pub predicted: f64,
    pub change: f64,
    /// `None` when the current price is zero.
    pub change_pct: Option<f64>,
    pub trend: Option<Trend>,
    pub style: TrendStyle,
    pub confidence_lower: Option<f64>,
    pub confidence_upper: Option<f64>,
}

impl PredictionSummary {
    fn new(prediction: &PredictionResult, current: f64, predicted: f64) -> Self {
        let change = predicted - current;
        let change_pct = (current != 0.0)
            .then(|| change / current * 100.0)
            .filter(|pct| pct.is_finite());

        Self {
            current,
            predicted,
            change,
            change_pct,
            trend: prediction.trend,
            style: TrendStyle::from_trend(prediction.trend),
            confidence_lower: prediction.confidence_lower,
            confidence_upper: prediction.confidence_upper,
        }
    }

    pub fn change_pct_rounded(&self) -> Option<f64> {
        self.change_pct.map(format::round2)
    }

    pub fn trend_label(&self) -> &'static str {
        self.trend.map(Trend::as_str).unwrap_or(format::MISSING)
    }

    pub fn current_text(&self) -> String {
        format::money(self.current)
    }

    pub fn predicted_text(&self) -> String {
        format::money(self.predicted)
    }

    /// e.g. `+5.00 (5.00%)`
    pub fn change_text(&self) -> String {
        format!(
            "{} ({})",
            format::signed(self.change),
            format::percent_opt(self.change_pct_rounded())
        )
    }

    pub fn price_rows(&self) -> [(&'static str, String); 3] {
        [
            ("Current", self.current_text()),
            ("Predicted", self.predicted_text()),
            ("Change", self.change_text()),
        ]
    }

    pub fn confidence_rows(&self) -> [(&'static str, String); 2] {
        [
            ("Lower", format::money_opt(self.confidence_lower)),
            ("Upper", format::money_opt(self.confidence_upper)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionView {
    Analyzing,
    InsufficientData,
    Ready(PredictionSummary),
}

impl PredictionView {
    pub fn evaluate(prediction: Option<&PredictionResult>, loading: bool) -> Self {
        if loading {
            return PredictionView::Analyzing;
        }

        let Some(prediction) = prediction else {
            return PredictionView::InsufficientData;
        };

        match prediction.price_pair() {
            Some((current, predicted)) => {
                PredictionView::Ready(PredictionSummary::new(prediction, current, predicted))
            }
            None => PredictionView::InsufficientData,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PredictionView::Analyzing => ANALYZING_DESCRIPTION,
            PredictionView::InsufficientData => INSUFFICIENT_DESCRIPTION,
            PredictionView::Ready(_) => READY_DESCRIPTION,
        }
    }
}

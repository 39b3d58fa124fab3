use crate::api::Endpoint;
use crate::domain::market::{HistoryPoint, PredictionResult, StockSnapshot};
use crate::domain::symbol::Symbol;
use crate::poll::notify::{Notification, Notifications};
use crate::view::{ChartView, PredictionView, QuoteView};
use chrono::TimeZone;
use std::fmt::Display;
use tokio::time::Instant;

#[derive(Debug)]
pub enum Payload {
    Snapshot(anyhow::Result<StockSnapshot>),
    Prediction(anyhow::Result<PredictionResult>),
    History(anyhow::Result<Vec<HistoryPoint>>),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Snapshot(_) => Endpoint::Latest,
            Payload::Prediction(_) => Endpoint::Predict,
            Payload::History(_) => Endpoint::History,
        }
    }
}

/// A fetch result tagged with the selection it was issued for.
#[derive(Debug)]
pub struct Update {
    pub generation: u64,
    pub symbol: Symbol,
    pub payload: Payload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(Endpoint),
    Failed(Endpoint),
    /// Issued for a previous selection; dropped without touching state.
    Stale(Endpoint),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    symbol: Symbol,
    generation: u64,
    snapshot: Option<StockSnapshot>,
    prediction: Option<PredictionResult>,
    prediction_loading: bool,
    history: Vec<HistoryPoint>,
    notifications: Notifications,
}

impl DashboardState {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            generation: 0,
            snapshot: None,
            prediction: None,
            prediction_loading: false,
            history: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Option<&StockSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn prediction_loading(&self) -> bool {
        self.prediction_loading
    }

    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    pub fn quote_view<Tz>(&self, tz: &Tz) -> Option<QuoteView>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        QuoteView::from_snapshot(self.snapshot.as_ref(), tz)
    }

    pub fn prediction_view(&self) -> PredictionView {
        PredictionView::evaluate(self.prediction.as_ref(), self.prediction_loading)
    }

    pub fn chart_view<Tz>(&self, tz: &Tz) -> ChartView
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        ChartView::from_history(&self.history, tz)
    }

    /// Starts a new selection: anything still in flight becomes stale.
    pub(crate) fn begin(&mut self, symbol: Symbol) -> u64 {
        self.symbol = symbol;
        self.invalidate();
        self.snapshot = None;
        self.prediction = None;
        self.history.clear();
        self.generation
    }

    pub(crate) fn invalidate(&mut self) {
        self.generation += 1;
        self.prediction_loading = false;
    }

    /// Returns false when a prediction fetch is already in flight.
    pub(crate) fn begin_prediction(&mut self) -> bool {
        if self.prediction_loading {
            return false;
        }
        self.prediction_loading = true;
        true
    }

    pub fn apply(&mut self, update: Update, now: Instant) -> ApplyOutcome {
        let endpoint = update.payload.endpoint();

        if update.generation != self.generation {
            tracing::debug!(
                symbol = %update.symbol,
                generation = update.generation,
                current_generation = self.generation,
                %endpoint,
                "discarding stale market data response"
            );
            return ApplyOutcome::Stale(endpoint);
        }

        let result = match update.payload {
            Payload::Snapshot(res) => res.map(|snapshot| self.snapshot = Some(snapshot)),
            Payload::Prediction(res) => {
                self.prediction_loading = false;
                res.map(|prediction| self.prediction = Some(prediction))
            }
            Payload::History(res) => res.map(|history| self.history = history),
        };

        match result {
            Ok(()) => ApplyOutcome::Applied(endpoint),
            Err(err) => {
                tracing::warn!(
                    symbol = %update.symbol,
                    %endpoint,
                    error = %format!("{err:#}"),
                    "market data fetch failed"
                );
                self.notifications
                    .push(Notification::fetch_failed(endpoint, now));
                ApplyOutcome::Failed(endpoint)
            }
        }
    }
}

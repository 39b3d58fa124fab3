use crate::api::{Endpoint, MarketDataClient};
use crate::config::Settings;
use crate::domain::symbol::Symbol;
use crate::poll::poller::Poller;
use crate::poll::state::{ApplyOutcome, DashboardState, Payload, Update};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub snapshot: Duration,
    pub history: Duration,
}

impl PollIntervals {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            snapshot: settings.snapshot_poll,
            history: settings.history_poll,
        }
    }
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            snapshot: Duration::from_secs(5),
            history: Duration::from_secs(10),
        }
    }
}

/// Everything a spawned fetch needs to report back to the controller.
#[derive(Clone)]
struct FetchTask {
    client: Arc<dyn MarketDataClient>,
    tx: mpsc::UnboundedSender<Update>,
    symbol: Symbol,
    generation: u64,
}

impl FetchTask {
    /// Fire and forget. The result is tagged and sent back; the owner decides whether it is
    /// still relevant.
    fn spawn(&self, endpoint: Endpoint) {
        let task = self.clone();
        tokio::spawn(async move {
            let payload = match endpoint {
                Endpoint::Latest => Payload::Snapshot(task.client.fetch_latest(task.symbol).await),
                Endpoint::Predict => {
                    Payload::Prediction(task.client.fetch_prediction(task.symbol).await)
                }
                Endpoint::History => Payload::History(task.client.fetch_history(task.symbol).await),
            };
            // The receiver only disappears when the controller is dropped.
            let _ = task.tx.send(Update {
                generation: task.generation,
                symbol: task.symbol,
                payload,
            });
        });
    }
}

struct Pollers {
    _snapshot: Poller,
    _history: Poller,
}

pub struct PollingController {
    client: Arc<dyn MarketDataClient>,
    intervals: PollIntervals,
    state: DashboardState,
    tx: mpsc::UnboundedSender<Update>,
    rx: mpsc::UnboundedReceiver<Update>,
    pollers: Option<Pollers>,
}

impl PollingController {
    pub fn new(client: Arc<dyn MarketDataClient>, symbol: Symbol, intervals: PollIntervals) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            intervals,
            state: DashboardState::new(symbol),
            tx,
            rx,
            pollers: None,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.pollers.is_some()
    }

    /// Issues the immediate fetches for the selected symbol and starts both timers.
    pub fn mount(&mut self) {
        let symbol = self.state.symbol();
        self.start(symbol);
    }

    pub fn select_symbol(&mut self, symbol: Symbol) {
        if self.is_mounted() && symbol == self.state.symbol() {
            return;
        }
        tracing::info!(from = %self.state.symbol(), to = %symbol, "symbol selected");
        self.start(symbol);
    }

    /// Manual prediction refresh. Returns false while a prediction fetch is already in flight
    /// or when nothing is mounted.
    pub fn refresh_prediction(&mut self) -> bool {
        if !self.is_mounted() || !self.state.begin_prediction() {
            return false;
        }
        self.task().spawn(Endpoint::Predict);
        true
    }

    /// Stops both timers. Responses still in flight are discarded when they arrive.
    pub fn unmount(&mut self) {
        self.pollers = None;
        self.state.invalidate();
    }

    pub async fn next_update(&mut self) -> Option<Update> {
        self.rx.recv().await
    }

    pub fn apply(&mut self, update: Update) -> ApplyOutcome {
        self.state.apply(update, Instant::now())
    }

    /// Waits for the next fetch result and applies it.
    pub async fn pump(&mut self) -> Option<ApplyOutcome> {
        let update = self.next_update().await?;
        Some(self.apply(update))
    }

    pub fn prune_notifications(&mut self) {
        self.state.prune_notifications(Instant::now());
    }

    fn task(&self) -> FetchTask {
        FetchTask {
            client: Arc::clone(&self.client),
            tx: self.tx.clone(),
            symbol: self.state.symbol(),
            generation: self.state.generation(),
        }
    }

    fn start(&mut self, symbol: Symbol) {
        // Old timers go first so at most one per concern is ever alive.
        self.pollers = None;
        let generation = self.state.begin(symbol);
        tracing::debug!(%symbol, generation, "starting market data polling");

        let task = self.task();
        task.spawn(Endpoint::Latest);
        if self.state.begin_prediction() {
            task.spawn(Endpoint::Predict);
        }
        task.spawn(Endpoint::History);

        let snapshot_task = task.clone();
        let history_task = task;
        self.pollers = Some(Pollers {
            _snapshot: Poller::spawn(self.intervals.snapshot, move || {
                snapshot_task.spawn(Endpoint::Latest)
            }),
            _history: Poller::spawn(self.intervals.history, move || {
                history_task.spawn(Endpoint::History)
            }),
        });
    }
}

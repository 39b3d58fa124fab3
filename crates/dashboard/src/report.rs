use chrono::TimeZone;
use std::fmt::{Display, Write};
use stockpulse_core::api::{Endpoint, MarketDataClient};
use stockpulse_core::domain::market::{HistoryPoint, PredictionResult, StockSnapshot};
use stockpulse_core::domain::symbol::Symbol;
use stockpulse_core::poll::Notification;
use stockpulse_core::view::{chart, format, prediction, ChartView, PredictionView, QuoteView};

/// One-shot fetch of every resource for `symbol`, printed as plain text.
pub async fn run(client: &dyn MarketDataClient, symbol: Symbol) -> anyhow::Result<()> {
    let (latest, predicted, history) = tokio::join!(
        client.fetch_latest(symbol),
        client.fetch_prediction(symbol),
        client.fetch_history(symbol),
    );

    let mut report = Report::new(symbol);
    match latest {
        Ok(snapshot) => report.snapshot = Some(snapshot),
        Err(err) => report.fail(Endpoint::Latest, &err),
    }
    match predicted {
        Ok(p) => report.prediction = Some(p),
        Err(err) => report.fail(Endpoint::Predict, &err),
    }
    match history {
        Ok(points) => report.history = points,
        Err(err) => report.fail(Endpoint::History, &err),
    }

    print!("{}", report.render(&chrono::Local));
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Report {
    pub symbol: Symbol,
    pub snapshot: Option<StockSnapshot>,
    pub prediction: Option<PredictionResult>,
    pub history: Vec<HistoryPoint>,
    pub failures: Vec<Endpoint>,
}

impl Report {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            snapshot: None,
            prediction: None,
            history: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, endpoint: Endpoint, err: &anyhow::Error) {
        tracing::warn!(symbol = %self.symbol, %endpoint, error = %format!("{err:#}"), "fetch failed");
        self.failures.push(endpoint);
    }

    pub fn render<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, tz);
        out
    }

    fn write_to<Tz>(&self, out: &mut String, tz: &Tz) -> std::fmt::Result
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        writeln!(
            out,
            "StockPulse AI Dashboard · {} ({})",
            self.symbol.company(),
            self.symbol
        )?;
        match QuoteView::from_snapshot(self.snapshot.as_ref(), tz) {
            Some(quote) => {
                writeln!(out, "  {:<14}{}", "Current Price", quote.price_text)?;
                writeln!(out, "  {:<14}{}", "Last Updated", quote.updated_text)?;
            }
            None => writeln!(out, "  {:<14}{}", "Current Price", format::MISSING)?,
        }
        writeln!(out)?;

        let view = PredictionView::evaluate(self.prediction.as_ref(), false);
        match &view {
            PredictionView::Ready(summary) => {
                writeln!(out, "{} [{}]", prediction::TITLE, summary.trend_label())?;
                writeln!(out, "  {}", view.description())?;
                for (label, value) in summary.price_rows() {
                    writeln!(out, "  {label:<14}{value}")?;
                }
                writeln!(out, "  Confidence Range")?;
                for (label, value) in summary.confidence_rows() {
                    writeln!(out, "  {label:<14}{value}")?;
                }
            }
            _ => {
                writeln!(out, "{}", prediction::TITLE)?;
                writeln!(out, "  {}", view.description())?;
                for line in prediction::INSUFFICIENT_BODY.lines() {
                    writeln!(out, "  {line}")?;
                }
            }
        }
        writeln!(out)?;

        writeln!(out, "{}", chart::TITLE)?;
        match ChartView::from_history(&self.history, tz) {
            ChartView::Collecting => writeln!(out, "  {}", chart::COLLECTING_MESSAGE)?,
            ChartView::Plot(series) => {
                for point in &series.points {
                    writeln!(out, "  {:<8}{}", point.label, format::money(point.price))?;
                }
            }
        }

        if !self.failures.is_empty() {
            writeln!(out)?;
            let now = tokio::time::Instant::now();
            for endpoint in &self.failures {
                let notice = Notification::fetch_failed(*endpoint, now);
                writeln!(out, "{}: {}", notice.title, notice.description)?;
            }
        }
        Ok(())
    }
}

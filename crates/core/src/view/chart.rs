use crate::domain::market::HistoryPoint;
use crate::view::format;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Number of most recent history samples the chart shows.
pub const HISTORY_WINDOW: usize = 20;

pub const TITLE: &str = "Price History";
pub const DESCRIPTION: &str = "Real-time price movements";
pub const COLLECTING_MESSAGE: &str = "Collecting price data... This may take a few minutes.";

// Flat series still need a visible band around the line.
const MIN_PAD: f64 = 0.5;
const PAD_RATIO: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// `(index, price)` pairs, x running from 0 in chronological order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.points.len().saturating_sub(1).max(1) as f64]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .points
            .iter()
            .map(|p| p.price)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }

        let span = max - min;
        let pad = if span > 0.0 { span * PAD_RATIO } else { MIN_PAD };
        [min - pad, max + pad]
    }

    pub fn first_label(&self) -> Option<&str> {
        self.points.first().map(|p| p.label.as_str())
    }

    pub fn last_label(&self) -> Option<&str> {
        self.points.last().map(|p| p.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Collecting,
    Plot(ChartSeries),
}

impl ChartView {
    pub fn from_history<Tz>(history: &[HistoryPoint], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if history.is_empty() {
            return ChartView::Collecting;
        }

        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let points = history[start..]
            .iter()
            .map(|p| ChartPoint {
                price: p.price,
                timestamp: p.timestamp,
                label: format::clock_minutes(&p.timestamp, tz),
            })
            .collect();

        ChartView::Plot(ChartSeries { points })
    }
}

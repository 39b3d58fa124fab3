//! Pure view models. Each card is a deterministic function of the state it is given; renderers
//! only lay the resulting text out.

pub mod chart;
pub mod format;
pub mod prediction;
pub mod quote;

pub use chart::{ChartPoint, ChartSeries, ChartView};
pub use prediction::{PredictionSummary, PredictionView, TrendStyle};
pub use quote::QuoteView;

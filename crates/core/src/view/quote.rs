use crate::domain::market::StockSnapshot;
use crate::view::format;
use chrono::TimeZone;
use std::fmt::Display;

/// Price card contents for the selected symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub symbol: String,
    pub price_text: String,
    pub updated_text: String,
}

impl QuoteView {
    pub fn from_snapshot<Tz>(snapshot: Option<&StockSnapshot>, tz: &Tz) -> Option<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let snapshot = snapshot?;
        Some(Self {
            symbol: snapshot.symbol.clone(),
            price_text: format::money(snapshot.price),
            updated_text: format::clock_seconds(&snapshot.timestamp, tz),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn renders_price_and_update_time() {
        let snapshot = StockSnapshot {
            symbol: "AAPL".to_string(),
            price: 189.8449,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 15).unwrap(),
        };
        let view = QuoteView::from_snapshot(Some(&snapshot), &Utc).unwrap();
        assert_eq!(view.price_text, "$189.84");
        assert_eq!(view.updated_text, "09:30:15");
        assert_eq!(view.symbol, "AAPL");
    }

    #[test]
    fn nothing_to_show_without_snapshot() {
        assert_eq!(QuoteView::from_snapshot(None, &Utc), None);
    }
}

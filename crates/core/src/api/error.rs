use crate::api::Endpoint;
use crate::domain::symbol::Symbol;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection, TLS or body read failure.
    Transport,
    Status(u16),
    /// 2xx response carrying an `{"error": ...}` body.
    Upstream,
    /// Body is not JSON or does not match the expected shape.
    Payload,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Transport => f.write_str("transport"),
            FetchErrorKind::Status(code) => write!(f, "http {code}"),
            FetchErrorKind::Upstream => f.write_str("upstream"),
            FetchErrorKind::Payload => f.write_str("payload"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchError {
    pub endpoint: Endpoint,
    pub symbol: Symbol,
    pub kind: FetchErrorKind,
    pub detail: String,
}

impl FetchError {
    pub fn new(
        endpoint: Endpoint,
        symbol: Symbol,
        kind: FetchErrorKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            symbol,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetch failed (endpoint={}, symbol={}, kind={}): {}",
            self.endpoint, self.symbol, self.kind, self.detail
        )
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_endpoint_symbol_and_kind() {
        let err = FetchError::new(
            Endpoint::Predict,
            Symbol::Tsla,
            FetchErrorKind::Status(503),
            "service unavailable",
        );
        assert_eq!(
            err.to_string(),
            "fetch failed (endpoint=predict, symbol=TSLA, kind=http 503): service unavailable"
        );
    }

    #[test]
    fn survives_a_round_trip_through_anyhow() {
        let err: anyhow::Error =
            FetchError::new(Endpoint::Latest, Symbol::Aapl, FetchErrorKind::Transport, "refused")
                .into();
        let diag = err.downcast_ref::<FetchError>().unwrap();
        assert_eq!(diag.endpoint, Endpoint::Latest);
        assert_eq!(diag.kind, FetchErrorKind::Transport);
    }
}

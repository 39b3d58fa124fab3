use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    Aapl,
    Msft,
    Googl,
    Tsla,
    Amzn,
    Meta,
    Nvda,
}

impl Symbol {
    /// Selector order.
    pub const ALL: [Symbol; 7] = [
        Symbol::Aapl,
        Symbol::Msft,
        Symbol::Googl,
        Symbol::Tsla,
        Symbol::Amzn,
        Symbol::Meta,
        Symbol::Nvda,
    ];

    pub fn ticker(self) -> &'static str {
        match self {
            Symbol::Aapl => "AAPL",
            Symbol::Msft => "MSFT",
            Symbol::Googl => "GOOGL",
            Symbol::Tsla => "TSLA",
            Symbol::Amzn => "AMZN",
            Symbol::Meta => "META",
            Symbol::Nvda => "NVDA",
        }
    }

    pub fn company(self) -> &'static str {
        match self {
            Symbol::Aapl => "Apple",
            Symbol::Msft => "Microsoft",
            Symbol::Googl => "Google",
            Symbol::Tsla => "Tesla",
            Symbol::Amzn => "Amazon",
            Symbol::Meta => "Meta",
            Symbol::Nvda => "NVIDIA",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbol(pub String);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported symbol: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSymbol {}

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sym| sym.ticker().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("aapl".parse::<Symbol>().unwrap(), Symbol::Aapl);
        assert_eq!(" GOOGL ".parse::<Symbol>().unwrap(), Symbol::Googl);
        assert!("IBM".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn cycles_in_selector_order() {
        assert_eq!(Symbol::Aapl.next(), Symbol::Msft);
        assert_eq!(Symbol::Nvda.next(), Symbol::Aapl);
        assert_eq!(Symbol::Aapl.prev(), Symbol::Nvda);
        assert_eq!(Symbol::Meta.prev(), Symbol::Amzn);
    }

    #[test]
    fn serializes_as_uppercase_ticker() {
        assert_eq!(serde_json::to_string(&Symbol::Googl).unwrap(), "\"GOOGL\"");
        assert_eq!(
            serde_json::from_str::<Symbol>("\"TSLA\"").unwrap(),
            Symbol::Tsla
        );
        for sym in Symbol::ALL {
            assert_eq!(sym.to_string(), sym.ticker());
        }
    }
}

use serde::{Deserialize, Serialize};

/// Market type of a tradeable instrument
///
/// Determines which raw endpoint family and field mapping applies when
/// talking to the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Spot trading pair (e.g., BTC/USDT)
    Spot,
    /// Margin trading on a spot pair
    Margin,
    /// Futures contract with expiry
    Futures,
    /// Perpetual swap without expiry
    Perp,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "spot",
            MarketType::Margin => "margin",
            MarketType::Futures => "futures",
            MarketType::Perp => "perp",
        }
    }

    /// Whether this market type is a derivative (futures or perp)
    pub fn is_derivative(&self) -> bool {
        matches!(self, MarketType::Futures | MarketType::Perp)
    }

    /// All market types, in registry-build order
    pub fn all() -> [MarketType; 4] {
        [
            MarketType::Spot,
            MarketType::Margin,
            MarketType::Futures,
            MarketType::Perp,
        ]
    }
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_type_derivative() {
        assert!(!MarketType::Spot.is_derivative());
        assert!(!MarketType::Margin.is_derivative());
        assert!(MarketType::Futures.is_derivative());
        assert!(MarketType::Perp.is_derivative());
    }

    #[test]
    fn test_market_type_serde() {
        let json = serde_json::to_string(&MarketType::Perp).unwrap();
        assert_eq!(json, "\"perp\"");
        let back: MarketType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MarketType::Perp);
    }
}

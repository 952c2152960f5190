use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized market data tick from the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub bid_size: i64,
    pub ask_size: i64,
    pub timestamp: DateTime<Utc>,
}

/// Best bid/offer snapshot derived from the latest tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub bid_size: i64,
    pub ask_size: i64,
    pub spread: Decimal,
    pub mid: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl BookSnapshot {
    /// Build a snapshot from a tick; spread and mid are rounded to 4 dp
    pub fn from_tick(tick: &Tick) -> Self {
        Self {
            symbol: tick.symbol.clone(),
            bid: tick.bid,
            ask: tick.ask,
            bid_size: tick.bid_size,
            ask_size: tick.ask_size,
            spread: (tick.ask - tick.bid).round_dp(4),
            mid: ((tick.bid + tick.ask) / Decimal::TWO).round_dp(4),
            timestamp: tick.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tick(bid: Decimal, ask: Decimal) -> Tick {
        Tick {
            symbol: "AAPL".to_string(),
            bid,
            ask,
            bid_size: 100,
            ask_size: 200,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_derives_spread_and_mid() {
        let snap = BookSnapshot::from_tick(&tick(dec!(100.01), dec!(100.04)));
        assert_eq!(snap.spread, dec!(0.03));
        assert_eq!(snap.mid, dec!(100.025));
    }

    #[test]
    fn test_snapshot_rounds_to_four_places() {
        let snap = BookSnapshot::from_tick(&tick(dec!(100.0001), dec!(100.00024)));
        assert_eq!(snap.spread, dec!(0.0001));
        assert_eq!(snap.mid, dec!(100.0002));
    }
}

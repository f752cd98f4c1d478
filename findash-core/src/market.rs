//! Market data types for the price endpoints and the realtime feeds

use serde::{Deserialize, Serialize};

/// One frame of a realtime price feed.
///
/// The server pushes `{"price": <number>, "change": <number>}` at a fixed
/// cadence once the subscription key has been sent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    /// Last traded price (index feeds use fractional values)
    pub price: f64,

    /// Change versus the previous session
    #[serde(default)]
    pub change: f64,
}

/// Overseas exchange codes accepted by the overseas price endpoints
pub const DEFAULT_OVERSEAS_EXCHANGE: &str = "NAS";

/// Build the composite subscription key for the overseas feed (`SYM|EXC`).
///
/// An empty exchange falls back to [`DEFAULT_OVERSEAS_EXCHANGE`], matching
/// the server-side default.
pub fn overseas_key(symbol: &str, exchange: &str) -> String {
    let excd = if exchange.is_empty() {
        DEFAULT_OVERSEAS_EXCHANGE
    } else {
        exchange
    };
    format!("{}|{}", symbol, excd.to_uppercase())
}

//! Types for public REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::TradeSide;
use crate::types::serde_helpers::int_or_bool;

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Server time and pair metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    /// Server time (unix seconds).
    pub server_time: u64,
    /// Metadata keyed by pair.
    #[serde(default)]
    pub pairs: HashMap<String, PairInfo>,
}

/// Trading rules of a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct PairInfo {
    /// Price precision.
    pub decimal_places: u32,
    /// Minimum price.
    pub min_price: Decimal,
    /// Maximum price.
    pub max_price: Decimal,
    /// Minimum order amount.
    pub min_amount: Decimal,
    /// Minimum order total.
    #[serde(default)]
    pub min_total: Decimal,
    /// Whether the pair is hidden.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub hidden: bool,
    /// Fee (percent).
    #[serde(default)]
    pub fee: Decimal,
    /// Buyer fee (percent).
    #[serde(default)]
    pub fee_buyer: Decimal,
    /// Seller fee (percent).
    #[serde(default)]
    pub fee_seller: Decimal,
}

/// Request for ticker statistics.
#[derive(Debug, Clone, Default)]
pub struct TickerRequest {
    /// Pairs, e.g. `["ltc_btc", "eth_btc"]`. At least one is required.
    pub pairs: Vec<String>,
}

impl TickerRequest {
    /// Create a request for `pairs`.
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(Into::into).collect(),
        }
    }
}

/// 24h statistics of a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Average price.
    pub avg: Decimal,
    /// Traded volume (quote currency).
    pub vol: Decimal,
    /// Traded volume (base currency).
    pub vol_cur: Decimal,
    /// Last trade price.
    pub last: Decimal,
    /// Best bid.
    pub buy: Decimal,
    /// Best ask.
    pub sell: Decimal,
    /// Last update (unix seconds).
    pub updated: u64,
}

/// Request for an order book.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DepthRequest {
    /// Pair, e.g. `ltc_btc`. Required; sent in the path.
    #[serde(skip)]
    pub pair: String,
    /// Number of levels (server default 150, max 2000). Omitted when 0.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
}

impl DepthRequest {
    /// Create a request for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            limit: 0,
        }
    }

    /// Limit the number of levels.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Order book of a pair. Each level is `(price, amount)`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBook {
    /// Sell orders, best first.
    #[serde(default)]
    pub asks: Vec<(Decimal, Decimal)>,
    /// Buy orders, best first.
    #[serde(default)]
    pub bids: Vec<(Decimal, Decimal)>,
}

/// Request for recent trades.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesRequest {
    /// Pair, e.g. `ltc_btc`. Required; sent in the path.
    #[serde(skip)]
    pub pair: String,
    /// Number of trades (server default 150, max 2000). Omitted when 0.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
}

impl TradesRequest {
    /// Create a request for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            limit: 0,
        }
    }

    /// Limit the number of trades.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A public trade print.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicTrade {
    /// `ask` for sells, `bid` for buys.
    #[serde(rename = "type")]
    pub side: TradeSide,
    /// Price.
    pub price: Decimal,
    /// Amount.
    pub amount: Decimal,
    /// Trade ID.
    pub tid: u64,
    /// Execution time (unix seconds).
    pub timestamp: i64,
}

/// Recent trades keyed by pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Trades {
    /// Trades per pair, newest first.
    pub pairs: HashMap<String, Vec<PublicTrade>>,
}

impl Trades {
    /// Trades of one pair.
    pub fn get(&self, pair: &str) -> &[PublicTrade] {
        self.pairs.get(pair).map(Vec::as_slice).unwrap_or_default()
    }

    /// Split the trades of `pair` into `(asks, bids)`.
    pub fn separate(&self, pair: &str) -> (Vec<PublicTrade>, Vec<PublicTrade>) {
        self.get(pair)
            .iter()
            .cloned()
            .partition(|trade| trade.side == TradeSide::Ask)
    }
}

/// Price of the latest trade strictly before `before` (unix seconds).
///
/// Returns `None` if no trade is older than `before`.
pub fn price_before(trades: &[PublicTrade], before: i64) -> Option<Decimal> {
    trades
        .iter()
        .filter(|trade| trade.timestamp < before)
        .max_by_key(|trade| trade.timestamp)
        .map(|trade| trade.price)
}

//! Types for trading API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::types::serde_helpers::int_or_bool;
use crate::types::{SortOrder, TradeType};

/// Request for account info. Takes no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetInfoRequest;

/// Account balances and key permissions.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Available balances keyed by coin.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
    /// Balances including amounts locked in open orders.
    #[serde(default)]
    pub funds_incl_orders: HashMap<String, Decimal>,
    /// Permissions of the API key.
    #[serde(default)]
    pub rights: KeyRights,
    /// Number of executed transactions.
    #[serde(default)]
    pub transaction_count: u64,
    /// Number of open orders.
    #[serde(default)]
    pub open_orders: u64,
    /// Server time (unix seconds).
    #[serde(default)]
    pub server_time: u64,
}

/// Permissions granted to an API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyRights {
    /// May read account info.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub info: bool,
    /// May trade.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub trade: bool,
    /// May request deposit addresses.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub deposit: bool,
    /// May withdraw.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub withdraw: bool,
}

/// Request to place an order.
///
/// `trade_type`, `rate` and `amount` are omitted from the request when unset or zero.
#[derive(Debug, Clone, Default)]
pub struct TradeRequest {
    /// Pair, e.g. `ltc_btc`. Required.
    pub pair: String,
    /// Buy or sell.
    pub trade_type: Option<TradeType>,
    /// Price per unit.
    pub rate: Decimal,
    /// Amount to buy or sell.
    pub amount: Decimal,
}

impl TradeRequest {
    /// Create a new order request.
    pub fn new(pair: impl Into<String>, trade_type: TradeType, rate: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            trade_type: Some(trade_type),
            rate,
            amount,
        }
    }
}

/// Result of placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeResult {
    /// Amount bought or sold immediately.
    pub received: Decimal,
    /// Amount left on the book.
    pub remains: Decimal,
    /// Created order ID (0 if the order filled completely).
    pub order_id: u64,
    /// Balances after the request.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

/// Request for open orders on a pair.
#[derive(Debug, Clone, Default)]
pub struct ActiveOrdersRequest {
    /// Pair, e.g. `ltc_btc`. Required.
    pub pair: String,
}

impl ActiveOrdersRequest {
    /// Create a new request for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self { pair: pair.into() }
    }
}

/// An open order.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveOrder {
    /// Pair.
    pub pair: String,
    /// Buy or sell.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Remaining amount.
    pub amount: Decimal,
    /// Price.
    pub rate: Decimal,
    /// Creation time (unix seconds).
    pub timestamp_created: u64,
    /// Always 0 for active orders.
    #[serde(default)]
    pub status: u8,
}

/// Request for one order's details.
#[derive(Debug, Clone, Default)]
pub struct OrderInfoRequest {
    /// Order ID. Required.
    pub order_id: u64,
}

impl OrderInfoRequest {
    /// Create a new request for `order_id`.
    pub fn new(order_id: u64) -> Self {
        Self { order_id }
    }
}

/// Order details.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetails {
    /// Pair.
    pub pair: String,
    /// Buy or sell.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Amount when the order was placed.
    pub start_amount: Decimal,
    /// Remaining amount.
    pub amount: Decimal,
    /// Price.
    pub rate: Decimal,
    /// Creation time (unix seconds).
    pub timestamp_created: u64,
    /// 0 active, 1 filled, 2 cancelled, 3 cancelled after partial fill.
    pub status: u8,
}

/// Request to cancel an order.
#[derive(Debug, Clone, Default)]
pub struct CancelOrderRequest {
    /// Order ID. Required.
    pub order_id: u64,
}

impl CancelOrderRequest {
    /// Create a new request for `order_id`.
    pub fn new(order_id: u64) -> Self {
        Self { order_id }
    }
}

/// Result of cancelling an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResult {
    /// Cancelled order ID.
    pub order_id: u64,
    /// Balances after the request.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

/// Request for executed trades on a pair.
///
/// Every filter left at zero (or `None`) is omitted and the server default applies.
#[derive(Debug, Clone, Default)]
pub struct TradeHistoryRequest {
    /// Pair, e.g. `ltc_btc`. Required.
    pub pair: String,
    /// Index of the first trade to return.
    pub from: u64,
    /// Number of trades (server default 1000).
    pub count: u64,
    /// ID of the first trade to return.
    pub from_id: u64,
    /// ID of the last trade to return.
    pub end_id: u64,
    /// Sort order (server default DESC).
    pub order: Option<SortOrder>,
    /// Start time (unix seconds).
    pub since: u64,
    /// End time (unix seconds).
    pub end: u64,
}

impl TradeHistoryRequest {
    /// Create a new request for `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            ..Default::default()
        }
    }

    /// Start at the trade with this index.
    pub fn from(mut self, from: u64) -> Self {
        self.from = from;
        self
    }

    /// Limit the number of trades.
    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Start at this trade ID.
    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = from_id;
        self
    }

    /// Stop at this trade ID.
    pub fn end_id(mut self, end_id: u64) -> Self {
        self.end_id = end_id;
        self
    }

    /// Sort order.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Only trades at or after this time.
    pub fn since(mut self, since: u64) -> Self {
        self.since = since;
        self
    }

    /// Only trades at or before this time.
    pub fn end(mut self, end: u64) -> Self {
        self.end = end;
        self
    }
}

/// An executed trade.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    /// Pair.
    pub pair: String,
    /// Buy or sell.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Amount.
    pub amount: Decimal,
    /// Price.
    pub rate: Decimal,
    /// Order the trade belongs to.
    pub order_id: u64,
    /// Whether the order was ours.
    #[serde(default, deserialize_with = "int_or_bool::deserialize")]
    pub is_your_order: bool,
    /// Execution time (unix seconds).
    pub timestamp: u64,
}

/// Request for a deposit address.
#[derive(Debug, Clone, Default)]
pub struct DepositAddressRequest {
    /// Coin ticker, e.g. `BTC`. Required.
    pub coin_name: String,
    /// Ask for a fresh address.
    pub need_new: bool,
}

impl DepositAddressRequest {
    /// Create a new request for `coin_name`.
    pub fn new(coin_name: impl Into<String>) -> Self {
        Self {
            coin_name: coin_name.into(),
            need_new: false,
        }
    }

    /// Ask for a fresh address.
    pub fn need_new(mut self, need_new: bool) -> Self {
        self.need_new = need_new;
        self
    }
}

/// A deposit address.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Address.
    pub address: String,
    /// Amount deposited to this address so far.
    #[serde(default)]
    pub processed_amount: Decimal,
    /// Server time (unix seconds).
    #[serde(default)]
    pub server_time: u64,
}

/// Request to withdraw to an external address. All fields are required.
#[derive(Debug, Clone, Default)]
pub struct WithdrawRequest {
    /// Coin ticker, e.g. `BTC`.
    pub coin_name: String,
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Destination address.
    pub address: String,
}

impl WithdrawRequest {
    /// Create a new withdrawal request.
    pub fn new(coin_name: impl Into<String>, amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            coin_name: coin_name.into(),
            amount,
            address: address.into(),
        }
    }
}

/// Result of a withdrawal request.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResult {
    /// Server time (unix seconds).
    #[serde(default)]
    pub server_time: u64,
}

/// Request to create a Yobicode (coupon). All fields are required.
#[derive(Debug, Clone, Default)]
pub struct CreateYobicodeRequest {
    /// Coin ticker, e.g. `BTC`.
    pub currency: String,
    /// Coupon value.
    pub amount: Decimal,
}

impl CreateYobicodeRequest {
    /// Create a new coupon request.
    pub fn new(currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }
}

/// A created coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedYobicode {
    /// The coupon code.
    pub coupon: String,
    /// Always 1.
    #[serde(rename = "transID", default)]
    pub trans_id: u64,
    /// Balances after the request.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

/// Request to redeem a Yobicode (coupon).
#[derive(Debug, Clone, Default)]
pub struct RedeemYobicodeRequest {
    /// The coupon code. Required.
    pub coupon: String,
}

impl RedeemYobicodeRequest {
    /// Create a new redeem request.
    pub fn new(coupon: impl Into<String>) -> Self {
        Self {
            coupon: coupon.into(),
        }
    }
}

/// A redeemed coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemedYobicode {
    /// Redeemed amount.
    #[serde(rename = "couponAmount")]
    pub coupon_amount: Decimal,
    /// Coin of the coupon.
    #[serde(rename = "couponCurrency")]
    pub coupon_currency: String,
    /// Always 1.
    #[serde(rename = "transID", default)]
    pub trans_id: u64,
    /// Balances after the request.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_info_deserialize() {
        let json = r#"{
            "funds": {"ltc": 22336.5, "btc": 0.00001},
            "funds_incl_orders": {"ltc": 32100.5, "btc": 0.00001},
            "rights": {"info": 1, "trade": 0, "deposit": 1, "withdraw": 0},
            "transaction_count": 0,
            "open_orders": 1,
            "server_time": 1418654530
        }"#;
        let info: AccountInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.funds["ltc"].to_string(), "22336.5");
        assert_eq!(info.funds["btc"].to_string(), "0.00001");
        assert!(info.rights.info);
        assert!(!info.rights.trade);
        assert_eq!(info.open_orders, 1);
    }

    #[test]
    fn test_trade_record_deserialize() {
        let json = r#"{
            "pair": "ltc_btc",
            "type": "sell",
            "amount": 1,
            "rate": 1,
            "order_id": 343148,
            "is_your_order": 1,
            "timestamp": 1342445793
        }"#;
        let record: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.trade_type, TradeType::Sell);
        assert!(record.is_your_order);
        assert_eq!(record.order_id, 343148);
    }

    #[test]
    fn test_redeemed_coupon_deserialize() {
        let json = r#"{
            "couponAmount": 1.5,
            "couponCurrency": "BTC",
            "transID": 1,
            "funds": {"btc": 2.5}
        }"#;
        let redeemed: RedeemedYobicode = serde_json::from_str(json).unwrap();
        assert_eq!(redeemed.coupon_currency, "BTC");
        assert_eq!(redeemed.coupon_amount.to_string(), "1.5");
        assert_eq!(redeemed.trans_id, 1);
    }
}

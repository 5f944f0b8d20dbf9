//! Yobit API endpoint constants.

/// Base URL for the Yobit API.
pub const YOBIT_BASE_URL: &str = "https://yobit.net";

/// Public market-data endpoints (no authentication required).
///
/// Pairs are appended as a path segment, e.g. `/api/3/ticker/ltc_btc-eth_btc`.
pub mod public {
    /// Server time and pair metadata.
    pub const INFO: &str = "/api/3/info";
    /// 24h statistics per pair.
    pub const TICKER: &str = "/api/3/ticker";
    /// Order book per pair.
    pub const DEPTH: &str = "/api/3/depth";
    /// Recent trades per pair.
    pub const TRADES: &str = "/api/3/trades";
}

/// Trading endpoint. Every signed request is a POST to this path; the
/// operation is selected by the `method` body parameter.
pub const TRADE_API: &str = "/tapi/";

/// Values of the `method` parameter for signed requests.
pub mod method {
    /// Account balances and key rights.
    pub const GET_INFO: &str = "getInfo";
    /// Place an order.
    pub const TRADE: &str = "Trade";
    /// Open orders for a pair.
    pub const ACTIVE_ORDERS: &str = "ActiveOrders";
    /// Details of one order.
    pub const ORDER_INFO: &str = "OrderInfo";
    /// Cancel an order.
    pub const CANCEL_ORDER: &str = "CancelOrder";
    /// Executed trades.
    pub const TRADE_HISTORY: &str = "TradeHistory";
    /// Deposit address for a coin.
    pub const GET_DEPOSIT_ADDRESS: &str = "GetDepositAddress";
    /// Withdraw to an external address.
    pub const WITHDRAW_COINS_TO_ADDRESS: &str = "WithdrawCoinsToAddress";
    /// Issue a coupon.
    pub const CREATE_YOBICODE: &str = "CreateYobicode";
    /// Redeem a coupon.
    pub const REDEEM_YOBICODE: &str = "RedeemYobicode";
}

//! Trading API endpoints (authentication required).

mod client;
pub mod params;
mod types;

pub use client::{TradeClient, TradeClientBuilder};
pub use params::{ParameterSet, SignedRequest, build};
pub use types::*;

use std::collections::HashMap;

use crate::error::YobitError;
use crate::rest::http::{decode_result, decode_return};

impl TradeClient {
    /// Get account balances and key permissions.
    pub async fn get_info(&self) -> Result<AccountInfo, YobitError> {
        let body = self.signed_post(&GetInfoRequest).await?;
        decode_result(&body)
    }

    /// Place an order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::str::FromStr;
    /// use std::sync::Arc;
    /// use rust_decimal::Decimal;
    /// use yobit_api_client::TradeType;
    /// use yobit_api_client::auth::StaticCredentials;
    /// use yobit_api_client::rest::trade::{TradeClient, TradeRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = TradeClient::new(Arc::new(StaticCredentials::new("key", "secret")));
    ///     let request = TradeRequest::new(
    ///         "ltc_btc",
    ///         TradeType::Buy,
    ///         Decimal::from_str("0.01")?,
    ///         Decimal::from(10),
    ///     );
    ///     let result = client.trade(&request).await?;
    ///     println!("Order {} remains {}", result.order_id, result.remains);
    ///     Ok(())
    /// }
    /// ```
    pub async fn trade(&self, request: &TradeRequest) -> Result<TradeResult, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Get open orders for a pair, keyed by order ID.
    pub async fn active_orders(
        &self,
        request: &ActiveOrdersRequest,
    ) -> Result<HashMap<u64, ActiveOrder>, YobitError> {
        let body = self.signed_post(request).await?;
        Ok(decode_return(&body)?.unwrap_or_default())
    }

    /// Get details of an order, keyed by order ID.
    pub async fn order_info(
        &self,
        request: &OrderInfoRequest,
    ) -> Result<HashMap<u64, OrderDetails>, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Cancel an order.
    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<CancelOrderResult, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Get executed trades, keyed by trade ID.
    pub async fn trade_history(
        &self,
        request: &TradeHistoryRequest,
    ) -> Result<HashMap<u64, TradeRecord>, YobitError> {
        let body = self.signed_post(request).await?;
        Ok(decode_return(&body)?.unwrap_or_default())
    }

    /// Get a deposit address.
    pub async fn get_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddress, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Withdraw to an external address.
    pub async fn withdraw_coins_to_address(
        &self,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResult, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Create a Yobicode (coupon).
    pub async fn create_yobicode(
        &self,
        request: &CreateYobicodeRequest,
    ) -> Result<CreatedYobicode, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }

    /// Redeem a Yobicode (coupon).
    pub async fn redeem_yobicode(
        &self,
        request: &RedeemYobicodeRequest,
    ) -> Result<RedeemedYobicode, YobitError> {
        let body = self.signed_post(request).await?;
        decode_result(&body)
    }
}

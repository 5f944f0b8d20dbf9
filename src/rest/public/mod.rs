//! Public REST API endpoints (no authentication required).

mod client;
mod types;

pub use client::{PublicClient, PublicClientBuilder};
pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::YobitError;
use crate::rest::endpoints::public;

impl PublicClient {
    /// Get the server time and metadata of every active pair.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use yobit_api_client::rest::public::PublicClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PublicClient::new();
    ///     let info = client.info().await?;
    ///     println!("Server time: {}, {} pairs", info.server_time, info.pairs.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn info(&self) -> Result<Info, YobitError> {
        self.public_post(public::INFO, None, &NoParams {}).await
    }

    /// Get 24h statistics for one or more pairs.
    pub async fn ticker(&self, request: &TickerRequest) -> Result<HashMap<String, Ticker>, YobitError> {
        if request.pairs.iter().all(|p| p.is_empty()) {
            return Err(YobitError::InvalidArgument("at least one pair is required".to_string()));
        }
        let pairs = request
            .pairs
            .iter()
            .filter(|p| !p.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("-");
        self.public_post(public::TICKER, Some(&pairs), &NoParams {}).await
    }

    /// Get the order book of a pair, keyed by pair.
    pub async fn depth(&self, request: &DepthRequest) -> Result<HashMap<String, OrderBook>, YobitError> {
        require_pair(&request.pair)?;
        self.public_post(public::DEPTH, Some(&request.pair), request).await
    }

    /// Get recent trades of a pair.
    pub async fn trades(&self, request: &TradesRequest) -> Result<Trades, YobitError> {
        require_pair(&request.pair)?;
        self.public_post(public::TRADES, Some(&request.pair), request).await
    }

    /// Best `(sell, buy)` prices of a pair, taken from its ticker.
    pub async fn best_prices(&self, pair: &str) -> Result<(Decimal, Decimal), YobitError> {
        let tickers = self.ticker(&TickerRequest::new([pair])).await?;
        let ticker = tickers.get(pair).ok_or_else(|| YobitError::Decode {
            message: format!("Ticker response has no entry for {pair}"),
            body: String::new(),
        })?;
        Ok((ticker.sell, ticker.buy))
    }
}

#[derive(serde::Serialize)]
struct NoParams {}

fn require_pair(pair: &str) -> Result<(), YobitError> {
    if pair.is_empty() {
        return Err(YobitError::InvalidArgument("pair is required".to_string()));
    }
    Ok(())
}

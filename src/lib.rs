//! # Yobit Client
//!
//! An async Rust client library for the Yobit exchange public and trading APIs.
//!
//! ## Features
//!
//! - Public market data: pair info, ticker, order book, recent trades
//! - Trading API: balances, orders, trade history, deposits, withdrawals, Yobicodes
//! - HMAC-SHA512 request signing
//! - Nonces persisted per API key, so restarts never reuse a nonce
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yobit_api_client::rest::public::{PublicClient, TickerRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PublicClient::new();
//!     let tickers = client.ticker(&TickerRequest::new(["ltc_btc"])).await?;
//!     println!("Last: {:?}", tickers["ltc_btc"].last);
//!     Ok(())
//! }
//! ```

pub mod auth;
mod client;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use client::{YobitClient, YobitClientBuilder};
pub use error::{ApiError, YobitError};
pub use types::common::{SortOrder, TradeSide, TradeType};

/// Result type alias using YobitError
pub type Result<T> = std::result::Result<T, YobitError>;

//! Example: Telling Yobit errors apart.
//!
//! Run with: cargo run --example error_handling

use rust_decimal::Decimal;
use yobit_api_client::rest::trade::WithdrawRequest;
use yobit_api_client::{ApiError, YobitClient, YobitError};

#[tokio::main]
async fn main() {
    let api_error = ApiError::new("invalid nonce (has already been used)");
    println!("API error: {}", api_error);
    println!("Is invalid nonce: {}", api_error.is_invalid_nonce());

    let client = YobitClient::new("api_key", "api_secret");

    // Missing required fields are rejected locally without touching the nonce.
    let request = WithdrawRequest::new("BTC", Decimal::ZERO, "address");
    match client.trade.withdraw_coins_to_address(&request).await {
        Err(YobitError::InvalidArgument(message)) => println!("Rejected locally: {}", message),
        Err(YobitError::Api(inner)) if inner.is_invalid_key() => println!("Bad key: {}", inner),
        Err(YobitError::Storage { key, source }) => println!("Nonce record {} failed: {}", key, source),
        Err(other) => println!("Other error: {}", other),
        Ok(result) => println!("Withdrawn at {}", result.server_time),
    }
}

//! Example: Trading API account endpoints.
//!
//! Reads YOBIT_API_KEY and YOBIT_API_SECRET. Nonces are persisted to
//! `nonce.<key prefix>.txt` in the current directory so they keep
//! increasing across runs.
//!
//! Run with: cargo run --example trade_account

use std::sync::Arc;

use yobit_api_client::auth::EnvCredentials;
use yobit_api_client::rest::trade::{ActiveOrdersRequest, TradeClient, TradeHistoryRequest};
use yobit_api_client::SortOrder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set YOBIT_API_KEY and YOBIT_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let client = TradeClient::builder(credentials)
        .user_agent("yobit-api-client-examples/trade_account")
        .build();

    println!("=== Account ===");
    let info = client.get_info().await?;
    println!(
        "Rights: info={} trade={} withdraw={}",
        info.rights.info, info.rights.trade, info.rights.withdraw
    );
    for (coin, amount) in info.funds.iter().filter(|(_, amount)| !amount.is_zero()) {
        println!("{}: {}", coin, amount);
    }

    println!("\n=== Active orders (ltc_btc) ===");
    let orders = client.active_orders(&ActiveOrdersRequest::new("ltc_btc")).await?;
    for (id, order) in &orders {
        println!("{} {} {} @ {}", id, order.trade_type, order.amount, order.rate);
    }

    println!("\n=== Trade history (ltc_btc) ===");
    let history = client
        .trade_history(&TradeHistoryRequest::new("ltc_btc").count(10).order(SortOrder::Desc))
        .await?;
    for (id, trade) in &history {
        println!("{} {} {} @ {}", id, trade.trade_type, trade.amount, trade.rate);
    }

    Ok(())
}

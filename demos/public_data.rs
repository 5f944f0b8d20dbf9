//! Example: Fetching public market data from Yobit.
//!
//! Public endpoints need no credentials.
//!
//! Run with: cargo run --example public_data

use std::time::{SystemTime, UNIX_EPOCH};

use yobit_api_client::rest::public::{
    DepthRequest, PublicClient, TickerRequest, TradesRequest, price_before,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PublicClient::new();

    println!("=== Info ===");
    let info = client.info().await?;
    println!("Server time: {}", info.server_time);
    println!("Active pairs: {}", info.pairs.len());
    if let Some(pair) = info.pairs.get("ltc_btc") {
        println!(
            "ltc_btc: decimals={}, min_amount={}, fee={}%",
            pair.decimal_places, pair.min_amount, pair.fee
        );
    }

    println!("\n=== Ticker ===");
    let tickers = client.ticker(&TickerRequest::new(["ltc_btc", "eth_btc"])).await?;
    for (pair, ticker) in &tickers {
        println!(
            "{}: last={} buy={} sell={} vol={}",
            pair, ticker.last, ticker.buy, ticker.sell, ticker.vol
        );
    }

    println!("\n=== Best prices (doge_btc) ===");
    let (sell, buy) = client.best_prices("doge_btc").await?;
    println!("sell={} buy={}", sell, buy);

    println!("\n=== Depth (ltc_btc, 5 levels) ===");
    let books = client.depth(&DepthRequest::new("ltc_btc").limit(5)).await?;
    if let Some(book) = books.get("ltc_btc") {
        for (price, amount) in &book.asks {
            println!("ask {} x {}", price, amount);
        }
        for (price, amount) in &book.bids {
            println!("bid {} x {}", price, amount);
        }
    }

    println!("\n=== Trades (ltc_btc) ===");
    let trades = client.trades(&TradesRequest::new("ltc_btc").limit(20)).await?;
    let (asks, bids) = trades.separate("ltc_btc");
    println!("{} asks, {} bids", asks.len(), bids.len());

    let hour_ago = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64 - 3600;
    match price_before(trades.get("ltc_btc"), hour_ago) {
        Some(price) => println!("Price an hour ago: {}", price),
        None => println!("No trade older than an hour in this window"),
    }

    Ok(())
}

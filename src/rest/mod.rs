//! Yobit REST API clients.
//!
//! - [`public`] - market data, no authentication
//! - [`trade`] - account and order management, signed with the API key

mod endpoints;
mod http;
pub mod public;
pub mod trade;

pub use endpoints::*;
pub use public::PublicClient;
pub use trade::TradeClient;

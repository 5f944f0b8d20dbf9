//! Combined client holding both API surfaces.

use std::sync::Arc;

use crate::auth::{CredentialsProvider, NonceMode, NonceProvider, StaticCredentials};
use crate::rest::public::PublicClient;
use crate::rest::trade::TradeClient;

/// Public and trading clients sharing one set of credentials.
///
/// Both halves are independent; use [`PublicClient`] or [`TradeClient`]
/// directly if only one is needed.
///
/// # Example
///
/// ```rust,no_run
/// use yobit_api_client::YobitClient;
/// use yobit_api_client::rest::public::DepthRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = YobitClient::new("api_key", "api_secret");
///
///     let book = client.public.depth(&DepthRequest::new("ltc_btc").limit(10)).await?;
///     let info = client.trade.get_info().await?;
///     println!("{:?} {:?}", book.get("ltc_btc"), info.funds);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YobitClient {
    /// Market-data API.
    pub public: PublicClient,
    /// Trading API.
    pub trade: TradeClient,
}

impl YobitClient {
    /// Create a client with default settings.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::builder(Arc::new(StaticCredentials::new(api_key, api_secret))).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: Arc<dyn CredentialsProvider>) -> YobitClientBuilder {
        YobitClientBuilder::new(credentials)
    }
}

/// Builder for [`YobitClient`].
pub struct YobitClientBuilder {
    credentials: Arc<dyn CredentialsProvider>,
    base_url: Option<String>,
    user_agent: Option<String>,
    nonce_mode: NonceMode,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
}

impl YobitClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            base_url: None,
            user_agent: None,
            nonce_mode: NonceMode::default(),
            nonce_provider: None,
        }
    }

    /// Set the base URL of both APIs (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Choose persistent or in-memory nonces for the trading client.
    pub fn nonce_mode(mut self, mode: NonceMode) -> Self {
        self.nonce_mode = mode;
        self
    }

    /// Use a custom nonce provider. Takes precedence over [`Self::nonce_mode`].
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Build the client.
    pub fn build(self) -> YobitClient {
        let mut public = PublicClient::builder();
        let mut trade = TradeClient::builder(self.credentials).nonce_mode(self.nonce_mode);

        if let Some(url) = self.base_url {
            public = public.base_url(url.clone());
            trade = trade.base_url(url);
        }
        if let Some(user_agent) = self.user_agent {
            public = public.user_agent(user_agent.clone());
            trade = trade.user_agent(user_agent);
        }
        if let Some(provider) = self.nonce_provider {
            trade = trade.nonce_provider(provider);
        }

        YobitClient {
            public: public.build(),
            trade: trade.build(),
        }
    }
}

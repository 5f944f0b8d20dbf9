//! Yobit trading API client implementation.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;

use crate::auth::{CredentialsProvider, NonceMode, NonceProvider, record_name, sign_request};
use crate::error::YobitError;
use crate::rest::endpoints::{TRADE_API, YOBIT_BASE_URL};
use crate::rest::http::{build_http_client, read_body};
use crate::rest::trade::params::SignedRequest;

/// The Yobit trading API client.
///
/// Every call draws a fresh nonce for the configured key, signs the
/// form-encoded body with HMAC-SHA512 and POSTs it to `/tapi/`. Calls are never
/// retried.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use yobit_api_client::auth::StaticCredentials;
/// use yobit_api_client::rest::trade::TradeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = TradeClient::new(credentials);
///
///     let info = client.get_info().await?;
///     println!("Funds: {:?}", info.funds);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TradeClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl TradeClient {
    /// Create a client with default settings: persistent nonces in the
    /// current directory.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::builder(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: Arc<dyn CredentialsProvider>) -> TradeClientBuilder {
        TradeClientBuilder::new(credentials)
    }

    /// Issue the next nonce for the configured key.
    ///
    /// Storage access is blocking, so it runs on the blocking thread pool.
    async fn next_nonce(&self, api_key: &str) -> Result<u64, YobitError> {
        let provider = self.nonce_provider.clone();
        let key = api_key.to_string();
        tokio::task::spawn_blocking(move || provider.next_nonce(&key))
            .await
            .map_err(|e| YobitError::storage(record_name(api_key), std::io::Error::other(e)))?
    }

    /// Validate, sign and send `request`, returning the raw response body.
    ///
    /// Invalid requests fail before a nonce is drawn; a nonce that cannot be
    /// persisted fails before anything is sent.
    pub(crate) async fn signed_post<R: SignedRequest>(
        &self,
        request: &R,
    ) -> Result<String, YobitError> {
        let params = request.params()?;

        let creds = self.credentials.get_credentials();
        let nonce = self.next_nonce(&creds.api_key).await?;

        let body = params.authenticate(R::METHOD, nonce).encode()?;
        let signature = sign_request(creds, &body);

        tracing::debug!(method = R::METHOD, nonce, "Sending signed request");

        let url = format!("{}{}", self.base_url, TRADE_API);
        let response = self
            .http_client
            .post(&url)
            .header("Key", &creds.api_key)
            .header("Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        read_body(response).await
    }
}

impl std::fmt::Debug for TradeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeClient")
            .field("base_url", &self.base_url)
            .field("credentials", self.credentials.get_credentials())
            .finish()
    }
}

/// Builder for [`TradeClient`].
pub struct TradeClientBuilder {
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_mode: NonceMode,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
}

impl TradeClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            base_url: YOBIT_BASE_URL.to_string(),
            credentials,
            nonce_mode: NonceMode::default(),
            nonce_provider: None,
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Choose persistent or in-memory nonces.
    pub fn nonce_mode(mut self, mode: NonceMode) -> Self {
        self.nonce_mode = mode;
        self
    }

    /// Persist nonce records in `dir`.
    pub fn nonce_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.nonce_mode(NonceMode::Persistent { dir: dir.into() })
    }

    /// Keep nonces in memory only.
    pub fn ephemeral_nonce(self) -> Self {
        self.nonce_mode(NonceMode::Ephemeral)
    }

    /// Use a custom nonce provider. Takes precedence over [`Self::nonce_mode`].
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> TradeClient {
        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| self.nonce_mode.into_provider());

        TradeClient {
            http_client: build_http_client(self.user_agent),
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

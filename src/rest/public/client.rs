//! Yobit public API client implementation.

use reqwest_middleware::ClientWithMiddleware;

use crate::error::YobitError;
use crate::rest::endpoints::YOBIT_BASE_URL;
use crate::rest::http::{build_http_client, decode, read_body};

/// The Yobit public market-data client.
///
/// Needs no credentials. Pairs are sent as a path segment and optional
/// parameters as query values.
#[derive(Clone)]
pub struct PublicClient {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl PublicClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> PublicClientBuilder {
        PublicClientBuilder::new()
    }

    /// POST to `endpoint[/pairs]` with `params` as query values.
    pub(crate) async fn public_post<T, Q>(
        &self,
        endpoint: &str,
        pairs: Option<&str>,
        params: &Q,
    ) -> Result<T, YobitError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let query_string =
            serde_urlencoded::to_string(params).map_err(|e| YobitError::Encode(e.to_string()))?;

        let mut url = format!("{}{}", self.base_url, endpoint);
        if let Some(pairs) = pairs {
            url.push('/');
            url.push_str(pairs);
        }
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        let response = self.http_client.post(&url).send().await?;
        let body = read_body(response).await?;
        decode(&body)
    }
}

impl Default for PublicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for [`PublicClient`].
pub struct PublicClientBuilder {
    base_url: String,
    user_agent: Option<String>,
}

impl PublicClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: YOBIT_BASE_URL.to_string(),
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> PublicClient {
        PublicClient {
            http_client: build_http_client(self.user_agent),
            base_url: self.base_url,
        }
    }
}

impl Default for PublicClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

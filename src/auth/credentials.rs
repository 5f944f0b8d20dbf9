//! Credential management for Yobit trading API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Number of leading key characters used to name the nonce record.
const KEY_PREFIX_LEN: usize = 8;

/// API credentials containing the key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier, sent in the `Key` header)
    pub api_key: String,
    /// The API secret (private, only ever used as the HMAC key)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Filename-safe, non-secret prefix of the API key.
    ///
    /// This is a naming convention for the nonce record, not a security boundary.
    pub fn key_prefix(&self) -> String {
        key_prefix(&self.api_key)
    }
}

/// First eight characters of `api_key`, with anything outside `[A-Za-z0-9_-]` replaced by `_`.
pub(crate) fn key_prefix(api_key: &str) -> String {
    api_key
        .chars()
        .take(KEY_PREFIX_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `YOBIT_API_KEY` and `YOBIT_API_SECRET`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Default environment variable holding the API key.
    pub const KEY_VAR: &'static str = "YOBIT_API_KEY";
    /// Default environment variable holding the API secret.
    pub const SECRET_VAR: &'static str = "YOBIT_API_SECRET";

    /// Try to create credentials from default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(Self::KEY_VAR, Self::SECRET_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if either variable is not set or is empty.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok().filter(|v| !v.is_empty())?;
        let api_secret = std::env::var(secret_var).ok().filter(|v| !v.is_empty())?;

        Some(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

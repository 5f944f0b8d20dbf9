//! HMAC-SHA512 signature generation for Yobit trading API authentication.
//!
//! Yobit trading endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA512(POST_data, api_secret))
//! ```
//!
//! `POST_data` must be exactly the bytes sent as the request body. The signature
//! is sent lowercase-hex encoded in the `Sign` header.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::Credentials;

type HmacSha512 = Hmac<Sha512>;

/// Sign a canonical request body with a raw secret key.
///
/// # Example
///
/// ```rust
/// use yobit_api_client::auth::sign;
///
/// let tag = sign("api_secret", b"method=getInfo&nonce=1");
/// assert_eq!(tag.len(), 128);
/// ```
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = match HmacSha512::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA512 accepts keys of any length"),
    };
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Sign a URL-encoded POST body for Yobit's trading API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `post_data` - The URL-encoded POST body, exactly as transmitted
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA512 signature.
pub fn sign_request(credentials: &Credentials, post_data: &str) -> String {
    sign(credentials.expose_secret(), post_data.as_bytes())
}

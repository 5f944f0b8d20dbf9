//! HTTP plumbing shared by the public and trading clients.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, YobitError};
use crate::types::serde_helpers::int_or_bool;

/// Build the HTTP client used by both sub-clients.
///
/// Requests are traced but never retried: a retried signed request would
/// replay its nonce.
pub(crate) fn build_http_client(user_agent: Option<String>) -> ClientWithMiddleware {
    let mut headers = HeaderMap::new();
    let user_agent =
        user_agent.unwrap_or_else(|| format!("yobit-api-client/{}", env!("CARGO_PKG_VERSION")));
    let header_value = HeaderValue::from_str(&user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("yobit-api-client"));
    headers.insert(USER_AGENT, header_value);

    let reqwest_client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    ClientBuilder::new(reqwest_client)
        .with(TracingMiddleware::default())
        .build()
}

/// The fields every Yobit response may carry.
#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default, deserialize_with = "int_or_bool::deserialize_option")]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Envelope of a trading API response.
#[derive(Debug, Deserialize)]
struct TradeEnvelope<T> {
    #[serde(rename = "return")]
    result: Option<T>,
}

/// Read the full body, surfacing application failures before HTTP status errors.
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, YobitError> {
    let status_error = response.error_for_status_ref().err();
    let body = response.text().await?;

    check_failure(&body)?;
    if let Some(err) = status_error {
        return Err(err.into());
    }
    Ok(body)
}

/// Fail with [`YobitError::Api`] if the body reports `success: 0`.
///
/// Bodies that are not JSON objects, or carry no `success` field, pass through
/// and are left to the typed decoder.
pub(crate) fn check_failure(body: &str) -> Result<(), YobitError> {
    let Ok(status) = serde_json::from_str::<Status>(body) else {
        return Ok(());
    };

    if status.success == Some(false) {
        let message = status.error.unwrap_or_default();
        tracing::warn!(error = %message, "Yobit reported failure");
        return Err(YobitError::Api(ApiError::new(message)));
    }
    Ok(())
}

/// Decode a public API body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, YobitError> {
    serde_json::from_str(body).map_err(|e| decode_error(e, body))
}

/// Decode the `return` payload of a trading API body.
///
/// A missing `return` is `Ok(None)`; Yobit omits it for empty listings.
pub(crate) fn decode_return<T: DeserializeOwned>(body: &str) -> Result<Option<T>, YobitError> {
    let envelope: TradeEnvelope<T> = decode(body)?;
    Ok(envelope.result)
}

/// Decode the `return` payload of a trading API body, failing if it is absent.
pub(crate) fn decode_result<T: DeserializeOwned>(body: &str) -> Result<T, YobitError> {
    decode_return(body)?.ok_or_else(|| YobitError::Decode {
        message: "Response missing 'return' field".to_string(),
        body: body.to_string(),
    })
}

fn decode_error(err: serde_json::Error, body: &str) -> YobitError {
    YobitError::Decode {
        message: err.to_string(),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_failure_message_is_verbatim() {
        let err = check_failure(r#"{"success":0,"error":"Invalid pair name: foo_bar"}"#)
            .unwrap_err();
        match err {
            YobitError::Api(api) => assert_eq!(api.message, "Invalid pair name: foo_bar"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_boolean_failure() {
        assert!(matches!(
            check_failure(r#"{"success":false,"error":"invalid key"}"#),
            Err(YobitError::Api(_))
        ));
    }

    #[test]
    fn test_success_and_untagged_bodies_pass() {
        assert!(check_failure(r#"{"success":1,"return":{}}"#).is_ok());
        assert!(check_failure(r#"{"ltc_btc":{"last":0.01}}"#).is_ok());
        assert!(check_failure("<html>busy</html>").is_ok());
        assert!(check_failure("[1,2]").is_ok());
    }

    #[test]
    fn test_decode_return() {
        let value: Option<HashMap<String, u64>> =
            decode_return(r#"{"success":1,"return":{"order_id":7}}"#).unwrap();
        assert_eq!(value.unwrap()["order_id"], 7);

        let missing: Option<HashMap<String, u64>> = decode_return(r#"{"success":1}"#).unwrap();
        assert!(missing.is_none());

        let err = decode_result::<HashMap<String, u64>>(r#"{"success":1}"#).unwrap_err();
        assert!(matches!(err, YobitError::Decode { .. }));
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let err = decode::<HashMap<String, u64>>("<html>busy</html>").unwrap_err();
        match err {
            YobitError::Decode { body, .. } => assert_eq!(body, "<html>busy</html>"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_return_keeps_body() {
        let err = decode_result::<HashMap<String, u64>>(r#"{"success":1}"#).unwrap_err();
        match err {
            YobitError::Decode { body, .. } => assert_eq!(body, r#"{"success":1}"#),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = decode_return::<HashMap<String, u64>>(r#"{"success":1,"return":[1]}"#).unwrap_err();
        assert!(matches!(err, YobitError::Decode { ref body, .. } if !body.is_empty()));
    }
}

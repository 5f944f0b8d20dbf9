//! Canonical parameter sets for signed trading requests.
//!
//! Optional fields are only sent when they differ from their zero value
//! (`0`, `""`, `None`, `false`); there is no way to send an explicit zero.
//! Required fields that are missing or zero fail with
//! [`YobitError::InvalidArgument`] before a nonce is drawn.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::YobitError;
use crate::rest::endpoints::method;
use crate::rest::trade::types::{
    ActiveOrdersRequest, CancelOrderRequest, CreateYobicodeRequest, DepositAddressRequest,
    GetInfoRequest, OrderInfoRequest, RedeemYobicodeRequest, TradeHistoryRequest, TradeRequest,
    WithdrawRequest,
};

/// Name/value pairs of one signed request.
///
/// Keys are kept sorted, so [`ParameterSet::encode`] is deterministic. The
/// encoded string is both the POST body and the signed message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Get a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add the `method` and `nonce` parameters every signed request carries.
    pub fn authenticate(mut self, method: &str, nonce: u64) -> Self {
        self.insert("method", method);
        self.insert("nonce", nonce.to_string());
        self
    }

    /// URL-encode as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> Result<String, YobitError> {
        serde_urlencoded::to_string(&self.params).map_err(|e| YobitError::Encode(e.to_string()))
    }

    fn require_str(&mut self, name: &str, value: &str) -> Result<(), YobitError> {
        if value.is_empty() {
            return Err(missing(name));
        }
        self.insert(name, value);
        Ok(())
    }

    fn require_u64(&mut self, name: &str, value: u64) -> Result<(), YobitError> {
        if value == 0 {
            return Err(missing(name));
        }
        self.insert(name, value.to_string());
        Ok(())
    }

    fn require_decimal(&mut self, name: &str, value: Decimal) -> Result<(), YobitError> {
        if value.is_zero() {
            return Err(missing(name));
        }
        self.insert(name, format_decimal(value));
        Ok(())
    }

    fn optional_str(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.insert(name, value);
        }
    }

    fn optional_u64(&mut self, name: &str, value: u64) {
        if value != 0 {
            self.insert(name, value.to_string());
        }
    }

    fn optional_decimal(&mut self, name: &str, value: Decimal) {
        if !value.is_zero() {
            self.insert(name, format_decimal(value));
        }
    }
}

fn missing(name: &str) -> YobitError {
    YobitError::InvalidArgument(format!("{name} is required"))
}

/// Shortest exact decimal form: `0.0100` is sent as `0.01`, `10.0` as `10`.
fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// A typed request for one trading method.
pub trait SignedRequest {
    /// Value of the `method` parameter.
    const METHOD: &'static str;

    /// Operation-specific parameters, without `method` and `nonce`.
    fn params(&self) -> Result<ParameterSet, YobitError>;
}

/// Assemble the full parameter set for `request` with `nonce`.
pub fn build<R: SignedRequest>(request: &R, nonce: u64) -> Result<ParameterSet, YobitError> {
    Ok(request.params()?.authenticate(R::METHOD, nonce))
}

impl SignedRequest for GetInfoRequest {
    const METHOD: &'static str = method::GET_INFO;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        Ok(ParameterSet::new())
    }
}

impl SignedRequest for TradeRequest {
    const METHOD: &'static str = method::TRADE;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("pair", &self.pair)?;
        params.optional_str("type", self.trade_type.as_ref().map(|t| t.as_str()));
        params.optional_decimal("rate", self.rate);
        params.optional_decimal("amount", self.amount);
        Ok(params)
    }
}

impl SignedRequest for ActiveOrdersRequest {
    const METHOD: &'static str = method::ACTIVE_ORDERS;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("pair", &self.pair)?;
        Ok(params)
    }
}

impl SignedRequest for OrderInfoRequest {
    const METHOD: &'static str = method::ORDER_INFO;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_u64("order_id", self.order_id)?;
        Ok(params)
    }
}

impl SignedRequest for CancelOrderRequest {
    const METHOD: &'static str = method::CANCEL_ORDER;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_u64("order_id", self.order_id)?;
        Ok(params)
    }
}

impl SignedRequest for TradeHistoryRequest {
    const METHOD: &'static str = method::TRADE_HISTORY;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("pair", &self.pair)?;
        params.optional_u64("From", self.from);
        params.optional_u64("Count", self.count);
        params.optional_u64("FromID", self.from_id);
        params.optional_u64("EndID", self.end_id);
        params.optional_str("Order", self.order.as_ref().map(|o| o.as_str()));
        params.optional_u64("Since", self.since);
        params.optional_u64("End", self.end);
        Ok(params)
    }
}

impl SignedRequest for DepositAddressRequest {
    const METHOD: &'static str = method::GET_DEPOSIT_ADDRESS;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("coinName", &self.coin_name)?;
        params.optional_u64("need_new", u64::from(self.need_new));
        Ok(params)
    }
}

impl SignedRequest for WithdrawRequest {
    const METHOD: &'static str = method::WITHDRAW_COINS_TO_ADDRESS;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("coinName", &self.coin_name)?;
        params.require_decimal("amount", self.amount)?;
        params.require_str("address", &self.address)?;
        Ok(params)
    }
}

impl SignedRequest for CreateYobicodeRequest {
    const METHOD: &'static str = method::CREATE_YOBICODE;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("coinName", &self.currency)?;
        params.require_decimal("amount", self.amount)?;
        Ok(params)
    }
}

impl SignedRequest for RedeemYobicodeRequest {
    const METHOD: &'static str = method::REDEEM_YOBICODE;

    fn params(&self) -> Result<ParameterSet, YobitError> {
        let mut params = ParameterSet::new();
        params.require_str("coupon", &self.coupon)?;
        Ok(params)
    }
}

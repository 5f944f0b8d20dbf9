//! Authentication module for the Yobit trading API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Persistent, per-key nonce counters for replay protection
//! - HMAC-SHA512 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use nonce::{
    FileNonceStorage, MemoryNonceStorage, NonceMode, NonceProvider, NonceStorage, StoredNonce,
    record_name,
};
pub use signature::{sign, sign_request};

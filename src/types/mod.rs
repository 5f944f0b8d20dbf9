//! Common types used across the Yobit client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;

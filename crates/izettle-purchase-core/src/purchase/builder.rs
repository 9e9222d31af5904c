use serde::de::DeserializeOwned;

use crate::error::CoreError;

use super::types::{Purchase, PurchaseHistory};

/// Maps a raw single-purchase payload into a [`Purchase`].
pub trait PurchaseBuilder: Send + Sync {
    fn build_from_json(&self, json: serde_json::Value) -> Result<Purchase, CoreError>;
}

/// Maps a raw history payload into a [`PurchaseHistory`].
pub trait PurchaseHistoryBuilder: Send + Sync {
    fn build_from_json(&self, json: serde_json::Value) -> Result<PurchaseHistory, CoreError>;
}

/// Serde-backed [`PurchaseBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPurchaseBuilder;

impl PurchaseBuilder for JsonPurchaseBuilder {
    fn build_from_json(&self, json: serde_json::Value) -> Result<Purchase, CoreError> {
        decode(json, "purchase")
    }
}

/// Serde-backed [`PurchaseHistoryBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPurchaseHistoryBuilder;

impl PurchaseHistoryBuilder for JsonPurchaseHistoryBuilder {
    fn build_from_json(&self, json: serde_json::Value) -> Result<PurchaseHistory, CoreError> {
        decode(json, "purchase history")
    }
}

fn decode<T: DeserializeOwned>(json: serde_json::Value, what: &str) -> Result<T, CoreError> {
    serde_json::from_value(json)
        .map_err(|e| CoreError::InvalidPurchaseData(format!("invalid {what} payload: {e}")))
}

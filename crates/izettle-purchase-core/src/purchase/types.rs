//! Purchase domain types as delivered by the purchase API.
//!
//! Field names follow the API's camelCase JSON; unknown fields are ignored
//! so newer payloads still deserialize.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// Purchase
// ==============================================================================

/// A single completed transaction. Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Short, URL-safe identifier used by the API internally.
    #[serde(rename = "purchaseUUID")]
    pub purchase_uuid: String,
    /// Canonical UUID, the form accepted by the single-purchase endpoint.
    #[serde(rename = "purchaseUUID1", default)]
    pub purchase_uuid1: Option<Uuid>,
    pub amount: i64,
    #[serde(default)]
    pub vat_amount: i64,
    pub country: String,
    pub currency: String,
    pub timestamp: String,
    pub purchase_number: u64,
    #[serde(default)]
    pub global_purchase_number: Option<u64>,
    #[serde(default)]
    pub user_display_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub refund: bool,
    #[serde(default)]
    pub refunded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Kept as text: the API sends decimal quantities as strings.
    pub quantity: String,
    pub unit_price: i64,
    #[serde(default)]
    pub vat_percentage: Option<f64>,
    #[serde(default)]
    pub variant_name: Option<String>,
    #[serde(default)]
    pub product_uuid: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub uuid: Uuid,
    pub amount: i64,
    #[serde(rename = "type")]
    pub payment_type: String,
}

// ==============================================================================
// Purchase History
// ==============================================================================

/// One page of purchases. `last_purchase_hash` is the cursor for the next
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistory {
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    #[serde(default)]
    pub first_purchase_hash: Option<String>,
    #[serde(default)]
    pub last_purchase_hash: Option<String>,
    #[serde(default)]
    pub link_urls: Vec<String>,
}

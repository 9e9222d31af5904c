//! Shared test helpers for `izettle-purchase-core` unit tests.
//!
//! Builders for raw purchase payloads (`purchase_json`, `history_json`) and
//! their decoded counterparts (`purchase`, `history`), so tests across
//! modules share one source of dummy data.

use uuid::Uuid;

use crate::purchase::{Payment, Product, Purchase, PurchaseHistory};

// ==============================================================================
// Identifier Helpers
// ==============================================================================

/// Deterministic purchase UUID distinguished by its last byte.
pub fn purchase_id_from_byte(b: u8) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[0] = 0x5e;
    bytes[15] = b;
    Uuid::from_bytes(bytes)
}

// ==============================================================================
// Raw JSON Payloads
// ==============================================================================

/// A purchase payload shaped like the API's: one product, one card payment.
pub fn purchase_json(id: Uuid, number: u64) -> serde_json::Value {
    serde_json::json!({
        "purchaseUUID": format!("short-{number}"),
        "purchaseUUID1": id.to_string(),
        "amount": 1250,
        "vatAmount": 217,
        "country": "NL",
        "currency": "EUR",
        "timestamp": "2018-03-01T12:00:00.000+0000",
        "purchaseNumber": number,
        "globalPurchaseNumber": number + 100,
        "userDisplayName": "Till 1",
        "userId": 42,
        "organizationId": 7,
        "products": [{
            "name": "Coffee",
            "quantity": "2",
            "unitPrice": 625,
            "vatPercentage": 21.0,
            "variantName": "Large"
        }],
        "payments": [{
            "uuid": "6f3c1a2e-1d0b-11e8-b467-0ed5f89f718b",
            "amount": 1250,
            "type": "IZETTLE_CARD"
        }],
        "refund": false,
        "refunded": false
    })
}

pub fn history_json(
    purchases: Vec<serde_json::Value>,
    last_hash: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "purchases": purchases,
        "firstPurchaseHash": "hash-first",
        "lastPurchaseHash": last_hash,
        "linkUrls": []
    })
}

// ==============================================================================
// Domain Values
// ==============================================================================

pub fn purchase(id: Uuid, number: u64) -> Purchase {
    Purchase {
        purchase_uuid: format!("short-{number}"),
        purchase_uuid1: Some(id),
        amount: 1250,
        vat_amount: 217,
        country: "NL".into(),
        currency: "EUR".into(),
        timestamp: "2018-03-01T12:00:00.000+0000".into(),
        purchase_number: number,
        global_purchase_number: Some(number + 100),
        user_display_name: Some("Till 1".into()),
        user_id: Some(42),
        organization_id: Some(7),
        products: vec![Product {
            name: "Coffee".into(),
            quantity: "2".into(),
            unit_price: 625,
            vat_percentage: Some(21.0),
            variant_name: Some("Large".into()),
            product_uuid: None,
        }],
        payments: vec![Payment {
            uuid: "6f3c1a2e-1d0b-11e8-b467-0ed5f89f718b"
                .parse()
                .expect("static payment uuid must parse"),
            amount: 1250,
            payment_type: "IZETTLE_CARD".into(),
        }],
        refund: false,
        refunded: false,
    }
}

pub fn history(purchases: Vec<Purchase>, last_hash: Option<&str>) -> PurchaseHistory {
    PurchaseHistory {
        purchases,
        first_purchase_hash: Some("hash-first".into()),
        last_purchase_hash: last_hash.map(str::to_owned),
        link_urls: Vec::new(),
    }
}

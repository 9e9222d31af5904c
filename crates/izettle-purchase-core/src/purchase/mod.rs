//! Purchase API: history pages and single-purchase lookups.
//!
//! [`PurchaseClient`] composes an [`IzettleHttp`](crate::http::IzettleHttp)
//! transport with a [`PurchaseBuilder`] and a [`PurchaseHistoryBuilder`]
//! that map raw JSON into the domain types in [`types`].

mod builder;
mod client;
pub mod query;
pub mod types;

pub use builder::{
    JsonPurchaseBuilder, JsonPurchaseHistoryBuilder, PurchaseBuilder, PurchaseHistoryBuilder,
};
pub use client::{PurchaseClient, DEFAULT_BASE_URL};
pub use query::{PurchaseHistoryQuery, MAX_LIMIT};
pub use types::{Payment, Product, Purchase, PurchaseHistory};

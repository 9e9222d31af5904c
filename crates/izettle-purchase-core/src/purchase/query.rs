use std::collections::BTreeMap;

use crate::http::QueryValue;

use super::types::PurchaseHistory;

pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const LIMIT: &str = "limit";
pub const LAST_PURCHASE_HASH: &str = "lastPurchaseHash";
pub const DESCENDING: &str = "descending";

/// Largest page size the purchase API serves.
pub const MAX_LIMIT: u32 = 1000;

/// Query parameters for one purchase-history request.
///
/// Setters consume and return the query, so a configured value can be
/// passed to the client, cloned, or extended without touching any other
/// request. Each key holds at most one value; the last one set wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseHistoryQuery {
    params: BTreeMap<String, QueryValue>,
}

impl PurchaseHistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) an arbitrary query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Inclusive lower bound (ISO date). The server defaults to three years
    /// back when absent.
    pub fn start_date(self, date: impl Into<String>) -> Self {
        self.param(START_DATE, date.into())
    }

    /// Exclusive upper bound (ISO date).
    pub fn end_date(self, date: impl Into<String>) -> Self {
        self.param(END_DATE, date.into())
    }

    /// Maximum number of purchases per page. Anything above 999 is sent as
    /// [`MAX_LIMIT`].
    pub fn limit(self, limit: u32) -> Self {
        let limit = if limit > 999 { MAX_LIMIT } else { limit };
        self.param(LIMIT, limit)
    }

    /// Cursor: return purchases after the one with this hash.
    pub fn last_purchase_hash(self, hash: impl Into<String>) -> Self {
        self.param(LAST_PURCHASE_HASH, hash.into())
    }

    pub fn descending(self, descending: bool) -> Self {
        self.param(DESCENDING, descending)
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The parameters as sent on the wire, one pair per key.
    pub fn to_params(&self) -> Vec<(String, QueryValue)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The query for the page following `history`, or `None` when that page
    /// was empty or carried no cursor.
    pub fn next_page(&self, history: &PurchaseHistory) -> Option<Self> {
        if history.purchases.is_empty() {
            return None;
        }
        let cursor = history.last_purchase_hash.as_deref()?;
        Some(self.clone().last_purchase_hash(cursor))
    }
}

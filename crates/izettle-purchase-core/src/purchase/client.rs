use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;
use crate::http::{parse_base_url, IzettleHttp};

use super::builder::{
    JsonPurchaseBuilder, JsonPurchaseHistoryBuilder, PurchaseBuilder, PurchaseHistoryBuilder,
};
use super::query::PurchaseHistoryQuery;
use super::types::{Purchase, PurchaseHistory};

pub const DEFAULT_BASE_URL: &str = "https://purchase.izettle.com";

const PURCHASE_PATH: &str = "/purchase/v2";
const PURCHASES_PATH: &str = "/purchases/v2";

/// Client for the purchase API: history pages and single purchases.
///
/// Holds no per-request state; every history fetch takes its own
/// [`PurchaseHistoryQuery`], so one client can be shared across tasks.
pub struct PurchaseClient {
    http: Arc<dyn IzettleHttp>,
    history_builder: Arc<dyn PurchaseHistoryBuilder>,
    purchase_builder: Arc<dyn PurchaseBuilder>,
    base_url: String,
}

impl PurchaseClient {
    pub fn new(
        http: Arc<dyn IzettleHttp>,
        history_builder: Arc<dyn PurchaseHistoryBuilder>,
        purchase_builder: Arc<dyn PurchaseBuilder>,
    ) -> Self {
        Self {
            http,
            history_builder,
            purchase_builder,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Client using the serde-backed builders.
    pub fn with_json_builders(http: Arc<dyn IzettleHttp>) -> Self {
        Self::new(
            http,
            Arc::new(JsonPurchaseHistoryBuilder),
            Arc::new(JsonPurchaseBuilder),
        )
    }

    /// Point the client at another purchase API host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, CoreError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn purchase_url(&self, id: &Uuid) -> String {
        format!("{}{PURCHASE_PATH}/{}", self.base_url, id.hyphenated())
    }

    pub fn purchases_url(&self) -> String {
        format!("{}{PURCHASES_PATH}", self.base_url)
    }

    /// Fetch one page of purchase history. Transport errors propagate
    /// unchanged.
    pub async fn fetch_purchase_history(
        &self,
        query: &PurchaseHistoryQuery,
    ) -> Result<PurchaseHistory, CoreError> {
        let params = query.to_params();
        debug!(params = params.len(), "fetch purchase history");
        let response = self.http.get(&self.purchases_url(), &params).await?;
        let json = self.http.get_json(response)?;
        self.history_builder.build_from_json(json)
    }

    /// Fetch a single purchase. A missing resource surfaces as
    /// [`CoreError::PurchaseNotFound`].
    pub async fn fetch_purchase(&self, id: &Uuid) -> Result<Purchase, CoreError> {
        debug!(purchase.id = %id, "fetch purchase");
        let response = self
            .http
            .get(&self.purchase_url(id), &[])
            .await
            .map_err(normalize_purchase_error)?;
        let json = self.http.get_json(response)?;
        self.purchase_builder.build_from_json(json)
    }

    /// Walk history pages from `query` onwards, following the
    /// `lastPurchaseHash` cursor, and collect every purchase.
    pub async fn fetch_all_purchases(
        &self,
        query: &PurchaseHistoryQuery,
    ) -> Result<Vec<Purchase>, CoreError> {
        let mut purchases = Vec::new();
        let mut query = query.clone();
        let mut seen_cursors: HashSet<String> = HashSet::new();

        loop {
            let page = self.fetch_purchase_history(&query).await?;
            debug!(
                page_size = page.purchases.len(),
                cursor = page.last_purchase_hash.as_deref().unwrap_or(""),
                "fetched purchase history page"
            );

            // A cursor seen before means the server is cycling; its page has
            // already been collected.
            if let Some(cursor) = &page.last_purchase_hash {
                if !seen_cursors.insert(cursor.clone()) {
                    debug!(%cursor, "purchase history cursor repeated; stopping");
                    break;
                }
            }

            let next = query.next_page(&page);
            purchases.extend(page.purchases);
            match next {
                Some(next) => query = next,
                None => break,
            }
        }

        Ok(purchases)
    }
}

// ==============================================================================
// Error Normalization
// ==============================================================================

/// Turn the transport's generic not-found into `PurchaseNotFound`, keeping
/// the original message. Other failures pass through as-is.
fn normalize_purchase_error(err: CoreError) -> CoreError {
    match err {
        CoreError::NotFound(message) => {
            debug!(%message, "purchase not found");
            CoreError::PurchaseNotFound(message)
        }
        other => other,
    }
}

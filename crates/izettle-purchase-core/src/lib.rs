pub mod error;
pub mod http;
pub mod purchase;
#[cfg(test)]
mod test_util;

pub use error::{CoreError, HttpError};
pub use purchase::{PurchaseClient, PurchaseHistoryQuery};

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("HTTP communication failure: {0}")]
    Http(#[from] HttpError),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("purchase not found: {0}")]
    PurchaseNotFound(String),

    #[error("invalid purchase data: {0}")]
    InvalidPurchaseData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures raised by the HTTP collaborator other than a missing resource.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not authorized ({status}): {message}")]
    Unauthorized { status: StatusCode, message: String },

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

//! Remote cart errors.

use thiserror::Error;

/// Errors that can occur when talking to the cart service.
#[derive(Debug, Error)]
pub enum RemoteCartError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The session is not signed in, or its token expired.
    #[error("authentication required")]
    Unauthorized,

    /// The product or line does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected the request payload.
    #[error("request rejected: {0}")]
    Validation(String),

    /// The service answered with an unexpected status.
    #[error("unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// The cart document could not be mapped onto a cart.
    #[error("invalid cart document: {0}")]
    InvalidDocument(String),

    /// The service does not offer this operation.
    #[error("operation not supported by the cart service")]
    Unsupported,
}

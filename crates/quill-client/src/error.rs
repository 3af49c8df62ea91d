//! Client error types with user-facing messages.

/// Error from the generation backend, mapped to a user-facing message per
/// failure class.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request exceeded the client timeout.
    #[error("request timed out, please try again")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("network error, check your connection and that the backend is running")]
    Network(#[source] ureq::Error),

    /// Backend rate limit hit (HTTP 429).
    #[error("too many requests, please wait {retry_after} seconds before trying again")]
    RateLimited {
        /// Seconds to wait before retrying, as reported by the backend.
        retry_after: u64,
    },

    /// Backend rejected the API credentials (HTTP 401).
    #[error("API authentication failed, check the backend configuration")]
    Unauthorized,

    /// Backend rejected the request parameters (HTTP 400).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other backend failure.
    #[error("generation failed: {0}")]
    Server(String),

    /// The backend answered without content.
    #[error("the generation API returned no content")]
    EmptyContent,
}

//! Error types for the Kanka API client.
//!
//! # Design
//! Validation failures (`InvalidId`, `MissingField`) are detected locally and
//! never reach the network. Everything else originates from the transport or
//! from decoding a response. Service methods wrap the underlying error in
//! `Context` so the caller sees which resource and IDs were involved while
//! the underlying variant stays reachable through `source()` and `root()`.

use std::error::Error as StdError;

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by `Client` primitives and resource services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An ID was zero or negative.
    #[error("invalid ID {0}: IDs must be positive")]
    InvalidId(i64),

    /// A required payload field was blank.
    #[error("cannot marshal {resource} into JSON with a missing {field}")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401 or 403.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The server returned 429.
    #[error("rate limited (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced a response.
    #[error("transport failure")]
    Transport(#[source] TransportError),

    /// Operation context wrapped around an underlying error.
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    pub(crate) fn context(self, context: impl Into<String>) -> Self {
        ApiError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping every `Context` layer.
    pub fn root(&self) -> &ApiError {
        let mut err = self;
        while let ApiError::Context { source, .. } = err {
            err = source;
        }
        err
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), ApiError::NotFound)
    }

    /// True when the error was raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.root(),
            ApiError::InvalidId(_) | ApiError::MissingField { .. }
        )
    }

    /// Full message including every wrapped cause, outermost first.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut next = self.source();
        while let Some(cause) = next {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            next = cause.source();
        }
        out
    }
}

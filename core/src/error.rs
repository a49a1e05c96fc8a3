//! Error types for the Stripe mapping layer.
//!
//! # Design
//! A single enum covers both execution paths. The fake client raises
//! `FakeNotRegistered` and `Coercion`; the REST path raises `NotFound`, `Api`,
//! `Http` and `Transport`. Services only ever see `StripeError`, so calling
//! code handles real and fake failures the same way.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StripeError>;

/// Errors returned by clients, services and the fake harness.
#[derive(Debug, Error)]
pub enum StripeError {
    /// No exact or wildcard fake matched the dispatched method identifier.
    #[error("no fake registered for method {method}")]
    FakeNotRegistered { method: String },

    /// A payload could not be turned into a `StripeObject`.
    #[error("response coercion failed: {0}")]
    Coercion(String),

    /// A method identifier did not have the `resource.action` shape.
    #[error("invalid method identifier: {0}")]
    InvalidMethod(String),

    /// The action needs a resource identifier but none was passed.
    #[error("method {method} requires a resource identifier")]
    MissingIdentifier { method: String },

    /// The API returned 404.
    #[error("resource not found: {message}")]
    NotFound { message: String },

    /// The API returned a non-2xx status with a Stripe error envelope.
    #[error("stripe API error ({status} {kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        code: Option<String>,
        message: String,
    },

    /// The API returned a non-2xx status whose body was not an error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The host transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Webhook signature header missing, malformed, stale or not matching.
    #[error("webhook signature verification failed: {0}")]
    Signature(String),

    #[error("configuration error: {0}")]
    Config(String),
}

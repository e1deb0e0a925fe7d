//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `reqwest`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Callers that need to branch on a failure downcast
//! the `anyhow::Error` back to one of these.

use thiserror::Error;

// ── Compute errors ────────────────────────────────────────────────────────────

/// Errors raised by the client itself, as opposed to the daemon or transport.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// Lookup by name found nothing usable.
    #[error("no vm found, did you launch them?")]
    NoVm,

    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    /// The customized template could not be rendered to XML. Raised before
    /// any call is submitted.
    #[error("cannot serialize template: {0}")]
    TemplateSerialization(String),

    #[error("unexpected payload from {method}: expected {expected}")]
    UnexpectedPayload {
        method: String,
        expected: &'static str,
    },
}

// ── Transport errors ──────────────────────────────────────────────────────────

/// Failures of a single XML-RPC exchange.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("cannot reach {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} answered HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The daemon processed the call and rejected it.
    #[error("[{method}] {message} (code {code})")]
    Fault {
        method: String,
        code: i64,
        message: String,
    },

    #[error("cannot encode call: {0}")]
    Encode(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

// ── Markup errors ─────────────────────────────────────────────────────────────

/// A document that is not well-formed element markup.
#[derive(Debug, Error)]
#[error("malformed XML: {0}")]
pub struct MarkupError(pub String);

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}

//! Error types for httpreq.
//!
//! Errors fall into four [`ErrorKind`]s matching the phase that produced them:
//! configuration errors are sticky and only surface when the request is
//! executed, construction and transport errors short-circuit execution, and
//! handler errors are propagated once the response body has been cleaned up.

use std::path::PathBuf;

use derive_more::{Display, Error, From};

/// Phase of the request pipeline an [`Error`] originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Raised while configuring the builder (body source, headers, JSON body).
    #[display("configuration")]
    Configuration,
    /// Raised while assembling the transport request (verb, URL).
    #[display("request construction")]
    RequestConstruction,
    /// Raised by the transport client (connection, TLS, timeout, body read).
    #[display("transport")]
    Transport,
    /// Returned by the caller's response handler.
    #[display("handler")]
    Handler,
}

/// Main error type for httpreq operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The file used as a body source could not be read.
    #[display("cannot read body from '{}': {source}", path.display())]
    #[from(skip)]
    BodySource {
        /// Path of the body file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Header name or value rejected by HTTP syntax rules.
    #[display("invalid header: {_0}")]
    #[from(skip)]
    InvalidHeader(#[error(not(source))] String),

    /// JSON body serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Verb and URL do not form a valid request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Reading the response body failed.
    #[display("response body error: {_0}")]
    #[from(skip)]
    Body(#[error(not(source))] String),

    /// Error returned by a response handler.
    #[display("handler error: {_0}")]
    #[from(skip)]
    Handler(#[error(not(source))] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a body source error for the given path.
    #[must_use]
    pub fn body_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BodySource {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid header error.
    #[must_use]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a response body error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body(message.into())
    }

    /// Wrap an error returned by a response handler.
    #[must_use]
    pub fn handler(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(error.into())
    }

    /// Pipeline phase this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BodySource { .. } | Self::InvalidHeader(_) | Self::JsonSerialization(_) => {
                ErrorKind::Configuration
            }
            Self::InvalidRequest(_) | Self::InvalidUrl(_) => ErrorKind::RequestConstruction,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout | Self::Body(_) => {
                ErrorKind::Transport
            }
            Self::Handler(_) => ErrorKind::Handler,
        }
    }

    /// Returns `true` if this is a sticky configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

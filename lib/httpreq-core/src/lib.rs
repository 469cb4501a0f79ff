//! Core types for the httpreq fluent HTTP request builder.
//!
//! This crate provides the transport-agnostic part of httpreq:
//! - [`RequestBuilder`] - chained configuration with deferred errors, then a
//!   single [`execute`](RequestBuilder::execute)
//! - [`BodySource`] - accepted request body inputs (file, bytes, stream)
//! - [`QueryParams`] - multi-valued query parameters with stable encoding
//! - [`Request`] and [`Response`] - transport-level HTTP types
//! - [`HttpClient`] - the transport capability a builder sends through
//! - [`DiagnosticSink`] - injected receiver of body dumps and request traces
//! - [`Error`] and [`Result`] - error handling
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod builder;
mod client;
mod error;
mod method;
pub mod prelude;
mod query;
mod request;
mod response;
mod sink;

pub use body::{BodySource, ByteStream, RequestBody};
pub use builder::{PreparedRequest, RequestBuilder};
pub use client::HttpClient;
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use query::QueryParams;
pub use request::Request;
pub use response::{MAX_DRAIN_BYTES, Response, ResponseBody};
pub use sink::{DiagnosticSink, NoopSink, RequestTrace, TracingSink};

// Re-export http crate types for status codes and headers
pub use http::{HeaderMap, StatusCode, header};

//! Fluent HTTP request builder.
//!
//! Accumulate a verb, a base URL, query parameters, headers and a body through
//! chained calls, then execute the request once and handle the raw response.
//! Configuration errors are deferred: check once, at the end.
//!
//! # Example
//!
//! ```ignore
//! use httpreq::prelude::*;
//!
//! let url = "https://api.example.com/items".parse()?;
//! let items: Vec<Item> = httpreq::new_request(None, Method::Get, url)
//!     .param("page", "1")
//!     .header("Accept", "application/json")
//!     .execute(async |_request, response| {
//!         if !response.is_success() {
//!             return Err(Error::handler(format!("status {}", response.status())));
//!         }
//!         response.body_mut().json().await
//!     })
//!     .await?;
//! ```
//!
//! Whatever the handler does, the response body is drained (when small) and
//! closed before `execute` returns, so the connection can be reused.

mod client;
mod config;
mod connector;
pub mod prelude;

use url::Url;

// Re-export client types
pub use client::{HyperClient, HyperClientBuilder};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_POOL_IDLE_PER_HOST,
    DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_TIMEOUT,
};
pub use connector::https_connector;

// Re-export core types
pub use httpreq_core::{
    BodySource, ByteStream, DiagnosticSink, Error, ErrorKind, HttpClient, MAX_DRAIN_BYTES,
    Method, NoopSink, PreparedRequest, QueryParams, Request, RequestBody, RequestBuilder,
    RequestTrace, Response, ResponseBody, Result, TracingSink,
};

// Re-export http types for status codes and headers
pub use httpreq_core::{HeaderMap, StatusCode, header};

// Re-export crates appearing in the public API
pub use url;

/// Start a request sent through `client`, or through the shared default
/// [`HyperClient`] when `client` is `None`.
#[must_use]
pub fn new_request(
    client: Option<HyperClient>,
    verb: impl Into<String>,
    base_url: Url,
) -> RequestBuilder<HyperClient> {
    RequestBuilder::new(client, verb, base_url)
}

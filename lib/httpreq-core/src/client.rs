//! HTTP transport trait.
//!
//! [`HttpClient`] is the only capability a [`RequestBuilder`](crate::RequestBuilder)
//! needs from its transport: perform one request and return the response or an
//! error. Implement it for a real connection pool or for a test double.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, RequestBody, Response, ResponseBody, Result};

/// Core HTTP client trait.
///
/// Implementations must be usable from several requests at once; pooling,
/// TLS and timeouts are their concern.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<ResponseBody>>> + Send;
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<ResponseBody>>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<RequestBody>,
    ) -> impl Future<Output = Result<Response<ResponseBody>>> + Send {
        (**self).execute(request)
    }
}

//! Fluent request builder and executor.
//!
//! A [`RequestBuilder`] accumulates query parameters, headers and a body, then
//! [`execute`](RequestBuilder::execute)s once against an [`HttpClient`].
//!
//! Configuration errors do not interrupt the chain: the first one is kept,
//! every later configuration call becomes a no-op, and `execute` returns it
//! without touching the network. Checking once at the end is enough.
//!
//! # Example
//!
//! ```ignore
//! use httpreq::{HyperClient, Method, RequestBuilder};
//!
//! let url = "https://api.example.com/search".parse()?;
//! let status = RequestBuilder::<HyperClient>::new(None, Method::Get, url)
//!     .param("q", "rust")
//!     .header("X-Request-Id", "42")
//!     .execute(async |_request, response| Ok::<_, httpreq::Error>(response.status()))
//!     .await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::HeaderMap;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use url::Url;

use crate::sink::{DiagnosticSink, RequestTrace, TracingSink};
use crate::{
    BodySource, Error, HttpClient, QueryParams, Request, RequestBody, Response, ResponseBody,
    Result,
};

const BODY_PREFIX: &str = "Request Body";

/// Builder accumulating a request before a single execution.
pub struct RequestBuilder<C> {
    client: Option<C>,
    verb: String,
    base_url: Url,
    params: QueryParams,
    headers: HeaderMap,
    body: Option<RequestBody>,
    error: Option<Error>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<C> RequestBuilder<C> {
    /// Creates a builder for `verb` on `base_url`.
    ///
    /// With `client` set to `None`, the request is sent through `C::default()`.
    /// The builder starts with an `Accept: */*` header.
    #[must_use]
    pub fn new(client: Option<C>, verb: impl Into<String>, base_url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        Self {
            client,
            verb: verb.into(),
            base_url,
            params: QueryParams::new(),
            headers,
            body: None,
            error: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// Appends a query parameter value. Encoding happens in [`Self::url`].
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if self.error.is_none() {
            self.params.append(name, value);
        }
        self
    }

    /// Sets a header, replacing any previous value for the same name.
    ///
    /// Names are case-insensitive. An invalid name or value is kept as the
    /// deferred error.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let (name, value) = (name.as_ref(), value.as_ref());

        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => name,
            Err(err) => return self.fail(Error::invalid_header(format!("name '{name}': {err}"))),
        };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
                self
            }
            Err(err) => self.fail(Error::invalid_header(format!("value for '{name}': {err}"))),
        }
    }

    /// Sets the request body.
    ///
    /// Files are read right away; a read failure is kept as the deferred error
    /// and the body stays as it was. File and in-memory content is reported to
    /// the diagnostic sink.
    #[must_use]
    pub fn body(mut self, source: impl Into<BodySource>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match source.into().resolve() {
            Ok((body, content)) => {
                if let Some(content) = content {
                    self.sink.body(BODY_PREFIX, &content);
                }
                self.body = Some(body);
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Sets a JSON body and its `Content-Type`.
    #[must_use]
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_vec(value) {
            Ok(data) => {
                let data = Bytes::from(data);
                self.sink.body(BODY_PREFIX, &data);
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                self.body = Some(RequestBody::Full(data));
                self
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    fn fail(mut self, error: Error) -> Self {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self
    }

    /// Final URL: the base URL with the query rebuilt from the parameters.
    ///
    /// Without parameters the base URL is returned untouched, query included.
    /// Otherwise its query is replaced entirely.
    #[must_use]
    pub fn url(&self) -> Url {
        let mut url = self.base_url.clone();
        if !self.params.is_empty() {
            url.set_query(Some(&self.params.encode()));
        }
        url
    }

    /// Configured verb.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Base URL as given at construction.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Query parameters set so far.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Headers set so far.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body set so far.
    #[must_use]
    pub const fn request_body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Returns `true` once a body was set.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Deferred configuration error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Ends configuration.
    ///
    /// # Errors
    ///
    /// Returns the deferred configuration error, if one was recorded.
    pub fn finish(self) -> Result<PreparedRequest<C>> {
        let url = self.url();
        if let Some(error) = self.error {
            return Err(error);
        }

        Ok(PreparedRequest {
            client: self.client,
            verb: self.verb,
            url,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
            sink: self.sink,
        })
    }

    /// Sends the request and hands the response to `handler`.
    ///
    /// The handler runs once, with the request head and the response. Once it
    /// returns, whatever the outcome, the response body is drained (when its
    /// declared length is small, see [`MAX_DRAIN_BYTES`](crate::MAX_DRAIN_BYTES))
    /// and closed. Its result is returned as-is.
    ///
    /// # Errors
    ///
    /// - the deferred configuration error, without any network call (it is
    ///   also reported to the diagnostic sink)
    /// - [`Error::InvalidRequest`] when verb and URL cannot form a request
    /// - the transport error, with no retry
    /// - the handler's error
    pub async fn execute<T, E, F>(self, handler: F) -> std::result::Result<T, E>
    where
        C: HttpClient + Default,
        F: AsyncFnOnce(&Request<()>, &mut Response<ResponseBody>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let sink = Arc::clone(&self.sink);
        let prepared = self.finish().inspect_err(|err| sink.error(err))?;
        prepared.execute(handler).await
    }
}

impl<C> fmt::Debug for RequestBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("verb", &self.verb)
            .field("base_url", &self.base_url)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// A fully configured request, ready to be sent once.
pub struct PreparedRequest<C> {
    client: Option<C>,
    verb: String,
    url: Url,
    headers: HeaderMap,
    body: RequestBody,
    sink: Arc<dyn DiagnosticSink>,
}

impl<C> PreparedRequest<C> {
    /// Final URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Sends the request; see [`RequestBuilder::execute`].
    ///
    /// # Errors
    ///
    /// Same as [`RequestBuilder::execute`], minus the configuration error.
    pub async fn execute<T, E, F>(self, handler: F) -> std::result::Result<T, E>
    where
        C: HttpClient + Default,
        F: AsyncFnOnce(&Request<()>, &mut Response<ResponseBody>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let start = Instant::now();
        let Self {
            client,
            verb,
            url,
            headers,
            body,
            sink,
        } = self;
        let client = client.unwrap_or_default();

        let sent = match Request::from_verb(&verb, url.clone(), body) {
            Ok(request) => {
                let request = request.with_headers(headers);
                let head = request.head();
                client.execute(request).await.map(|response| (head, response))
            }
            Err(err) => Err(err),
        };
        let (head, mut response) = match sent {
            Ok(sent) => sent,
            Err(err) => {
                sink.trace(&RequestTrace {
                    verb: &verb,
                    url: &url,
                    completed: false,
                    elapsed: start.elapsed(),
                });
                return Err(err.into());
            }
        };

        let result = handler(&head, &mut response).await;
        response.release().await;

        sink.trace(&RequestTrace {
            verb: &verb,
            url: &url,
            completed: true,
            elapsed: start.elapsed(),
        });
        result
    }
}

impl<C> fmt::Debug for PreparedRequest<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("verb", &self.verb)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

//! Transport-level HTTP requests.
//!
//! [`Request`] is what a [`RequestBuilder`](crate::RequestBuilder) hands to the
//! transport once configuration is complete: a validated verb, the composed
//! URL, the header map and the body.
//!
//! # Example
//!
//! ```
//! use httpreq_core::{Request, RequestBody};
//!
//! let url = "https://api.example.com/items".parse().unwrap();
//! let request = Request::new(http::Method::GET, url, RequestBody::Empty).unwrap();
//! assert_eq!(request.url().as_str(), "https://api.example.com/items");
//! ```

use http::HeaderMap;
use http::header::{AsHeaderName, HeaderValue};
use url::Url;

use crate::{Error, RequestBody, Result};

/// An HTTP request with method, URL, headers, and body.
#[derive(Debug, Clone)]
pub struct Request<B = RequestBody> {
    method: http::Method,
    url: Url,
    headers: HeaderMap,
    body: B,
}

impl<B> Request<B> {
    /// Creates a request, checking that verb and URL can be sent together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the URL scheme is neither `http`
    /// nor `https`, or if it has no host.
    pub fn new(method: http::Method, url: Url, body: B) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_request(format!(
                "unsupported URL scheme '{}' for {method} {url}",
                url.scheme()
            )));
        }
        if url.host().is_none() {
            return Err(Error::invalid_request(format!(
                "missing host for {method} {url}"
            )));
        }

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
        })
    }

    /// Creates a request from a verb string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `verb` is not a valid HTTP token,
    /// or for the URL errors of [`Request::new`].
    pub fn from_verb(verb: &str, url: Url, body: B) -> Result<Self> {
        let method = http::Method::from_bytes(verb.as_bytes())
            .map_err(|err| Error::invalid_request(format!("invalid verb '{verb}': {err}")))?;
        Self::new(method, url, body)
    }

    /// Replaces the whole header map.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header value by name, if it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value: &HeaderValue| value.to_str().ok())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Method, URL and headers without the body.
    #[must_use]
    pub fn head(&self) -> Request<()> {
        Request {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: (),
        }
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (http::Method, Url, HeaderMap, B) {
        (self.method, self.url, self.headers, self.body)
    }
}

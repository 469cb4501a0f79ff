//! HTTP response handling.
//!
//! [`Response`] carries status and headers; its [`ResponseBody`] is a stream
//! owned by the underlying connection. The body must be closed for the
//! connection to be released: [`RequestBuilder::execute`](crate::RequestBuilder::execute)
//! drains and closes it after the handler returns, and dropping a
//! [`ResponseBody`] closes it as well.

use std::fmt;

use bytes::Bytes;
use futures_util::StreamExt;
use http::HeaderMap;
use http::header::{AsHeaderName, CONTENT_LENGTH};

use crate::{ByteStream, Result};

/// Upper bound of bytes read from a response body to recycle its connection.
pub const MAX_DRAIN_BYTES: u64 = 2 << 10;

// ============================================================================
// Response
// ============================================================================

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = ResponseBody> {
    status: u16,
    headers: HeaderMap,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: u16, headers: HeaderMap, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header value by name, if it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Mutable access to the body, for reading it.
    #[must_use]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, B) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<ResponseBody> {
    /// Declared body length.
    ///
    /// Taken from the body when the transport knows it, otherwise from the
    /// `Content-Length` header.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.body.content_length().or_else(|| {
            self.header(CONTENT_LENGTH)
                .and_then(|value| value.trim().parse().ok())
        })
    }

    /// Drains and closes the body so the connection can be reused.
    ///
    /// The body is drained only when its declared length is known and at most
    /// [`MAX_DRAIN_BYTES`]; otherwise it is closed unread. Returns the number
    /// of bytes drained.
    pub async fn release(self) -> u64 {
        let declared = self.content_length();
        let mut body = self.body;

        let drained = if declared.is_some_and(|len| len <= MAX_DRAIN_BYTES) {
            body.drain(MAX_DRAIN_BYTES).await
        } else {
            0
        };
        body.close();
        drained
    }
}

// ============================================================================
// Response Body
// ============================================================================

/// Streaming response body.
///
/// Reading helpers consume chunks as they arrive; [`ResponseBody::close`]
/// releases the stream, which is also what happens on drop.
pub struct ResponseBody {
    stream: Option<ByteStream>,
    content_length: Option<u64>,
}

impl ResponseBody {
    /// Wraps a chunk stream with its declared length, if known.
    #[must_use]
    pub fn new(stream: ByteStream, content_length: Option<u64>) -> Self {
        Self {
            stream: Some(stream),
            content_length,
        }
    }

    /// Body with fully known content.
    #[must_use]
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        let stream = futures_util::stream::once(async move { Ok::<_, crate::Error>(bytes) });
        Self::new(Box::pin(stream), Some(len))
    }

    /// Body without content.
    #[must_use]
    pub fn empty() -> Self {
        Self::full(Bytes::new())
    }

    /// Declared length, if known.
    #[must_use]
    pub const fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Returns `true` once the body has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Next chunk of the body, or `None` at the end or after close.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes>> {
        match self.stream.as_mut() {
            Some(stream) => stream.next().await,
            None => None,
        }
    }

    /// Reads the remaining body into memory.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        let mut collected = Vec::new();
        while let Some(chunk) = self.next_chunk().await {
            collected.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(collected))
    }

    /// Reads the remaining body as UTF-8 text.
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|err| crate::Error::body(err.to_string()))
    }

    /// Reads the remaining body and deserializes it as JSON.
    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| crate::Error::body(err.to_string()))
    }

    /// Reads and discards up to `limit` bytes, returning how many were read.
    ///
    /// Read errors end the drain silently.
    pub async fn drain(&mut self, limit: u64) -> u64 {
        let mut read = 0;
        while read < limit {
            match self.next_chunk().await {
                Some(Ok(chunk)) => read += chunk.len() as u64,
                Some(Err(_)) | None => break,
            }
        }
        read
    }

    /// Releases the underlying stream.
    pub fn close(&mut self) {
        self.stream = None;
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("content_length", &self.content_length)
            .field("closed", &self.is_closed())
            .finish()
    }
}

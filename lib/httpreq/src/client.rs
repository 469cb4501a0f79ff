//! HTTP client implementation using hyper-util.

use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use futures_util::TryStreamExt;
use http::header::CONTENT_LENGTH;
use http_body::Frame;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, BodyStream, Empty, Full, StreamBody};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tracing::debug;
use url::Url;

use crate::{
    ByteStream, Error, Request, RequestBody, RequestBuilder, Response, ResponseBody, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
};

type HyperBody = UnsyncBoxBody<Bytes, Error>;

/// Client handed out by [`HyperClient::default`].
static SHARED: LazyLock<HyperClient> = LazyLock::new(HyperClient::new);

/// HTTP client using hyper-util with connection pooling and TLS.
///
/// Cloning is cheap: clones share the same connection pool.
///
/// # Example
///
/// ```ignore
/// use httpreq::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build();
///
/// let status = client
///     .request("GET", "https://api.example.com/health".parse()?)
///     .execute(async |_, response| Ok::<_, httpreq::Error>(response.status()))
///     .await?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    inner: Client<HttpsConnector<HttpConnector>, HyperBody>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    ///
    /// This opens a new connection pool; [`HyperClient::default`] reuses the
    /// shared one.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a request sent through this client.
    #[must_use]
    pub fn request(&self, verb: impl Into<String>, base_url: Url) -> RequestBuilder<Self> {
        RequestBuilder::new(Some(self.clone()), verb, base_url)
    }

    /// Build a hyper request from an httpreq request.
    fn build_hyper_request(request: Request<RequestBody>) -> Result<http::Request<HyperBody>> {
        let (method, url, headers, body) = request.into_parts();

        let body: HyperBody = match body {
            RequestBody::Empty => Empty::<Bytes>::new()
                .map_err(|never| match never {})
                .boxed_unsync(),
            RequestBody::Full(bytes) => Full::new(bytes)
                .map_err(|never| match never {})
                .boxed_unsync(),
            RequestBody::Stream(stream) => StreamBody::new(stream.map_ok(Frame::data)).boxed_unsync(),
        };

        let mut http_request = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        *http_request.headers_mut() = headers;

        Ok(http_request)
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Default for HyperClient {
    /// The process-wide shared client.
    fn default() -> Self {
        SHARED.clone()
    }
}

impl httpreq_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<RequestBody>) -> Result<Response<ResponseBody>> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|err| {
                debug!(error = %err, "transport failure");
                Self::map_hyper_error(err)
            })?;

        let (parts, body) = response.into_parts();
        let content_length = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok());

        let stream: ByteStream = Box::pin(
            BodyStream::new(body)
                .map_ok(|frame| frame.into_data().unwrap_or_default())
                .map_err(|e| Error::body(e.to_string())),
        );

        Ok(Response::new(
            parts.status.as_u16(),
            parts.headers,
            ResponseBody::new(stream, content_length),
        ))
    }
}

/// Builder for [`HyperClient`].
#[derive(Debug, Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
}

impl HyperClientBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        HyperClient::with_config(self.config.build())
    }
}

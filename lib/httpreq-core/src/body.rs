//! Request body sources.
//!
//! A request body is configured from a [`BodySource`], a closed set of accepted
//! input shapes:
//! - [`BodySource::File`] - read fully from disk when the body is set
//! - [`BodySource::Bytes`] - sent as-is
//! - [`BodySource::Stream`] - forwarded to the transport without copying
//!
//! Anything else has no conversion into [`BodySource`] and is rejected by the
//! compiler.

use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;

use crate::{Error, Result};

/// A stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Accepted inputs for a request body.
pub enum BodySource {
    /// Path of a file whose content becomes the body.
    File(PathBuf),
    /// In-memory body.
    Bytes(Bytes),
    /// Streamed body, used as-is.
    Stream(ByteStream),
}

impl BodySource {
    /// Body read from a file.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// In-memory body.
    #[must_use]
    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Streamed body.
    #[must_use]
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    /// Resolves the source into a request body.
    ///
    /// Files are read eagerly; the returned bytes are `Some` for sources whose
    /// content is known up front (file and bytes), so it can be reported.
    pub(crate) fn resolve(self) -> Result<(RequestBody, Option<Bytes>)> {
        match self {
            Self::File(path) => {
                let data = std::fs::read(&path).map_err(|err| Error::body_source(path, err))?;
                let data = Bytes::from(data);
                Ok((RequestBody::Full(data.clone()), Some(data)))
            }
            Self::Bytes(data) => Ok((RequestBody::Full(data.clone()), Some(data))),
            Self::Stream(stream) => Ok((RequestBody::Stream(stream), None)),
        }
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<PathBuf> for BodySource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for BodySource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<Bytes> for BodySource {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for BodySource {
    fn from(bytes: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(bytes))
    }
}

impl From<ByteStream> for BodySource {
    fn from(stream: ByteStream) -> Self {
        Self::Stream(stream)
    }
}

/// Body of a request handed to the transport.
#[derive(Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Fully buffered body.
    Full(Bytes),
    /// Streamed body.
    Stream(ByteStream),
}

impl RequestBody {
    /// Returns `true` for [`RequestBody::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Buffered content, if the body is not streamed.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Full(bytes) => Some(bytes),
            Self::Empty | Self::Stream(_) => None,
        }
    }

    /// Reads the whole body into memory.
    pub async fn collect(self) -> Result<Bytes> {
        use futures_util::TryStreamExt;

        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Full(bytes) => Ok(bytes),
            Self::Stream(stream) => {
                let chunks: Vec<Bytes> = stream.try_collect().await?;
                Ok(Bytes::from(chunks.concat()))
            }
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use futures_util::stream;

    use super::*;

    #[test]
    fn bytes_source_resolves_unchanged() {
        let (body, reported) = BodySource::from(b"payload".to_vec())
            .resolve()
            .expect("bytes");

        assert_eq!(body.as_bytes().map(Bytes::as_ref), Some(&b"payload"[..]));
        assert_eq!(reported.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn file_source_reads_content() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{"name":"test"}"#).expect("write");

        let (body, reported) = BodySource::from(file.path()).resolve().expect("file");

        assert_eq!(
            body.as_bytes().map(Bytes::as_ref),
            Some(&br#"{"name":"test"}"#[..])
        );
        assert!(reported.is_some());
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");

        let err = BodySource::file(&path).resolve().expect_err("missing file");

        assert!(err.is_configuration());
        assert!(matches!(err, Error::BodySource { path: p, .. } if p == path));
    }

    #[tokio::test]
    async fn stream_source_is_forwarded() {
        let chunks = stream::iter(vec![Ok(Bytes::from("ab")), Ok(Bytes::from("cd"))]);
        let (body, reported) = BodySource::stream(chunks).resolve().expect("stream");

        assert!(reported.is_none());
        assert!(body.as_bytes().is_none());
        assert_eq!(body.collect().await.expect("collect"), Bytes::from("abcd"));
    }

    #[tokio::test]
    async fn buffered_bodies_collect_as_is() {
        let collected = RequestBody::Full(Bytes::from("hello"))
            .collect()
            .await
            .expect("collect");
        assert_eq!(collected, Bytes::from("hello"));

        let empty = RequestBody::default();
        assert!(empty.is_empty());
        assert!(empty.collect().await.expect("collect").is_empty());
    }
}

//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types
//! for easy glob importing:
//!
//! ```ignore
//! use httpreq_core::prelude::*;
//! ```

pub use crate::{
    BodySource, DiagnosticSink, Error, ErrorKind, HttpClient, Method, Request, RequestBody,
    RequestBuilder, Response, ResponseBody, Result,
};

//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types
//! for easy glob importing:
//!
//! ```ignore
//! use httpreq::prelude::*;
//! ```

pub use crate::{
    BodySource, ClientConfig, Error, ErrorKind, HttpClient, HyperClient, Method, Request,
    RequestBuilder, Response, ResponseBody, Result, StatusCode, header, new_request,
};

//! Generic client for envelope-based REST APIs.
//!
//! # Overview
//! Given a base resource path, [`ResourceClient`] exposes the CRUD
//! operations — list, get-one, create, update, patch, delete — against a
//! backend that wraps every success body in `{ "data": ... }`. Header
//! construction, query serialization, and error normalization are uniform
//! across operations.
//!
//! # Design
//! - Requests and responses cross the I/O boundary as plain data
//!   ([`HttpRequest`] / [`HttpResponse`]); any executor implementing
//!   [`HttpBackend`] plugs in. A reqwest backend ships behind the default
//!   `reqwest-client` feature.
//! - Credentials are an injected capability ([`CredentialProvider`]), read
//!   fresh per call — no global token state.
//! - Every failure class is a variant of [`ApiError`], including the
//!   "HTTP succeeded but the envelope carried no data" case; callers never
//!   see a silent null.
//! - No retries, no caching, no cross-call state: each operation is an
//!   independent future.

pub mod backends;
pub mod client;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod headers;
pub mod http;
pub mod query;
pub mod transport;

#[cfg(feature = "reqwest-client")]
pub use backends::ReqwestBackend;
pub use client::{RequestOptions, ResourceClient};
pub use credentials::{Anonymous, CredentialProvider, SharedToken, StaticToken};
pub use envelope::{Envelope, ListData, PageData};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::ParamValue;
pub use transport::{HttpBackend, Transport};

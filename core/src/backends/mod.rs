//! HTTP backend implementations.

#[cfg(feature = "reqwest-client")]
mod reqwest_backend;
#[cfg(feature = "reqwest-client")]
pub use reqwest_backend::ReqwestBackend;

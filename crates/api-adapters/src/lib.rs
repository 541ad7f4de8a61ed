//! # api-adapters
//!
//! `CardApi` implementations: an in-process one for demos and tests, and a
//! `reqwest` client (feature `http`) for the hosted feed service.

pub mod memory;

#[cfg(feature = "http")]
pub mod http;

pub use memory::InMemoryCardApi;

#[cfg(feature = "http")]
pub use http::HttpCardApi;

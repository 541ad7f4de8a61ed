//! # auth-adapters
//!
//! `IdentityApi` implementations: registration, token exchange, and
//! resolving a token back to its account.

pub mod memory;

#[cfg(feature = "http")]
pub mod http;

pub use memory::InMemoryIdentityApi;

#[cfg(feature = "http")]
pub use http::HttpIdentityApi;

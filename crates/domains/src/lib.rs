//! photo-feed/crates/domains/src/lib.rs
//!
//! The data model and collaborator contracts of the photo feed client.

pub mod error;
pub mod models;
pub mod routes;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use routes::*;
pub use traits::*;

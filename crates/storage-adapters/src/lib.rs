//! # storage-adapters
//!
//! Implementations of the persistent credential slot.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

//! # Core Traits (Ports)
//!
//! Every collaborator the client depends on is reached through one of these
//! traits. Adapters in the `*-adapters` crates implement them.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthToken, Card, CardId, Credential, Identity, Profile};

/// Card and profile operations of the feed service.
///
/// The server is the sole source of truth: every mutating call returns the
/// authoritative version of what it changed.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CardApi: Send + Sync {
    // Profile Operations
    async fn get_profile(&self) -> Result<Profile>;
    async fn edit_profile(&self, name: &str, bio: &str) -> Result<Profile>;
    async fn edit_avatar(&self, url: &str) -> Result<Profile>;

    // Card Operations
    /// Newest first.
    async fn get_cards(&self) -> Result<Vec<Card>>;
    async fn add_card(&self, caption: &str, url: &str) -> Result<Card>;
    async fn like_card(&self, id: &CardId) -> Result<Card>;
    async fn unlike_card(&self, id: &CardId) -> Result<Card>;
    async fn delete_card(&self, id: &CardId) -> Result<()>;
}

/// Account registration and token exchange.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<Identity>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken>;
    /// Resolves the account a token was issued to.
    async fn get_identity(&self, token: &AuthToken) -> Result<Identity>;
}

/// The persisted `{token, user-id}` slot. Survives restarts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<Credential>>;
    async fn save(&self, credential: &Credential) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

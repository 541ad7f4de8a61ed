//! # Session Verifier
//!
//! Restores a session from the persisted credential. Every failure falls
//! back to "unauthenticated" silently; nothing here is shown to the user.

use std::sync::Arc;

use domains::{Credential, CredentialStore, Identity, IdentityApi};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionResult::Authenticated(_))
    }
}

pub struct SessionVerifier {
    identity: Arc<dyn IdentityApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionVerifier {
    pub fn new(identity: Arc<dyn IdentityApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            identity,
            credentials,
        }
    }

    /// Reads the credential slot and verifies whatever is there.
    pub async fn verify_stored(&self) -> SessionResult {
        match self.credentials.load().await {
            Ok(credential) => self.verify(credential.as_ref()).await,
            Err(error) => {
                warn!(%error, "credential slot unreadable");
                SessionResult::Unauthenticated
            }
        }
    }

    /// No credential means no network call. Otherwise the token is exchanged
    /// for an identity, which must match the id recorded at sign-in.
    pub async fn verify(&self, credential: Option<&Credential>) -> SessionResult {
        let Some(credential) = credential else {
            debug!("no stored credential");
            return SessionResult::Unauthenticated;
        };

        let identity = match self.identity.get_identity(&credential.token).await {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "stored token rejected");
                return SessionResult::Unauthenticated;
            }
        };

        if credential.user_id.as_ref() != Some(&identity.id) {
            info!(user = %identity.id, "stored token belongs to a different user");
            return SessionResult::Unauthenticated;
        }

        info!(user = %identity.id, "session restored");
        SessionResult::Authenticated(identity)
    }
}

//! In-process identity service backed by Argon2 password hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use domains::{ApiError, AuthToken, Identity, IdentityApi, Result, UserId};
use tracing::{debug, info};
use uuid::Uuid;

struct Account {
    id: UserId,
    password_hash: String,
}

/// Accounts are keyed by lower-cased email; tokens never expire unless revoked.
#[derive(Default)]
pub struct InMemoryIdentityApi {
    accounts: DashMap<String, Account>,
    tokens: DashMap<String, Identity>,
}

impl InMemoryIdentityApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates a token, as a server would on expiry.
    pub fn revoke(&self, token: &AuthToken) -> bool {
        self.tokens.remove(token.expose()).is_some()
    }

    fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| ApiError::Internal(error.to_string()))
    }

    fn verify(password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

fn normalize(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ApiError::Validation(format!("'{email}' is not an email address"))),
    }
}

#[async_trait]
impl IdentityApi for InMemoryIdentityApi {
    async fn register(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize(email)?;
        if password.len() < 6 {
            return Err(ApiError::Validation(
                "password must be at least 6 characters".into(),
            ));
        }
        let password_hash = Self::hash(password)?;

        match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => Err(ApiError::Validation(format!(
                "an account for {email} already exists"
            ))),
            Entry::Vacant(slot) => {
                let id = UserId::new(Uuid::new_v4().simple().to_string());
                slot.insert(Account {
                    id: id.clone(),
                    password_hash,
                });
                info!(user = %id, "account registered");
                Ok(Identity { id, email })
            }
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let rejected = || ApiError::Unauthorized("wrong email or password".into());
        let email = normalize(email).map_err(|_| rejected())?;

        let id = {
            let account = self.accounts.get(&email).ok_or_else(rejected)?;
            if !Self::verify(password, &account.password_hash) {
                return Err(rejected());
            }
            account.id.clone()
        };

        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), Identity { id, email });
        debug!("token issued");
        Ok(AuthToken::new(token))
    }

    async fn get_identity(&self, token: &AuthToken) -> Result<Identity> {
        self.tokens
            .get(token.expose())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ApiError::Unauthorized("token is not recognised".into()))
    }
}

//! # Domain Models
//!
//! These structs represent the entities the photo feed client works with.
//! Identifiers are issued by the server and treated as opaque strings.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-issued identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-issued identifier of a photo card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in user's public profile (the "current user").
///
/// Always replaced wholesale with what the server returns, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
}

/// A single photo in the shared feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub image_url: String,
    pub caption: String,
    pub owner_id: UserId,
    /// Users who currently like this photo, as last confirmed by the server.
    pub liked_by: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// `None` means "nobody is signed in", which never counts as a like.
    pub fn is_liked_by(&self, user: Option<&UserId>) -> bool {
        user.is_some_and(|id| self.liked_by.contains(id))
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_owned_by(&self, user: Option<&UserId>) -> bool {
        user.is_some_and(|id| &self.owner_id == id)
    }
}

/// Identity behind a token, as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
}

/// Bearer token handed out by the identity service.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// The one thing the client persists between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: AuthToken,
    /// Id recorded at sign-in; the session is only restored if the
    /// identity service still reports the same id for `token`.
    pub user_id: Option<UserId>,
}

/// Result shown by the auth-result dialog after sign-in or registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    Success,
    Failure,
}

/// When the profile and card collection are fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapTrigger {
    /// Once at mount, whether or not a session exists.
    #[default]
    OnMount,
    /// Once, the first time the session becomes authenticated.
    OnAuthenticated,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(liked: &[&str]) -> Card {
        Card {
            id: CardId::new("c1"),
            image_url: "https://img.example/1.jpg".into(),
            caption: "Baikal".into(),
            owner_id: UserId::new("owner"),
            liked_by: liked.iter().map(|id| UserId::new(*id)).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn likes_are_tracked_per_user() {
        let card = card(&["u1", "u2"]);
        assert!(card.is_liked_by(Some(&UserId::new("u1"))));
        assert!(!card.is_liked_by(Some(&UserId::new("u3"))));
        assert!(!card.is_liked_by(None));
        assert_eq!(card.like_count(), 2);
    }

    #[test]
    fn ownership_requires_a_user() {
        let card = card(&[]);
        assert!(card.is_owned_by(Some(&UserId::new("owner"))));
        assert!(!card.is_owned_by(None));
    }

    #[test]
    fn token_debug_is_redacted() {
        let credential = Credential {
            token: AuthToken::new("secret-jwt"),
            user_id: Some(UserId::new("u1")),
        };
        let printed = format!("{credential:?}");
        assert!(!printed.contains("secret-jwt"));
        assert!(printed.contains("u1"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CardId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
        let trigger: BootstrapTrigger = serde_json::from_str("\"on-authenticated\"").unwrap();
        assert_eq!(trigger, BootstrapTrigger::OnAuthenticated);
    }
}

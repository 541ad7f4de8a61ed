//! Shared setup: a registered account, a seeded feed, and an orchestrator
//! wired to the in-process adapters.

#![allow(dead_code)]

use std::sync::Arc;

use api_adapters::InMemoryCardApi;
use auth_adapters::InMemoryIdentityApi;
use chrono::{Duration, Utc};
use domains::{Card, CardId, Credential, CredentialStore, Identity, IdentityApi, Profile, UserId};
use services::{
    ChannelReporter, Collaborators, Failure, KeyEventBus, Orchestrator, OrchestratorOptions,
};
use storage_adapters::MemoryCredentialStore;
use tokio::sync::mpsc::UnboundedReceiver;

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "analytical-engine";

pub struct World {
    pub identity: Arc<InMemoryIdentityApi>,
    pub cards: Arc<InMemoryCardApi>,
    pub me: Identity,
}

pub struct App {
    pub orchestrator: Orchestrator,
    pub keys: Arc<KeyEventBus>,
    pub notices: UnboundedReceiver<Failure>,
}

impl World {
    /// One account; the feed holds `mine` (owned by it) above two foreign cards.
    pub async fn new() -> Self {
        let identity = InMemoryIdentityApi::new();
        let me = identity.register(EMAIL, PASSWORD).await.unwrap();

        let profile = Profile {
            id: me.id.clone(),
            display_name: "Ada Lovelace".into(),
            bio: "Mathematician".into(),
            avatar_url: "https://img.example/ada.jpg".into(),
        };
        let other = UserId::new("charles");
        let now = Utc::now();
        let card = |id: &str, owner: &UserId, age: i64| Card {
            id: CardId::new(id),
            image_url: format!("https://img.example/{id}.jpg"),
            caption: id.to_uppercase(),
            owner_id: owner.clone(),
            liked_by: [other.clone()].into_iter().collect(),
            created_at: now - Duration::minutes(age),
        };
        let cards = vec![
            card("mine", &me.id, 1),
            card("elbrus", &other, 2),
            card("baikal", &other, 3),
        ];

        Self {
            identity: Arc::new(identity),
            cards: Arc::new(InMemoryCardApi::with_cards(profile, cards)),
            me,
        }
    }

    /// A credential exactly as a successful sign-in would have stored it.
    pub async fn valid_credential(&self) -> Credential {
        Credential {
            token: self.identity.login(EMAIL, PASSWORD).await.unwrap(),
            user_id: Some(self.me.id.clone()),
        }
    }

    pub async fn slot_with(&self, credential: Credential) -> Arc<dyn CredentialStore> {
        let store = MemoryCredentialStore::new();
        store.save(&credential).await.unwrap();
        Arc::new(store)
    }

    pub fn app(&self, credentials: Arc<dyn CredentialStore>, options: OrchestratorOptions) -> App {
        let keys = KeyEventBus::new();
        let (reporter, notices) = ChannelReporter::new();
        let collaborators = Collaborators {
            cards: self.cards.clone(),
            identity: self.identity.clone(),
            credentials,
        };
        let orchestrator = Orchestrator::new(collaborators, Arc::clone(&keys), options)
            .with_reporter(Arc::new(reporter));
        App {
            orchestrator,
            keys,
            notices,
        }
    }

    /// Mounted with a valid stored session and the default options.
    pub async fn signed_in_app(&self) -> App {
        let slot = self.slot_with(self.valid_credential().await).await;
        let app = self.app(slot, OrchestratorOptions::default());
        app.orchestrator.mount().await;
        assert!(app.orchestrator.snapshot().session.authenticated);
        app
    }
}

pub fn ids(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|card| card.id.to_string()).collect()
}

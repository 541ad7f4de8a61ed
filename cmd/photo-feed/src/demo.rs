//! Seed data for the in-process backend.

use std::sync::Arc;

use api_adapters::InMemoryCardApi;
use auth_adapters::InMemoryIdentityApi;
use chrono::{Duration, Utc};
use domains::{Card, CardId, IdentityApi, Profile, UserId};
use services::Collaborators;
use storage_adapters::MemoryCredentialStore;
use tracing::info;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo-password";

const PLACES: [(&str, &str); 4] = [
    ("Arkhyz", "https://images.unsplash.com/photo-1501785888041-af3ef285b470"),
    ("Chelyabinsk oblast", "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee"),
    ("Kamchatka", "https://images.unsplash.com/photo-1470770841072-f978cf4d019e"),
    ("Lake Baikal", "https://images.unsplash.com/photo-1441974231531-c6227db76b6e"),
];

pub async fn collaborators() -> anyhow::Result<Collaborators> {
    let identity = InMemoryIdentityApi::new();
    let account = identity.register(DEMO_EMAIL, DEMO_PASSWORD).await?;

    let me = Profile {
        id: account.id.clone(),
        display_name: "Jacques Cousteau".into(),
        bio: "Sailor, researcher".into(),
        avatar_url: "https://images.unsplash.com/photo-1544005313-94ddf0286df2".into(),
    };
    let neighbour = UserId::new("neighbour");
    let now = Utc::now();
    let cards = PLACES
        .iter()
        .enumerate()
        .map(|(i, (caption, url))| Card {
            id: CardId::new(format!("demo-{}", i + 1)),
            image_url: url.to_string(),
            caption: caption.to_string(),
            owner_id: if i % 2 == 0 { account.id.clone() } else { neighbour.clone() },
            liked_by: [neighbour.clone()].into_iter().collect(),
            created_at: now - Duration::hours(i as i64),
        })
        .collect();

    info!(email = DEMO_EMAIL, "demo account ready");
    Ok(Collaborators {
        cards: Arc::new(InMemoryCardApi::with_cards(me, cards)),
        identity: Arc::new(identity),
        credentials: Arc::new(MemoryCredentialStore::new()),
    })
}

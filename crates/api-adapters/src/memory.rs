//! In-process implementation of `CardApi`.
//!
//! Behaves like the real feed service for a single signed-in user: ids are
//! minted here, the newest card comes first, and only the owner may delete.

use async_trait::async_trait;
use chrono::Utc;
use domains::{ApiError, Card, CardApi, CardId, Profile, Result};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

pub struct InMemoryCardApi {
    me: RwLock<Profile>,
    cards: RwLock<Vec<Card>>,
}

impl InMemoryCardApi {
    pub fn new(me: Profile) -> Self {
        Self {
            me: RwLock::new(me),
            cards: RwLock::new(Vec::new()),
        }
    }

    /// `cards` must already be newest first.
    pub fn with_cards(me: Profile, cards: Vec<Card>) -> Self {
        Self {
            me: RwLock::new(me),
            cards: RwLock::new(cards),
        }
    }

    async fn update_card<F>(&self, id: &CardId, change: F) -> Result<Card>
    where
        F: FnOnce(&mut Card),
    {
        let mut cards = self.cards.write().await;
        let card = cards
            .iter_mut()
            .find(|card| &card.id == id)
            .ok_or_else(|| not_found(id))?;
        change(card);
        Ok(card.clone())
    }
}

fn not_found(id: &CardId) -> ApiError {
    ApiError::NotFound("card".into(), id.to_string())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<()> {
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(ApiError::Validation(format!("{field} must be an http(s) URL")));
    }
    Ok(())
}

#[async_trait]
impl CardApi for InMemoryCardApi {
    async fn get_profile(&self) -> Result<Profile> {
        Ok(self.me.read().await.clone())
    }

    async fn edit_profile(&self, name: &str, bio: &str) -> Result<Profile> {
        require_text("name", name)?;
        require_text("about", bio)?;
        let mut me = self.me.write().await;
        me.display_name = name.to_string();
        me.bio = bio.to_string();
        Ok(me.clone())
    }

    async fn edit_avatar(&self, url: &str) -> Result<Profile> {
        require_url("avatar", url)?;
        let mut me = self.me.write().await;
        me.avatar_url = url.to_string();
        Ok(me.clone())
    }

    async fn get_cards(&self) -> Result<Vec<Card>> {
        Ok(self.cards.read().await.clone())
    }

    async fn add_card(&self, caption: &str, url: &str) -> Result<Card> {
        require_text("name", caption)?;
        require_url("link", url)?;
        let owner_id = self.me.read().await.id.clone();
        let card = Card {
            id: CardId::new(Uuid::new_v4().simple().to_string()),
            image_url: url.to_string(),
            caption: caption.to_string(),
            owner_id,
            liked_by: Default::default(),
            created_at: Utc::now(),
        };
        self.cards.write().await.insert(0, card.clone());
        debug!(card = %card.id, "card created");
        Ok(card)
    }

    async fn like_card(&self, id: &CardId) -> Result<Card> {
        let me = self.me.read().await.id.clone();
        self.update_card(id, |card| {
            card.liked_by.insert(me);
        })
        .await
    }

    async fn unlike_card(&self, id: &CardId) -> Result<Card> {
        let me = self.me.read().await.id.clone();
        self.update_card(id, |card| {
            card.liked_by.remove(&me);
        })
        .await
    }

    async fn delete_card(&self, id: &CardId) -> Result<()> {
        let me = self.me.read().await.id.clone();
        let mut cards = self.cards.write().await;
        let position = cards
            .iter()
            .position(|card| &card.id == id)
            .ok_or_else(|| not_found(id))?;
        if cards[position].owner_id != me {
            return Err(ApiError::Unauthorized(format!("card {id} belongs to another user")));
        }
        cards.remove(position);
        Ok(())
    }
}

//! # Collection Bootstrap
//!
//! Fetches the current user and the card collection concurrently. Both
//! must succeed; a partial result is never returned.

use std::sync::Arc;

use domains::{Card, CardApi, Profile, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialData {
    pub user: Profile,
    pub cards: Vec<Card>,
}

pub struct CollectionBootstrap {
    api: Arc<dyn CardApi>,
}

impl CollectionBootstrap {
    pub fn new(api: Arc<dyn CardApi>) -> Self {
        Self { api }
    }

    pub async fn fetch(&self) -> Result<InitialData> {
        let (user, cards) = tokio::try_join!(self.api.get_profile(), self.api.get_cards())?;
        Ok(InitialData { user, cards })
    }
}

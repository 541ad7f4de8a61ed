//! `reqwest` client for the hosted feed service.
//!
//! The service speaks its own JSON dialect (`_id`, `name`, `about`, `link`...);
//! the DTOs below translate it into domain models at the edge.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{ApiError, Card, CardApi, CardId, Profile, Result, UserId};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Maps a response onto `T`, turning non-2xx statuses into `ApiError`.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(status_error(status, message));
    }
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|error| ApiError::Malformed(error.to_string()))
}

/// Like [`decode`] but discards the body.
pub async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    Err(status_error(status, message))
}

pub fn status_error(status: StatusCode, message: String) -> ApiError {
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => ApiError::Validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound("resource".into(), message),
        s if s.is_server_error() => ApiError::Internal(message),
        _ => ApiError::Transport(message),
    }
}

pub fn transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

pub fn client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(transport_error)
}

/// A user reference: either a bare id or an embedded user document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl From<UserRef> for UserId {
    fn from(value: UserRef) -> Self {
        match value {
            UserRef::Id(id) | UserRef::Doc { id } => UserId::new(id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    about: String,
    avatar: String,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        Profile {
            id: UserId::new(dto.id),
            display_name: dto.name,
            bio: dto.about,
            avatar_url: dto.avatar,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    link: String,
    owner: UserRef,
    #[serde(default)]
    likes: Vec<UserRef>,
    created_at: DateTime<Utc>,
}

impl From<CardDto> for Card {
    fn from(dto: CardDto) -> Self {
        Card {
            id: CardId::new(dto.id),
            image_url: dto.link,
            caption: dto.name,
            owner_id: dto.owner.into(),
            liked_by: dto.likes.into_iter().map(UserId::from).collect(),
            created_at: dto.created_at,
        }
    }
}

#[derive(Serialize)]
struct ProfileEdit<'a> {
    name: &'a str,
    about: &'a str,
}

#[derive(Serialize)]
struct AvatarEdit<'a> {
    avatar: &'a str,
}

#[derive(Serialize)]
struct NewCard<'a> {
    name: &'a str,
    link: &'a str,
}

pub struct HttpCardApi {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl HttpCardApi {
    pub fn new(base_url: impl Into<String>, token: SecretString, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header("authorization", self.token.expose_secret())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        builder.send().await.map_err(transport_error)
    }
}

#[async_trait]
impl CardApi for HttpCardApi {
    #[instrument(skip(self))]
    async fn get_profile(&self) -> Result<Profile> {
        let response = self.send(self.request(Method::GET, "/users/me")).await?;
        decode::<ProfileDto>(response).await.map(Profile::from)
    }

    #[instrument(skip(self))]
    async fn edit_profile(&self, name: &str, bio: &str) -> Result<Profile> {
        let body = ProfileEdit { name, about: bio };
        let response = self
            .send(self.request(Method::PATCH, "/users/me").json(&body))
            .await?;
        decode::<ProfileDto>(response).await.map(Profile::from)
    }

    #[instrument(skip(self))]
    async fn edit_avatar(&self, url: &str) -> Result<Profile> {
        let body = AvatarEdit { avatar: url };
        let response = self
            .send(self.request(Method::PATCH, "/users/me/avatar").json(&body))
            .await?;
        decode::<ProfileDto>(response).await.map(Profile::from)
    }

    #[instrument(skip(self))]
    async fn get_cards(&self) -> Result<Vec<Card>> {
        let response = self.send(self.request(Method::GET, "/cards")).await?;
        let cards: Vec<CardDto> = decode(response).await?;
        debug!(count = cards.len(), "cards fetched");
        Ok(cards.into_iter().map(Card::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_card(&self, caption: &str, url: &str) -> Result<Card> {
        let body = NewCard {
            name: caption,
            link: url,
        };
        let response = self
            .send(self.request(Method::POST, "/cards").json(&body))
            .await?;
        decode::<CardDto>(response).await.map(Card::from)
    }

    #[instrument(skip(self), fields(card = %id))]
    async fn like_card(&self, id: &CardId) -> Result<Card> {
        let path = format!("/cards/{id}/likes");
        let response = self.send(self.request(Method::PUT, &path)).await?;
        decode::<CardDto>(response).await.map(Card::from)
    }

    #[instrument(skip(self), fields(card = %id))]
    async fn unlike_card(&self, id: &CardId) -> Result<Card> {
        let path = format!("/cards/{id}/likes");
        let response = self.send(self.request(Method::DELETE, &path)).await?;
        decode::<CardDto>(response).await.map(Card::from)
    }

    #[instrument(skip(self), fields(card = %id))]
    async fn delete_card(&self, id: &CardId) -> Result<()> {
        let path = format!("/cards/{id}");
        let response = self.send(self.request(Method::DELETE, &path)).await?;
        expect_success(response).await
    }
}

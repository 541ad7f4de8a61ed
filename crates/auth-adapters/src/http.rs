//! `reqwest` client for the hosted identity service.

use std::time::Duration;

use api_adapters::http::{client, decode, transport_error};
use async_trait::async_trait;
use domains::{AuthToken, Identity, IdentityApi, Result, UserId};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct IdentityDto {
    #[serde(rename = "_id")]
    id: String,
    email: String,
}

/// `/signup` and `/users/me` wrap the account in `{"data": ...}`.
#[derive(Deserialize)]
struct Envelope {
    data: IdentityDto,
}

impl From<Envelope> for Identity {
    fn from(envelope: Envelope) -> Self {
        Identity {
            id: UserId::new(envelope.data.id),
            email: envelope.data.email,
        }
    }
}

pub struct HttpIdentityApi {
    client: Client,
    base_url: String,
}

impl HttpIdentityApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl IdentityApi for HttpIdentityApi {
    #[instrument(skip(self, password))]
    async fn register(&self, email: &str, password: &str) -> Result<Identity> {
        let response = self
            .client
            .post(self.url("/signup"))
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(transport_error)?;
        decode::<Envelope>(response).await.map(Identity::from)
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let response = self
            .client
            .post(self.url("/signin"))
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(transport_error)?;
        let body: TokenResponse = decode(response).await?;
        Ok(AuthToken::new(body.token))
    }

    #[instrument(skip_all)]
    async fn get_identity(&self, token: &AuthToken) -> Result<Identity> {
        let response = self
            .client
            .get(self.url("/users/me"))
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(transport_error)?;
        decode::<Envelope>(response).await.map(Identity::from)
    }
}

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::errors::ClientError;
use crate::game::clock::ClockAction;
use crate::models::common::{ErrorResponse, MessageResponse};
use crate::models::goal::{Goal, QuickGoalRequest};
use crate::models::matches::{ClockRequest, ClockResponse, MatchDetail};
use crate::models::player::{CreatePlayerRequest, Player, UpdatePlayerRequest};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Thin typed wrapper over the REST API, one method per operation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn list_players(&self, include_inactive: bool) -> Result<Vec<Player>, ClientError> {
        let mut request = self.client.get(self.url("/jogadores/"));
        if include_inactive {
            request = request.query(&[("ativo", "false")]);
        }
        parse(request.send().await?).await
    }

    pub async fn create_player(&self, player: &CreatePlayerRequest) -> Result<Player, ClientError> {
        self.send_json(self.client.post(self.url("/jogadores/")), player).await
    }

    pub async fn get_player(&self, player_id: i64) -> Result<Player, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/jogadores/{}", player_id)))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn update_player(&self, player_id: i64, update: &UpdatePlayerRequest) -> Result<Player, ClientError> {
        self.send_json(self.client.put(self.url(&format!("/jogadores/{}", player_id))), update)
            .await
    }

    /// Soft delete on the server side.
    pub async fn delete_player(&self, player_id: i64) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/jogadores/{}", player_id)))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn get_match_detail(&self, match_id: i64) -> Result<MatchDetail, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/partidas/{}/detalhada", match_id)))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn clock_action(&self, match_id: i64, action: ClockAction) -> Result<ClockResponse, ClientError> {
        self.send_json(
            self.client.post(self.url(&format!("/partidas/{}/cronometro", match_id))),
            &ClockRequest { acao: action },
        )
        .await
    }

    pub async fn quick_goal(&self, match_id: i64, goal: &QuickGoalRequest) -> Result<Goal, ClientError> {
        self.send_json(
            self.client.post(self.url(&format!("/partidas/{}/gol-rapido", match_id))),
            goal,
        )
        .await
    }

    async fn send_json<B, T>(&self, request: reqwest::RequestBuilder, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = request.json(body).send().await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!("Request failed with status {}: {}", status, body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// The server's `detail` text, else the raw body, else the bare status.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return error.detail;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Erro HTTP {}", status)
    } else {
        body.to_string()
    }
}

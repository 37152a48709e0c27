use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::{ApiClient, ClientError};
use crate::models::player::Player;
use crate::views::player_form::{PlayerForm, PlayerSubmission};

#[derive(Debug, Clone, Default)]
pub struct PlayerListState {
    pub players: Vec<Player>,
    pub include_inactive: bool,
    pub loading: bool,
    /// Last failure, shown above the table
    pub error: Option<String>,
    /// Open create/edit form, if any
    pub form: Option<PlayerForm>,
    generation: u64,
}

/// One list fetch; its response is dropped if a newer fetch started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListTicket {
    include_inactive: bool,
    generation: u64,
}

impl PlayerListState {
    fn begin_load(&mut self) -> ListTicket {
        self.generation += 1;
        self.loading = true;
        ListTicket {
            include_inactive: self.include_inactive,
            generation: self.generation,
        }
    }

    /// Applies a fetched list unless it went stale. Returns whether it applied.
    fn apply_load(&mut self, ticket: ListTicket, result: Result<Vec<Player>, ClientError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("Discarding stale player list (inactive: {})", ticket.include_inactive);
            return false;
        }

        self.loading = false;
        match result {
            Ok(players) => {
                tracing::debug!("Loaded {} players", players.len());
                self.players = players;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load players: {}", e);
                self.error = Some(e.to_string());
            }
        }
        true
    }
}

/// Player table with its create/edit form. Every mutation is followed by a
/// full reload from the server.
#[derive(Debug, Clone)]
pub struct PlayerListView {
    api: ApiClient,
    state: Arc<Mutex<PlayerListState>>,
}

impl PlayerListView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(PlayerListState::default())),
        }
    }

    pub async fn snapshot(&self) -> PlayerListState {
        self.state.lock().await.clone()
    }

    /// Fetches the list for the current filter. Returns false when a newer
    /// load overtook this one.
    pub async fn load(&self) -> bool {
        let ticket = self.state.lock().await.begin_load();
        let result = self.api.list_players(ticket.include_inactive).await;
        self.state.lock().await.apply_load(ticket, result)
    }

    pub async fn set_include_inactive(&self, include_inactive: bool) {
        self.state.lock().await.include_inactive = include_inactive;
        self.load().await;
    }

    pub async fn open_create(&self) {
        self.state.lock().await.form = Some(PlayerForm::new());
    }

    /// Opens the form pre-filled with the player, fetching it when it is not
    /// among the loaded rows.
    pub async fn open_edit(&self, player_id: i64) {
        let loaded = {
            let state = self.state.lock().await;
            state.players.iter().find(|p| p.id == player_id).cloned()
        };

        let player = match loaded {
            Some(player) => Ok(player),
            None => self.api.get_player(player_id).await,
        };

        let mut state = self.state.lock().await;
        match player {
            Ok(player) => state.form = Some(PlayerForm::for_player(&player)),
            Err(e) => state.error = Some(e.to_string()),
        }
    }

    pub async fn close_form(&self) {
        self.state.lock().await.form = None;
    }

    /// Validates locally, then creates or updates and reloads. An invalid
    /// form stays open with its messages and nothing is sent.
    pub async fn save(&self, mut form: PlayerForm) -> bool {
        let submission = match form.submission() {
            Some(submission) => submission,
            None => {
                tracing::debug!("Player form rejected locally: {:?}", form.errors);
                self.state.lock().await.form = Some(form);
                return false;
            }
        };

        let result: Result<Player, ClientError> = match &submission {
            PlayerSubmission::Create(request) => self.api.create_player(request).await,
            PlayerSubmission::Update(id, request) => self.api.update_player(*id, request).await,
        };

        match result {
            Ok(player) => {
                tracing::info!("Saved player {}", player.id);
                {
                    let mut state = self.state.lock().await;
                    state.form = None;
                    state.error = None;
                }
                self.load().await;
                true
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.error = Some(e.to_string());
                state.form = Some(form);
                false
            }
        }
    }

    /// Deletes after `confirm` agrees; a refusal leaves everything untouched.
    pub async fn delete<F>(&self, player_id: i64, confirm: F) -> bool
    where
        F: FnOnce(Option<&Player>) -> bool,
    {
        let player = {
            let state = self.state.lock().await;
            state.players.iter().find(|p| p.id == player_id).cloned()
        };
        if !confirm(player.as_ref()) {
            return false;
        }

        match self.api.delete_player(player_id).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete player {}: {}", player_id, e);
                self.state.lock().await.error = Some(e.to_string());
                false
            }
        }
    }
}

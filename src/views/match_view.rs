use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::client::{ApiClient, ClientError};
use crate::game::clock::{format_elapsed, ClockAction, ClockState};
use crate::models::common::TeamSide;
use crate::models::goal::{GoalSummary, QuickGoalRequest};
use crate::models::matches::{Match, MatchDetail};
use crate::models::player::RosterEntry;
use crate::views::ticker::Ticker;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const NO_MATCH_LOADED: &str = "Nenhuma partida carregada";
const NO_SCORER_SELECTED: &str = "Selecione um jogador";

/// Identifies one load; its response is dropped if another load or an
/// unmount happened in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadTicket {
    match_id: i64,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct MatchViewState {
    pub match_id: Option<i64>,
    pub partida: Option<Match>,
    pub gols: Vec<GoalSummary>,
    pub jogadores: Vec<RosterEntry>,
    pub clock_state: ClockState,
    /// Recomputed from the match timestamps on every tick
    pub elapsed_seconds: i64,
    pub running: bool,
    pub selected_player: Option<i64>,
    pub selected_side: TeamSide,
    pub loading: bool,
    pub error: Option<String>,
    /// Server clock minus client clock, measured on the last load
    clock_offset: chrono::Duration,
    generation: u64,
    mounted: bool,
}

impl Default for MatchViewState {
    fn default() -> Self {
        Self {
            match_id: None,
            partida: None,
            gols: Vec::new(),
            jogadores: Vec::new(),
            clock_state: ClockState::Idle,
            elapsed_seconds: 0,
            running: false,
            selected_player: None,
            selected_side: TeamSide::A,
            loading: false,
            error: None,
            clock_offset: chrono::Duration::zero(),
            generation: 0,
            mounted: true,
        }
    }
}

impl MatchViewState {
    /// `mm:ss` of the displayed clock
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    pub fn clock_offset(&self) -> chrono::Duration {
        self.clock_offset
    }

    /// Derive state and elapsed time from the server timestamps at the
    /// client instant `client_now`, shifted onto the server clock.
    pub fn refresh_elapsed(&mut self, client_now: DateTime<Utc>) {
        match &self.partida {
            Some(partida) => {
                let clock = partida.clock();
                self.clock_state = clock.state();
                self.elapsed_seconds = clock.elapsed_seconds(client_now + self.clock_offset);
            }
            None => {
                self.clock_state = ClockState::Idle;
                self.elapsed_seconds = 0;
            }
        }
    }

    fn begin_load(&mut self, match_id: i64) -> LoadTicket {
        if self.match_id != Some(match_id) {
            self.partida = None;
            self.gols.clear();
            self.jogadores.clear();
            self.selected_player = None;
            self.running = false;
            self.refresh_elapsed(Utc::now());
        }
        self.generation += 1;
        self.match_id = Some(match_id);
        self.mounted = true;
        self.loading = true;
        LoadTicket {
            match_id,
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        self.mounted && self.generation == ticket.generation && self.match_id == Some(ticket.match_id)
    }

    /// Applies a load result unless it went stale. Returns whether it applied.
    fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MatchDetail, ClientError>,
        received_at: DateTime<Utc>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale load of match {}", ticket.match_id);
            return false;
        }

        self.loading = false;
        match result {
            Ok(detail) => {
                self.clock_offset = detail.gerado_em - received_at;
                self.running = detail.partida.clock().is_running();
                self.partida = Some(detail.partida);
                self.gols = detail.gols;
                self.jogadores = detail.jogadores;
                if let Some(selected) = self.selected_player {
                    if !self.jogadores.iter().any(|j| j.id == selected) {
                        self.selected_player = None;
                    }
                }
                self.error = None;
                self.refresh_elapsed(received_at);
            }
            Err(e) => {
                tracing::error!("Failed to load match {}: {}", ticket.match_id, e);
                self.error = Some(e.to_string());
            }
        }
        true
    }

    fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        self.loading = false;
    }
}

/// Live match screen: clock display, clock controls and quick goals.
///
/// Cloning yields another handle to the same view. The one-second ticker
/// runs only while the derived clock is running and dies with the last
/// handle.
#[derive(Debug, Clone)]
pub struct MatchView {
    api: ApiClient,
    state: Arc<Mutex<MatchViewState>>,
    ticker: Arc<Mutex<Option<Ticker>>>,
}

impl MatchView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(MatchViewState::default())),
            ticker: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn snapshot(&self) -> MatchViewState {
        self.state.lock().await.clone()
    }

    pub async fn ticker_running(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map(Ticker::is_running)
            .unwrap_or(false)
    }

    /// Fetches the detail bundle. Returns false when the response was
    /// discarded as stale.
    pub async fn load(&self, match_id: i64) -> bool {
        let ticket = self.state.lock().await.begin_load(match_id);
        self.stop_ticker().await;

        let result = self.api.get_match_detail(match_id).await;

        let applied = self
            .state
            .lock()
            .await
            .apply_load(ticket, result, Utc::now());
        if applied {
            self.sync_ticker().await;
        }
        applied
    }

    /// Re-fetches the current match. Does nothing once unmounted.
    pub async fn reload(&self) -> bool {
        let match_id = {
            let state = self.state.lock().await;
            if !state.mounted {
                return false;
            }
            state.match_id
        };
        match match_id {
            Some(match_id) => self.load(match_id).await,
            None => false,
        }
    }

    pub async fn play(&self) -> bool {
        self.clock_action(ClockAction::Play).await
    }

    pub async fn pause(&self) -> bool {
        self.clock_action(ClockAction::Pause).await
    }

    pub async fn reset(&self) -> bool {
        self.clock_action(ClockAction::Reset).await
    }

    /// Sends the action; on success flips `running` right away and then
    /// re-fetches the detail, which has the final word. An unmounted view
    /// sends nothing.
    pub async fn clock_action(&self, action: ClockAction) -> bool {
        let match_id = match self.current_match().await {
            Some(match_id) => match_id,
            None => return false,
        };

        match self.api.clock_action(match_id, action).await {
            Ok(_) => {
                self.state.lock().await.running = action == ClockAction::Play;
                self.reload().await;
                true
            }
            Err(e) => {
                tracing::warn!("Clock {} on match {} failed: {}", action, match_id, e);
                self.state.lock().await.error = Some(e.to_string());
                false
            }
        }
    }

    pub async fn select_player(&self, player_id: Option<i64>) {
        self.state.lock().await.selected_player = player_id;
    }

    pub async fn select_side(&self, side: TeamSide) {
        self.state.lock().await.selected_side = side;
    }

    /// Quick goal for the selected player and side. Without a selected
    /// player, or once unmounted, nothing is sent.
    pub async fn log_goal(&self) -> bool {
        let (match_id, request) = {
            let mut state = self.state.lock().await;
            if !state.mounted {
                return false;
            }
            let match_id = match state.match_id {
                Some(match_id) => match_id,
                None => {
                    state.error = Some(NO_MATCH_LOADED.to_string());
                    return false;
                }
            };
            let jogador_id = match state.selected_player {
                Some(jogador_id) => jogador_id,
                None => {
                    state.error = Some(NO_SCORER_SELECTED.to_string());
                    return false;
                }
            };
            (match_id, QuickGoalRequest { jogador_id, time: state.selected_side })
        };

        match self.api.quick_goal(match_id, &request).await {
            Ok(goal) => {
                tracing::info!("Goal {} logged at minute {}", goal.id, goal.minute);
                self.reload().await;
                true
            }
            Err(e) => {
                self.state.lock().await.error = Some(e.to_string());
                false
            }
        }
    }

    /// Recompute the displayed clock now.
    pub async fn tick(&self) {
        self.state.lock().await.refresh_elapsed(Utc::now());
    }

    /// Detach from the screen: in-flight loads are discarded and the ticker stops.
    pub async fn unmount(&self) {
        self.state.lock().await.unmount();
        self.stop_ticker().await;
    }

    async fn current_match(&self) -> Option<i64> {
        let mut state = self.state.lock().await;
        if !state.mounted {
            return None;
        }
        if state.match_id.is_none() {
            state.error = Some(NO_MATCH_LOADED.to_string());
        }
        state.match_id
    }

    async fn stop_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.stop();
        }
    }

    async fn sync_ticker(&self) {
        let running = self.state.lock().await.clock_state == ClockState::Running;
        let mut slot = self.ticker.lock().await;
        if !running {
            slot.take();
            return;
        }
        if slot.is_none() {
            let state = self.state.clone();
            *slot = Some(Ticker::spawn(TICK_PERIOD, move || {
                let state = state.clone();
                async move {
                    state.lock().await.refresh_elapsed(Utc::now());
                }
            }));
        }
    }
}

//! Player list and match view driven against a live server.

use peladas_manager::client::ApiClient;
use peladas_manager::game::clock::ClockState;
use peladas_manager::models::common::TeamSide;
use peladas_manager::views::{FormMode, MatchView, PlayerForm, PlayerListView};

mod common;
use common::utils::{create_test_match, create_test_pelada, create_test_player, spawn_app};

fn form(nome: &str, email: &str) -> PlayerForm {
    let mut form = PlayerForm::new();
    form.nome = nome.to_string();
    form.email = email.to_string();
    form
}

#[tokio::test]
async fn player_list_create_edit_delete() {
    let test_app = spawn_app().await;
    let view = PlayerListView::new(ApiClient::new(&test_app.address).unwrap());

    view.load().await;
    assert!(view.snapshot().await.players.is_empty());

    view.open_create().await;
    assert!(view.snapshot().await.form.is_some());
    view.close_form().await;
    assert!(view.snapshot().await.form.is_none());

    view.open_create().await;
    assert!(view.save(form("Formiga", "formiga@selecao.com")).await);
    let state = view.snapshot().await;
    assert_eq!(state.players.len(), 1);
    assert!(state.form.is_none());
    let id = state.players[0].id;

    view.open_edit(id).await;
    let mut edit = view.snapshot().await.form.expect("edit form is open");
    assert_eq!(edit.mode(), FormMode::Edit(id));
    assert_eq!(edit.nome, "Formiga");
    edit.set_skill_level(9);
    assert!(view.save(edit).await);
    assert_eq!(view.snapshot().await.players[0].skill_level, 9);

    // server-side rejection lands in the error slot, form stays open
    create_test_player(&test_app, "Outra").await;
    let mut clash = form("Formiga", "formiga@selecao.com");
    clash.set_skill_level(3);
    assert!(!view.save(clash).await);
    let state = view.snapshot().await;
    assert_eq!(state.error.as_deref(), Some("Email já cadastrado"));
    assert!(state.form.is_some());

    assert!(view.delete(id, |player| player.map(|p| p.name == "Formiga").unwrap_or(false)).await);
    let state = view.snapshot().await;
    assert_eq!(state.players.len(), 1);
    assert!(state.players.iter().all(|p| p.id != id));

    view.set_include_inactive(true).await;
    assert_eq!(view.snapshot().await.players.len(), 2);
}

#[tokio::test]
async fn match_view_clock_and_quick_goal() {
    let test_app = spawn_app().await;
    let pelada = create_test_pelada(&test_app).await;
    let partida = create_test_match(&test_app, pelada["id"].as_i64().unwrap()).await;
    let match_id = partida["id"].as_i64().unwrap();
    let scorer = create_test_player(&test_app, "Adriano").await;
    let scorer_id = scorer["id"].as_i64().unwrap();

    let view = MatchView::new(ApiClient::new(&test_app.address).unwrap());
    assert!(view.load(match_id).await);
    let state = view.snapshot().await;
    assert_eq!(state.clock_state, ClockState::Idle);
    assert!(!view.ticker_running().await);
    assert_eq!(state.jogadores.len(), 1);

    // no scorer selected: refused locally
    assert!(!view.log_goal().await);
    assert!(view.snapshot().await.error.is_some());

    assert!(view.play().await);
    let state = view.snapshot().await;
    assert_eq!(state.clock_state, ClockState::Running);
    assert!(state.running);
    assert!(view.ticker_running().await);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    view.tick().await;
    assert!(view.snapshot().await.elapsed_seconds >= 1);

    view.select_player(Some(scorer_id)).await;
    view.select_side(TeamSide::B).await;
    assert!(view.log_goal().await);
    let state = view.snapshot().await;
    assert_eq!(state.gols.len(), 1);
    assert_eq!(state.partida.as_ref().unwrap().team_b_goals, 1);
    assert!(state.error.is_none());

    assert!(view.pause().await);
    let state = view.snapshot().await;
    assert_eq!(state.clock_state, ClockState::Paused);
    assert!(!state.running);
    assert!(!view.ticker_running().await);

    // pausing twice is refused by the server and shown
    assert!(!view.pause().await);
    assert!(view.snapshot().await.error.is_some());

    assert!(view.reset().await);
    let state = view.snapshot().await;
    assert_eq!(state.clock_state, ClockState::Idle);
    assert_eq!(state.elapsed_seconds, 0);

    view.unmount().await;
    assert!(!view.reload().await);
}

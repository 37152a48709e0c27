//! The typed client against a live server.

use peladas_manager::client::{ApiClient, ClientError};
use peladas_manager::game::clock::{ClockAction, ClockState};
use peladas_manager::models::common::TeamSide;
use peladas_manager::models::goal::QuickGoalRequest;
use peladas_manager::models::player::{CreatePlayerRequest, UpdatePlayerRequest};

mod common;
use common::utils::{create_test_match, create_test_pelada, spawn_app};

fn new_player(nome: &str, email: &str) -> CreatePlayerRequest {
    CreatePlayerRequest {
        name: nome.to_string(),
        email: email.to_string(),
        phone: None,
        preferred_position: Some("Goleiro".to_string()),
        skill_level: 6,
    }
}

#[tokio::test]
async fn player_operations_round_trip_through_the_client() {
    let test_app = spawn_app().await;
    let api = ApiClient::new(&test_app.address).expect("Failed to build client");

    let created = api.create_player(&new_player("Taffarel", "taffarel@selecao.com")).await.unwrap();
    assert_eq!(created.name, "Taffarel");
    assert!(created.active);

    let fetched = api.get_player(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = api
        .update_player(created.id, &UpdatePlayerRequest { skill_level: Some(10), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.skill_level, 10);

    let message = api.delete_player(created.id).await.unwrap();
    assert_eq!(message.message, "Jogador desativado com sucesso");

    assert!(api.list_players(false).await.unwrap().is_empty());
    let everyone = api.list_players(true).await.unwrap();
    assert_eq!(everyone.len(), 1);
    assert!(!everyone[0].active);
}

#[tokio::test]
async fn server_detail_becomes_the_error_text() {
    let test_app = spawn_app().await;
    let api = ApiClient::new(&test_app.address).unwrap();
    api.create_player(&new_player("Dida", "dida@selecao.com")).await.unwrap();

    let error = api.create_player(&new_player("Dida", "dida@selecao.com")).await.unwrap_err();
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.to_string(), "Email já cadastrado");

    let missing = api.get_player(404_404).await.unwrap_err();
    assert!(matches!(missing, ClientError::Status { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();
    let error = api.list_players(false).await.unwrap_err();
    assert!(matches!(error, ClientError::Network(_)));
}

#[tokio::test]
async fn match_operations_through_the_client() {
    let test_app = spawn_app().await;
    let api = ApiClient::new(&test_app.address).unwrap();
    let pelada = create_test_pelada(&test_app).await;
    let partida = create_test_match(&test_app, pelada["id"].as_i64().unwrap()).await;
    let match_id = partida["id"].as_i64().unwrap();
    let scorer = api.create_player(&new_player("Cafu", "cafu@selecao.com")).await.unwrap();

    let response = api.clock_action(match_id, ClockAction::Play).await.unwrap();
    assert_eq!(response.cronometro.state, ClockState::Running);

    let goal = api
        .quick_goal(match_id, &QuickGoalRequest { jogador_id: scorer.id, time: TeamSide::B })
        .await
        .unwrap();
    assert_eq!(goal.team, TeamSide::B);

    let detail = api.get_match_detail(match_id).await.unwrap();
    assert_eq!(detail.partida.team_b_goals, 1);
    assert_eq!(detail.gols.len(), 1);
    assert_eq!(detail.gols[0].player_name, "Cafu");

    let error = api.clock_action(match_id, ClockAction::Play).await.unwrap_err();
    assert_eq!(error.to_string(), "Cronômetro já está rodando");
}

//! Peladas and player enrolment.

use reqwest::Client;
use serde_json::{json, Value};

mod common;
use common::utils::{api, create_test_match, create_test_pelada, create_test_player, spawn_app};

#[tokio::test]
async fn create_and_get_pelada() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let pelada = create_test_pelada(&test_app).await;

    assert_eq!(pelada["status"], "planejada");
    assert_eq!(pelada["max_jogadores"], 14);
    assert_eq!(pelada["valor_por_jogador"], 1500);
    assert_eq!(pelada["data_evento"], "2025-03-08");

    let fetched: Value = client
        .get(api(&test_app, &format!("/peladas/{}", pelada["id"])))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["nome"], "Pelada de Sábado");

    let missing = client.get(api(&test_app, "/peladas/777")).send().await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn invalid_pelada_is_rejected() {
    let test_app = spawn_app().await;
    let response = Client::new()
        .post(api(&test_app, "/peladas/"))
        .json(&json!({
            "nome": "Pelada",
            "data_evento": "2025-03-08",
            "local": "Quadra",
            "max_jogadores": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn update_pelada_status_and_capacity() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let pelada = create_test_pelada(&test_app).await;
    let url = api(&test_app, &format!("/peladas/{}", pelada["id"]));

    let updated: Value = client
        .put(&url)
        .json(&json!({ "status": "confirmada", "local": "Campo do Zé" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["status"], "confirmada");
    assert_eq!(updated["local"], "Campo do Zé");
    assert_eq!(updated["max_jogadores"], 14);

    let invalid = client.put(&url).json(&json!({ "status": "adiada" })).send().await.unwrap();
    assert_eq!(invalid.status().as_u16(), 400);
}

#[tokio::test]
async fn enrolment_lifecycle() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let pelada = create_test_pelada(&test_app).await;
    let player = create_test_player(&test_app, "Marta").await;
    let pelada_id = pelada["id"].as_i64().unwrap();
    let player_id = player["id"].as_i64().unwrap();
    let participants_url = api(&test_app, &format!("/peladas/{}/participantes", pelada_id));

    let response = client
        .post(&participants_url)
        .json(&json!({ "jogador_id": player_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let participation: Value = response.json().await.unwrap();
    assert_eq!(participation["confirmado"], false);
    assert_eq!(participation["time"], Value::Null);

    let again = client
        .post(&participants_url)
        .json(&json!({ "jogador_id": player_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 400);
    let error: Value = again.json().await.unwrap();
    assert_eq!(error["detail"], "Jogador já inscrito nesta pelada");

    let confirmed: Value = client
        .patch(format!("{}/{}", participants_url, player_id))
        .json(&json!({ "confirmado": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(confirmed["confirmado"], true);

    let assigned: Value = client
        .put(format!("{}/{}/time", participants_url, player_id))
        .json(&json!({ "time": "B" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(assigned["time"], "B");

    let listed: Vec<Value> = client.get(&participants_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["jogador_nome"], "Marta");
    assert_eq!(listed[0]["jogador_id"], player_id);
    assert_eq!(listed[0]["time"], "B");

    let removed = client.delete(format!("{}/{}", participants_url, player_id)).send().await.unwrap();
    assert_eq!(removed.status().as_u16(), 200);
    let listed: Vec<Value> = client.get(&participants_url).send().await.unwrap().json().await.unwrap();
    assert!(listed.is_empty());

    let gone = client.delete(format!("{}/{}", participants_url, player_id)).send().await.unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn enrolment_rules() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let small: Value = client
        .post(api(&test_app, "/peladas/"))
        .json(&json!({
            "nome": "Racha",
            "data_evento": "2025-04-01",
            "local": "Quadra",
            "max_jogadores": 2
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = api(&test_app, &format!("/peladas/{}/participantes", small["id"]));

    for nome in ["Um", "Dois"] {
        let player = create_test_player(&test_app, nome).await;
        let response = client.post(&url).json(&json!({ "jogador_id": player["id"] })).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }

    let third = create_test_player(&test_app, "Três").await;
    let full = client.post(&url).json(&json!({ "jogador_id": third["id"] })).send().await.unwrap();
    assert_eq!(full.status().as_u16(), 400);
    let error: Value = full.json().await.unwrap();
    assert_eq!(error["detail"], "Pelada lotada");

    let unknown_player = client.post(&url).json(&json!({ "jogador_id": 9999 })).send().await.unwrap();
    assert_eq!(unknown_player.status().as_u16(), 404);

    let unknown_pelada = client
        .post(api(&test_app, "/peladas/9999/participantes"))
        .json(&json!({ "jogador_id": third["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_pelada.status().as_u16(), 404);

    // shrinking below the enrolment count is refused
    let shrink = client
        .put(api(&test_app, &format!("/peladas/{}", small["id"])))
        .json(&json!({ "max_jogadores": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(shrink.status().as_u16(), 400);
}

#[tokio::test]
async fn inactive_player_cannot_enrol() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let pelada = create_test_pelada(&test_app).await;
    let player = create_test_player(&test_app, "Aposentado").await;

    client
        .delete(api(&test_app, &format!("/jogadores/{}", player["id"])))
        .send()
        .await
        .unwrap();

    let response = client
        .post(api(&test_app, &format!("/peladas/{}/participantes", pelada["id"])))
        .json(&json!({ "jogador_id": player["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn deleting_pelada_cascades_to_matches() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let pelada = create_test_pelada(&test_app).await;
    let partida = create_test_match(&test_app, pelada["id"].as_i64().unwrap()).await;

    let response = client
        .delete(api(&test_app, &format!("/peladas/{}", pelada["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let gone = client
        .get(api(&test_app, &format!("/partidas/{}", partida["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

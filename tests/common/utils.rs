use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use peladas_manager::run;
use peladas_manager::config::settings::{get_config, DatabaseSettings};
use peladas_manager::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    // A fresh database file per test
    let db_path = std::env::temp_dir().join(format!("peladas-test-{}.db", Uuid::new_v4()));
    configuration.database.url = format!("sqlite://{}", db_path.display());
    let connection_pool = configure_db(&configuration.database).await;

    let server = run(
        listener,
        connection_pool.clone(),
        configuration.application.allowed_origins.clone(),
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> SqlitePool {
    let connection_pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options().expect("Invalid database URL"))
        .await
        .expect("Failed to open SQLite database.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub fn api(app: &TestApp, path: &str) -> String {
    format!("{}/api{}", app.address, path)
}

pub async fn create_test_player(app: &TestApp, nome: &str) -> Value {
    let client = Client::new();
    let email = format!("{}@peladas.com", Uuid::new_v4().simple());
    let response = client
        .post(api(app, "/jogadores/"))
        .json(&json!({
            "nome": nome,
            "email": email,
            "posicao_preferida": "Meio-campo",
            "nivel_habilidade": 7
        }))
        .send()
        .await
        .expect("Failed to create player.");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse player.")
}

pub async fn create_test_pelada(app: &TestApp) -> Value {
    let client = Client::new();
    let response = client
        .post(api(app, "/peladas/"))
        .json(&json!({
            "nome": "Pelada de Sábado",
            "data_evento": "2025-03-08",
            "local": "Aterro do Flamengo",
            "max_jogadores": 14,
            "valor_por_jogador": 1500
        }))
        .send()
        .await
        .expect("Failed to create pelada.");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse pelada.")
}

pub async fn create_test_match(app: &TestApp, pelada_id: i64) -> Value {
    let client = Client::new();
    let response = client
        .post(api(app, "/partidas/"))
        .json(&json!({
            "pelada_id": pelada_id,
            "nome": "Jogo 1",
            "horario_previsto": "2025-03-08T15:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create match.");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse match.")
}

pub async fn clock(app: &TestApp, match_id: i64, acao: &str) -> reqwest::Response {
    Client::new()
        .post(api(app, &format!("/partidas/{}/cronometro", match_id)))
        .json(&json!({ "acao": acao }))
        .send()
        .await
        .expect("Failed to send clock action.")
}

pub async fn quick_goal(app: &TestApp, match_id: i64, jogador_id: i64, time: &str) -> reqwest::Response {
    Client::new()
        .post(api(app, &format!("/partidas/{}/gol-rapido", match_id)))
        .json(&json!({ "jogador_id": jogador_id, "time": time }))
        .send()
        .await
        .expect("Failed to send quick goal.")
}

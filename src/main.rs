use std::net::TcpListener;
use std::time::Duration;
use sqlx::sqlite::SqlitePoolOptions;

use peladas_manager::run;
use peladas_manager::config::settings::get_config;
use peladas_manager::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "peladas-manager".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let connect_options = config.database
        .connect_options()
        .expect("Invalid database URL");
    let connection_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options)
        .await
        .expect("Failed to open the SQLite database");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");
    tracing::info!("Database ready at {}", config.database.url);

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        config.application.allowed_origins.clone()
    )?.await
}

use std::env;
use std::str::FromStr;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use sqlx::sqlite::SqliteConnectOptions;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings{
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    8
}

impl DatabaseSettings {
    /// Connection options for the SQLite file, creating it on first use.
    /// Foreign keys are enforced so cascading deletes work.
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(true))
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.url = db_url;
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert!(matches!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local)));
        assert!(matches!(Environment::try_from("production".to_string()), Ok(Environment::Production)));
        assert!(Environment::try_from("staging".to_string()).is_err());
    }

    #[test]
    fn test_application_address() {
        let settings = ApplicationSettings {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            allowed_origins: vec![],
        };
        assert_eq!(settings.address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_connect_options_accept_sqlite_urls() {
        let settings = DatabaseSettings {
            url: "sqlite://peladas.db".to_string(),
            max_connections: 4,
        };
        assert!(settings.connect_options().is_ok());
    }
}

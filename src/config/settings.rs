use std::env;

use config::{Config, ConfigError, File};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

use crate::config::jwt::JwtSettings;

/// Which configuration overlay to load on top of `base.yml`.
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

    fn detect() -> Result<Self, String> {
        match env::var("APP_ENVIRONMENT") {
            Ok(value) => value.try_into(),
            Err(_) => Ok(Environment::Local),
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
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtConfig,
}

impl Settings {
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings::new(
            self.jwt.secret.expose_secret().to_string(),
            self.jwt.expiration_hours,
        )
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct JwtConfig {
    pub secret: SecretString,
    pub expiration_hours: i64,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>,
}

impl DatabaseSettings {
    /// The full connection URL, preferring an explicitly provided one.
    pub fn connection_string(&self) -> SecretString {
        if let Some(db_url) = &self.db_url {
            return db_url.clone();
        }
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.db_name
        );
        SecretString::new(url.into_boxed_str())
    }
}

/// Layer the YAML files with environment-variable overrides on top.
/// `POSTGRES__*` and `APP__*` variables override the matching YAML keys;
/// `DATABASE_URL` and `JWT_SECRET` take precedence over everything.
pub fn load_config() -> Result<Settings, ConfigError> {
    dotenv().ok();

    let base_path = env::current_dir().expect("Failed to determine the current directory");
    let config_dir = base_path.join("configuration");
    let environment = Environment::detect().expect("Failed to parse APP_ENVIRONMENT.");

    let config = Config::builder()
        .add_source(File::from(config_dir.join("base.yml")))
        .add_source(File::from(
            config_dir.join(format!("{}.yml", environment.as_str())),
        ))
        .add_source(
            config::Environment::default()
                .prefix("POSTGRES")
                .prefix_separator("__")
                .separator("__"),
        )
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // Managed platforms expose the full DATABASE_URL directly
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }
    if let Ok(jwt_secret) = env::var("JWT_SECRET") {
        settings.jwt.secret = SecretString::new(jwt_secret.into_boxed_str());
    }

    Ok(settings)
}

use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub geocode: GeocodeConfig,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: String,
    /// Lifetime of an issued token, in seconds.
    pub token_ttl_secs: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Settings for the upstream geocoding provider and the search gate in front of it.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeConfig {
    pub base_url: String,
    pub user_agent: String,
    pub country_codes: String,
    /// Limit used when the client does not send a usable one.
    pub default_limit: usize,
    /// Limit for each word-order variation query.
    pub variation_limit: usize,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_requests: usize,
    pub cache_ttl_secs: u64,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml`. Nested keys use `__` in environment variables, e.g.
    /// `DATABASE__URL` or `GEOCODE__USER_AGENT`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "info")?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.token_ttl_secs", 3600)?
            .set_default("geocode.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocode.user_agent", "SpookyRoute/0.1 (educational project)")?
            .set_default("geocode.country_codes", "mx")?
            .set_default("geocode.default_limit", 15)?
            .set_default("geocode.variation_limit", 5)?
            .set_default("geocode.rate_limit_window_secs", 10)?
            .set_default("geocode.rate_limit_max_requests", 15)?
            .set_default("geocode.cache_ttl_secs", 60)?
            // Env file
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// Whether tokens are being signed with the built-in development secret.
    #[must_use]
    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }
}

const DEV_JWT_SECRET: &str = "dev_secret_change";

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

use std::env;
use std::fmt;

use auth::TokenKind;
use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as ConfigSource;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::session::errors::SessionError;
use crate::session::models::TokenDurations;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub kind: TokenKind,
    pub symmetric_key: String,
    pub access_token_duration_secs: i64,
    pub refresh_token_duration_secs: i64,
}

impl TokenConfig {
    /// Validated token lifetimes.
    ///
    /// # Errors
    /// * `InvalidTokenDurations` - Unless `0 < access < refresh`
    pub fn durations(&self) -> Result<TokenDurations, SessionError> {
        TokenDurations::new(
            Duration::seconds(self.access_token_duration_secs),
            Duration::seconds(self.refresh_token_duration_secs),
        )
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("kind", &self.kind)
            .field("symmetric_key", &"<redacted>")
            .field("access_token_duration_secs", &self.access_token_duration_secs)
            .field("refresh_token_duration_secs", &self.refresh_token_duration_secs)
            .finish()
    }
}

impl Config {
    /// Prefix of every environment override, e.g. `BANK_TOKEN__SYMMETRIC_KEY`.
    pub const ENV_PREFIX: &'static str = "BANK";

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (BANK_DATABASE__URL, BANK_TOKEN__SYMMETRIC_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// The symmetric key has no default; startup fails without one.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let files = ConfigSource::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        Self::with_environment(files, Self::environment())
    }

    // Example: BANK_TOKEN__KIND=sealed overrides token.kind
    fn environment() -> Environment {
        Environment::with_prefix(Self::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn with_environment(
        files: ConfigBuilder<DefaultState>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        files.add_source(environment).build()?.try_deserialize()
    }
}

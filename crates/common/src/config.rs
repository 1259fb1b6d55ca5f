use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use validator::Validate;

// Default constants
pub const DEFAULT_ENV_PREFIX: &str = "ACTIONS";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_USER_AGENT: &str = "actions-destinations/0.1";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment prefix for the Yahoo taxonomy API credentials, i.e.
/// `ACTIONS_YAHOO_AUDIENCES_TAXONOMY_CLIENT_ID` and `..._CLIENT_SECRET`.
pub const YAHOO_TAXONOMY_ENV_PREFIX: &str = "ACTIONS_YAHOO_AUDIENCES_TAXONOMY";

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::from(s))
}

#[derive(Debug, Deserialize, Default, Clone, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub http: HttpSettings,
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct HttpSettings {
    #[serde(default = "default_request_timeout_ms")]
    #[validate(range(min = 1))]
    pub request_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    #[validate(length(min = 1))]
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpSettings {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_filter")]
    #[validate(length(min = 1))]
    pub log_filter: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Client credentials a destination uses against its partner API.
#[derive(Deserialize, Validate)]
pub struct DestinationCredentials {
    #[validate(length(min = 1))]
    pub client_id: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub client_secret: SecretString,
}

impl fmt::Debug for DestinationCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl DestinationCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Load `<PREFIX>_CLIENT_ID` and `<PREFIX>_CLIENT_SECRET` from the process environment.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(prefix))
    }

    pub fn from_source(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build credentials configuration")?;

        let credentials: DestinationCredentials = cfg
            .try_deserialize()
            .context("Failed to deserialize destination credentials")?;

        credentials
            .validate()
            .map_err(|e| anyhow::anyhow!("Credentials validation failed: {:?}", e))?;

        if credentials.client_secret.expose_secret().is_empty() {
            anyhow::bail!("Credentials validation failed: client_secret is empty");
        }

        Ok(credentials)
    }
}

// Config implementation
impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = config::Config::builder();

        let builder = if std::path::Path::new(path).exists() {
            builder.add_source(config::File::with_name(path))
        } else {
            builder
        };

        // Map ACTIONS_HTTP__REQUEST_TIMEOUT_MS to http.request_timeout_ms, etc.
        let builder = builder.add_source(
            config::Environment::with_prefix(DEFAULT_ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build().context("Failed to build configuration")?;

        let app_config: AppConfig = cfg
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {:?}", e))?;

        tracing::debug!(
            "Loaded configuration (timeout {}ms, log filter '{}')",
            app_config.http.request_timeout_ms,
            app_config.telemetry.log_filter
        );
        Ok(app_config)
    }
}

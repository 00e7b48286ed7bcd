use std::env;

use tracing::info;
use url::Url;

use crate::error::{HandoffError, Result};

/// Endpoints and credentials loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Payment service
    pub payment_base_url: String,

    // Document database
    pub directory: DirectoryConfig,
}

/// Where the user directory lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub scheme: String,
    pub host: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Raw query string appended to the connection string, without `?`.
    pub options: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            payment_base_url: env::var("PAYMENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            directory: DirectoryConfig::from_env()?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        info!(
            payment_base_url = %self.payment_base_url,
            directory_host = %self.directory.host,
            directory_user = self.directory.username.as_deref().unwrap_or("(none)"),
            directory_password = if self.directory.password.is_some() { "set" } else { "unset" },
            "Loaded config"
        );
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            scheme: env::var("DIRECTORY_SCHEME").unwrap_or_else(|_| "mongodb".to_string()),
            host: env::var("DIRECTORY_HOST").unwrap_or_else(|_| "localhost:27017".to_string()),
            username: non_empty_env("DIRECTORY_USERNAME"),
            password: non_empty_env("DIRECTORY_PASSWORD"),
            options: non_empty_env("DIRECTORY_OPTIONS"),
            database: env::var("DIRECTORY_DATABASE").unwrap_or_else(|_| "user_data".to_string()),
            collection: env::var("DIRECTORY_COLLECTION").unwrap_or_else(|_| "users".to_string()),
        })
    }

    /// Build the driver connection string with credentials percent-encoded
    /// into the userinfo section. A password without a username is an error.
    pub fn connection_string(&self) -> Result<String> {
        let base = format!("{}://{}/", self.scheme, self.host);
        let mut url = Url::parse(&base)
            .map_err(|e| HandoffError::Config(format!("invalid directory address {base}: {e}")))?;

        match (&self.username, &self.password) {
            (Some(user), password) => {
                url.set_username(user)
                    .map_err(|_| HandoffError::Config("directory host cannot carry credentials".into()))?;
                url.set_password(password.as_deref())
                    .map_err(|_| HandoffError::Config("directory host cannot carry credentials".into()))?;
            }
            (None, Some(_)) => {
                return Err(HandoffError::Config(
                    "DIRECTORY_PASSWORD is set but DIRECTORY_USERNAME is not".into(),
                ));
            }
            (None, None) => {}
        }

        url.set_query(self.options.as_deref());
        Ok(url.to_string())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

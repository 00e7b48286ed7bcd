use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// TOML-backed server configuration. Host and port may be overridden by
/// `PAYMENT_HOST` / `PAYMENT_PORT`, the ledger path by `PAYMENT_LEDGER_PATH`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub payments: PaymentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for GET requests (the checkout page and its script).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentsConfig {
    /// Per-card ceiling on the running total.
    pub max_limit: f64,
    /// Charged when a request carries no `amount`.
    pub default_amount: f64,
    pub ledger_path: PathBuf,
    pub approved_cards: Vec<ApprovedCard>,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            max_limit: 1000.0,
            default_amount: 50.0,
            ledger_path: PathBuf::from("payments.json"),
            approved_cards: vec![
                ApprovedCard {
                    number: "4111111111111111".into(),
                    holder: "James McKenna".into(),
                },
                ApprovedCard {
                    number: "5500000000000004".into(),
                    holder: "Luna McKenna".into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovedCard {
    pub number: String,
    pub holder: String,
}

impl FileConfig {
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("PAYMENT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PAYMENT_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PAYMENT_PORT must be a number, got {port:?}"))?;
        }
        if let Ok(path) = std::env::var("PAYMENT_LEDGER_PATH") {
            self.payments.ledger_path = PathBuf::from(path);
        }
        Ok(())
    }
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

use anyhow::{Context, Result};
use handoff_common::Config;
use payment_client::PaymentClient;
use serde_json::Value;
use tracing::info;

fn client() -> Result<PaymentClient> {
    let config = Config::from_env()?;
    Ok(PaymentClient::new(&config.payment_base_url))
}

pub async fn send(path: &str, data: &str) -> Result<()> {
    let body: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    let (status, response) = client()?.send_json(path, &body).await?;
    info!(path, status, "Sent");
    println!("{status}");
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub async fn fetch(path: &str, params: &[(String, String)]) -> Result<()> {
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let text = client()?.get_text(path, &pairs).await?;
    println!("{text}");
    Ok(())
}

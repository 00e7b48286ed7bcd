pub mod checkout;
pub mod error;

pub use checkout::{Checkout, ValidationPolicy};
pub use error::{PaymentClientError, Result};

use handoff_common::Payload;
use serde::Serialize;
use serde_json::Value;

/// Path the checkout posts to.
pub const SUBMIT_PAYMENT_PATH: &str = "/submit-payment";

#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// POST the payload as JSON to `/submit-payment`.
    /// Any status outside 2xx is an error; the success body must be JSON.
    pub async fn submit_payment(&self, payload: &Payload) -> Result<Value> {
        let resp = self
            .client
            .post(self.url(SUBMIT_PAYMENT_PATH))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PaymentClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST any serializable value as JSON and return the status with the
    /// parsed body. Non-2xx statuses are returned, not treated as errors.
    /// An empty body parses as `null`.
    pub async fn send_json<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Result<(u16, Value)> {
        let resp = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(data)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        tracing::debug!(path, status, "send_json response");
        Ok((status, value))
    }

    /// GET with query parameters, returning the body as text whatever the status.
    pub async fn get_text(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let resp = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(path, status = status.as_u16(), "get_text response");
        Ok(resp.text().await?)
    }
}

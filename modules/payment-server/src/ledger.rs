//! Card registry, running totals and the on-disk payment log.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use handoff_common::PaymentForm;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::PaymentsConfig;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("ledger file is not a JSON array: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One approved payment as written to the ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub first_name: String,
    pub last_name: String,
    pub credit_card_number: String,
    pub expiration_date: String,
    pub ccv: String,
    pub shipping_address: String,
    pub amount: f64,
    pub recorded_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn new(form: &PaymentForm, amount: f64) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            credit_card_number: form.credit_card_number.clone(),
            expiration_date: form.expiration_date.clone(),
            ccv: form.ccv.clone(),
            shipping_address: form.shipping_address.clone(),
            amount,
            recorded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Charge {
    Approved { new_total: f64 },
    UnknownCard,
    LimitExceeded { current: f64, attempted: f64 },
}

pub struct PaymentLedger {
    approved: HashMap<String, String>,
    max_limit: f64,
    path: PathBuf,
    totals: Mutex<HashMap<String, f64>>,
}

impl PaymentLedger {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            approved: config
                .approved_cards
                .iter()
                .map(|c| (c.number.clone(), c.holder.clone()))
                .collect(),
            max_limit: config.max_limit,
            path: config.ledger_path.clone(),
            totals: Mutex::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn holder(&self, card: &str) -> Option<&str> {
        self.approved.get(card).map(String::as_str)
    }

    pub async fn total_for(&self, card: &str) -> f64 {
        self.totals.lock().await.get(card).copied().unwrap_or(0.0)
    }

    /// Check the card and its limit, append the record, then update the total.
    ///
    /// The totals lock is held across the file write so records land in the
    /// same order totals advance. A failed write leaves the total unchanged.
    pub async fn charge(&self, form: &PaymentForm, amount: f64) -> Result<Charge, LedgerError> {
        let card = form.credit_card_number.as_str();
        if !self.approved.contains_key(card) {
            return Ok(Charge::UnknownCard);
        }

        let mut totals = self.totals.lock().await;
        let current = totals.get(card).copied().unwrap_or(0.0);
        if current + amount > self.max_limit {
            return Ok(Charge::LimitExceeded {
                current,
                attempted: amount,
            });
        }

        self.append(&PaymentRecord::new(form, amount)).await?;

        let new_total = current + amount;
        totals.insert(card.to_string(), new_total);
        info!(amount, new_total, "Payment recorded");
        Ok(Charge::Approved { new_total })
    }

    async fn append(&self, record: &PaymentRecord) -> Result<(), LedgerError> {
        let mut records: Vec<serde_json::Value> = match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        records.push(serde_json::to_value(record)?);
        let out = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, out).await?;
        Ok(())
    }

    /// Every record currently in the ledger file.
    pub async fn records(&self) -> Result<Vec<PaymentRecord>, LedgerError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// Field names sent by the checkout, in form order.
pub const PAYMENT_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "credit_card_number",
    "expiration_date",
    "ccv",
    "shipping_address",
];

/// The six checkout form controls, values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub first_name: String,
    pub last_name: String,
    pub credit_card_number: String,
    pub expiration_date: String,
    pub ccv: String,
    pub shipping_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing(&'static str),
    Malformed { field: &'static str, reason: &'static str },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing(field) => write!(f, "{field} is required"),
            FieldIssue::Malformed { field, reason } => write!(f, "{field} {reason}"),
        }
    }
}

impl PaymentForm {
    /// Snapshot the form into a payload. Values are not trimmed or checked.
    pub fn payload(&self) -> Payload {
        Payload::from_fields(PAYMENT_FIELDS.iter().map(|&name| (name, self.field(name))))
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "credit_card_number" => &self.credit_card_number,
            "expiration_date" => &self.expiration_date,
            "ccv" => &self.ccv,
            "shipping_address" => &self.shipping_address,
            _ => "",
        }
    }

    /// Required fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        PAYMENT_FIELDS
            .iter()
            .copied()
            .filter(|name| self.field(name).trim().is_empty())
            .collect()
    }

    /// Presence plus format checks. An empty field is only reported as missing.
    pub fn validate(&self) -> Result<(), Vec<FieldIssue>> {
        let missing = self.missing_fields();
        let mut issues: Vec<FieldIssue> = missing.iter().map(|&f| FieldIssue::Missing(f)).collect();

        let card: String = self
            .credit_card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if !missing.contains(&"credit_card_number")
            && !(is_digits(&card) && (12..=19).contains(&card.len()))
        {
            issues.push(FieldIssue::Malformed {
                field: "credit_card_number",
                reason: "must be 12 to 19 digits",
            });
        }

        let ccv = self.ccv.trim();
        if !missing.contains(&"ccv") && !(is_digits(ccv) && (3..=4).contains(&ccv.len())) {
            issues.push(FieldIssue::Malformed {
                field: "ccv",
                reason: "must be 3 or 4 digits",
            });
        }

        if !missing.contains(&"expiration_date") && !is_expiration(self.expiration_date.trim()) {
            issues.push(FieldIssue::Malformed {
                field: "expiration_date",
                reason: "must look like MM/YY or MM/YYYY",
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_expiration(s: &str) -> bool {
    let Some((month, year)) = s.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2
        && is_digits(month)
        && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = (year.len() == 2 || year.len() == 4) && is_digits(year);
    month_ok && year_ok
}

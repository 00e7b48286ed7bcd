use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use handoff_common::{PaymentForm, PAYMENT_FIELDS};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::{is_provided, json_error, parse_object, text_field};
use crate::ledger::Charge;
use crate::AppState;

pub const MISSING_FIELDS: &str = "Missing one or more required fields: first_name, last_name, credit_card_number, expiration_date, ccv, shipping_address";
pub const CARD_NOT_RECOGNIZED: &str = "Card not recognized. Payment rejected.";

pub async fn submit_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Body is not logged: it carries card data.
    info!(bytes = body.len(), "Payment submission received");

    let body = match parse_object(&headers, &body) {
        Ok(map) => map,
        Err(resp) => return resp,
    };

    // Presence is judged on the raw values: 0, false and "" are all missing.
    if !PAYMENT_FIELDS.iter().all(|f| is_provided(body.get(*f))) {
        return json_error(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    }

    let form = PaymentForm {
        first_name: text_field(&body, "first_name"),
        last_name: text_field(&body, "last_name"),
        credit_card_number: text_field(&body, "credit_card_number"),
        expiration_date: text_field(&body, "expiration_date"),
        ccv: text_field(&body, "ccv"),
        shipping_address: text_field(&body, "shipping_address"),
    };

    let amount = match parse_amount(&body, state.default_amount) {
        Ok(a) => a,
        Err(msg) => return json_error(StatusCode::BAD_REQUEST, msg),
    };

    match state.ledger.charge(&form, amount).await {
        Ok(Charge::Approved { new_total }) => {
            let holder = state.ledger.holder(&form.credit_card_number).unwrap_or_default();
            info!(amount, new_total, holder, "Payment approved");
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!(
                        "Payment of ${amount:.2} submitted for {} {}.",
                        form.first_name, form.last_name
                    ),
                    "status": "approved",
                })),
            )
                .into_response()
        }
        Ok(Charge::UnknownCard) => {
            info!("Payment declined: unknown card");
            declined(StatusCode::FORBIDDEN, CARD_NOT_RECOGNIZED.to_string())
        }
        Ok(Charge::LimitExceeded { current, attempted }) => {
            info!(current, attempted, "Payment declined: limit exceeded");
            declined(
                StatusCode::PAYMENT_REQUIRED,
                format!("Card exceeded limit. Current: ${current:.2}, attempted: ${attempted:.2}"),
            )
        }
        Err(e) => {
            warn!(error = %e, "Failed to record payment");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to write to file: {e}"),
            )
        }
    }
}

fn declined(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "status": "declined", "message": message }))).into_response()
}

/// `amount` may be a number or a numeric string; absent or null means the default.
pub(crate) fn parse_amount(body: &Map<String, Value>, default: f64) -> Result<f64, String> {
    let amount = match body.get("amount") {
        None | Some(Value::Null) => default,
        Some(Value::Number(n)) => n.as_f64().ok_or("amount is not a valid number")?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("could not convert amount to a number: {e}"))?,
        Some(_) => return Err("amount must be a number".to_string()),
    };
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be a positive number".to_string());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn amount_defaults_when_absent() {
        assert_eq!(parse_amount(&body(json!({})), 50.0), Ok(50.0));
        assert_eq!(parse_amount(&body(json!({"amount": null})), 50.0), Ok(50.0));
    }

    #[test]
    fn amount_accepts_numeric_strings() {
        assert_eq!(parse_amount(&body(json!({"amount": " 12.5 "})), 50.0), Ok(12.5));
        assert_eq!(parse_amount(&body(json!({"amount": 7})), 50.0), Ok(7.0));
    }

    #[test]
    fn amount_rejects_garbage_and_non_positive() {
        assert!(parse_amount(&body(json!({"amount": "ten"})), 50.0).is_err());
        assert!(parse_amount(&body(json!({"amount": -5})), 50.0).is_err());
        assert!(parse_amount(&body(json!({"amount": 0})), 50.0).is_err());
        assert!(parse_amount(&body(json!({"amount": [1]})), 50.0).is_err());
    }
}

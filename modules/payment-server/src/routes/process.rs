use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use tracing::info;

use super::{is_provided, json_error, parse_object, text_field};

pub const MISSING_PAYMENT_FIELDS: &str = "Missing payment fields (payer, payee, amount)";

/// Payer-to-payee transfer acknowledgement. Nothing is recorded.
pub async fn process_payment(headers: HeaderMap, body: Bytes) -> Response {
    let body = match parse_object(&headers, &body) {
        Ok(map) => map,
        Err(resp) => return resp,
    };

    if !["payer", "payee", "amount"]
        .iter()
        .all(|f| is_provided(body.get(*f)))
    {
        return json_error(StatusCode::BAD_REQUEST, MISSING_PAYMENT_FIELDS);
    }

    let payer = text_field(&body, "payer");
    let payee = text_field(&body, "payee");
    let amount = match body.get("amount") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    info!(%payer, %payee, %amount, "Transfer received");

    (
        StatusCode::OK,
        Json(json!({
            "message": format!("Payment of ${amount} from {payer} to {payee} has been received."),
            "status": "approved",
        })),
    )
        .into_response()
}

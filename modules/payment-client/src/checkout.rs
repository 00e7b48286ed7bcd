use handoff_common::{HandoffError, Messages, Notifier, Outcome, PaymentForm, Submitter};
use serde_json::Value;
use tracing::info;

use crate::PaymentClient;

pub const SUCCESS_MESSAGE: &str = "Payment submitted successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to submit payment.";

/// Whether the form is checked before it is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Send whatever was typed; the service decides.
    #[default]
    SendAsIs,
    /// Run [`PaymentForm::validate`] first and fail locally on any issue.
    Strict,
}

/// The checkout button: one click, one POST, one notice.
pub struct Checkout<N> {
    client: PaymentClient,
    submitter: Submitter<N>,
    policy: ValidationPolicy,
}

impl<N: Notifier> Checkout<N> {
    pub fn new(client: PaymentClient, notifier: N) -> Self {
        Self {
            client,
            submitter: Submitter::new(notifier, Messages::new(SUCCESS_MESSAGE, FAILURE_MESSAGE)),
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn submitter(&self) -> &Submitter<N> {
        &self.submitter
    }

    pub async fn click(&mut self, form: &PaymentForm) -> Outcome<Value> {
        let payload = form.payload();
        info!(
            fields = payload.len(),
            card = %mask_card(&form.credit_card_number),
            "Sending payment data"
        );

        if self.policy == ValidationPolicy::Strict {
            if let Err(issues) = form.validate() {
                let reason = HandoffError::Validation(issues).to_string();
                return self.submitter.reject("checkout", reason).await;
            }
        }

        self.submitter
            .submit("checkout", self.client.submit_payment(&payload))
            .await
    }
}

/// Last four characters only.
fn mask_card(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    let keep = chars.len().min(4);
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - keep), tail)
}

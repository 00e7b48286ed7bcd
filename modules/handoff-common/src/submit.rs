//! One request/response exchange per triggering event.
//!
//! A [`Submitter`] wraps whatever future performs the exchange (an HTTP POST,
//! a database read) and turns its result into exactly one user-facing notice.
//! Errors never escape: they are logged and collapsed into the generic
//! failure message.

use std::fmt;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::notice::{Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl SubmitState {
    fn can_move_to(self, next: SubmitState) -> bool {
        use SubmitState::*;
        matches!(
            (self, next),
            (Idle, InFlight)
                | (Idle, Failed)
                | (InFlight, Succeeded)
                | (InFlight, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmitState::Idle => "idle",
            SubmitState::InFlight => "in_flight",
            SubmitState::Succeeded => "succeeded",
            SubmitState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Texts of the two terminal notices.
#[derive(Debug, Clone)]
pub struct Messages {
    pub success: String,
    pub failure: String,
}

impl Messages {
    pub fn new(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self { success: success.into(), failure: failure.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Succeeded(T),
    /// Carries the underlying reason for logs; users only see the generic message.
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Succeeded(v) => Some(v),
            Outcome::Failed(_) => None,
        }
    }
}

pub struct Submitter<N> {
    notifier: N,
    messages: Messages,
    state: SubmitState,
    last: Option<SubmitState>,
}

impl<N: Notifier> Submitter<N> {
    pub fn new(notifier: N, messages: Messages) -> Self {
        Self {
            notifier,
            messages,
            state: SubmitState::Idle,
            last: None,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Terminal state of the most recent invocation, if any.
    pub fn last_result(&self) -> Option<SubmitState> {
        self.last
    }

    /// Await `exchange` once and report the result.
    ///
    /// Taking `&mut self` means a second submit cannot start while one is
    /// in flight on the same submitter.
    pub async fn submit<T, E, F>(&mut self, action: &str, exchange: F) -> Outcome<T>
    where
        T: fmt::Debug,
        E: fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        // A previous future dropped mid-flight leaves us stuck; start over.
        if self.state != SubmitState::Idle {
            warn!(action, state = %self.state, "Submitter was not idle, resetting");
            self.state = SubmitState::Idle;
        }

        self.transition(action, SubmitState::InFlight);

        let (outcome, notice) = match exchange.await {
            Ok(response) => {
                info!(action, response = ?response, "Exchange succeeded");
                (Outcome::Succeeded(response), Notice::success(&self.messages.success))
            }
            Err(e) => {
                warn!(action, error = %e, "Exchange failed");
                (Outcome::Failed(e.to_string()), Notice::failure(&self.messages.failure))
            }
        };

        let terminal = if outcome.is_success() {
            SubmitState::Succeeded
        } else {
            SubmitState::Failed
        };
        self.finish(action, terminal, &notice).await;
        outcome
    }

    /// Fail without sending anything, e.g. when a pre-send check rejects the payload.
    pub async fn reject<T>(&mut self, action: &str, reason: impl Into<String>) -> Outcome<T> {
        let reason = reason.into();
        warn!(action, reason = %reason, "Submission rejected before sending");
        self.state = SubmitState::Idle;
        let notice = Notice::failure(&self.messages.failure);
        self.finish(action, SubmitState::Failed, &notice).await;
        Outcome::Failed(reason)
    }

    async fn finish(&mut self, action: &str, terminal: SubmitState, notice: &Notice) {
        self.transition(action, terminal);
        self.last = Some(terminal);
        if let Err(e) = self.notifier.notify(notice).await {
            warn!(action, error = %e, "Failed to deliver notice");
        }
        self.transition(action, SubmitState::Idle);
    }

    fn transition(&mut self, action: &str, next: SubmitState) {
        debug_assert!(
            self.state.can_move_to(next),
            "illegal submit transition {} -> {}",
            self.state,
            next
        );
        debug!(action, from = %self.state, to = %next, "Submit state");
        self.state = next;
    }
}

pub mod config;
pub mod error;
pub mod notice;
pub mod payload;
pub mod payment;
pub mod submit;

pub use config::{Config, DirectoryConfig};
pub use error::{HandoffError, Result};
pub use notice::{ConsoleNotifier, Notice, NoticeLevel, Notifier, NoopNotifier, RecordingNotifier};
pub use payload::Payload;
pub use payment::{FieldIssue, PaymentForm, PAYMENT_FIELDS};
pub use submit::{Messages, Outcome, SubmitState, Submitter};

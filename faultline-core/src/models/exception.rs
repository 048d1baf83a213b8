use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured unhandled-error event. Immutable once stored; the store owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub stack: String,
    pub timestamp: DateTime<Utc>,
}

impl ExceptionRecord {
    pub fn now(stack: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            timestamp: Utc::now(),
        }
    }
}

//! Crash capture boundary.
//!
//! An owned error sink registered explicitly by the top-level run loop: the
//! binary awaits its main future and hands a fatal `Err` to
//! [`CrashBoundary::exit_failure`], which persists the error through the
//! store, logs it, and terminates the process non-zero. Because the boundary
//! is a plain value rather than a process-global hook, two instances cannot
//! silently double-register.

use std::sync::Arc;

use faultline_core::{ExceptionRecord, ExceptionStore, FaultlineError};

pub struct CrashBoundary {
    store: Arc<dyn ExceptionStore>,
}

impl CrashBoundary {
    pub fn new(store: Arc<dyn ExceptionStore>) -> Self {
        Self { store }
    }

    /// Persist one record built from the error's full rendering (cause chain,
    /// plus backtrace when `RUST_BACKTRACE` is set) and the capture time, then
    /// log it for the operator.
    pub async fn capture(&self, err: &anyhow::Error) -> Result<ExceptionRecord, FaultlineError> {
        let record = ExceptionRecord::now(format!("{:?}", err));
        self.store.store(record.clone()).await?;
        tracing::error!("Fatal error captured: {:#}", err);
        Ok(record)
    }

    /// Capture, then exit(1). A store failure during capture is logged and the
    /// process still exits non-zero; the record is lost in that case.
    ///
    /// Does not return.
    pub async fn exit_failure(&self, err: anyhow::Error) {
        if let Err(store_err) = self.capture(&err).await {
            tracing::error!("Failed to persist fatal error: {}", store_err);
        }
        std::process::exit(1);
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use faultline_core::{CountQuery, GetQuery, MemoryStore, TimestampOrder};

    #[tokio::test]
    async fn test_capture_stores_exactly_one_record() {
        let store = Arc::new(MemoryStore::new());
        let boundary = CrashBoundary::new(store.clone());

        let err = anyhow::anyhow!("listener crashed").context("accept loop");
        let before = Utc::now();
        let record = boundary.capture(&err).await.unwrap();

        assert!(record.stack.contains("accept loop"));
        assert!(record.stack.contains("listener crashed"));
        assert!(record.timestamp >= before && record.timestamp <= Utc::now());

        let total = store.count(&CountQuery { query: None }).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_captured_record_round_trips_through_get() {
        let store = Arc::new(MemoryStore::new());
        let boundary = CrashBoundary::new(store.clone());
        boundary
            .capture(&anyhow::anyhow!("boom in worker"))
            .await
            .unwrap();

        let page = store
            .get(&GetQuery {
                order: TimestampOrder::Desc,
                page: 1,
                limit: 100,
                query: Some("worker".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(page[0].stack.contains("boom in worker"));
    }
}

//! The store seam.
//!
//! Persistence, indexing, and querying of exception records live in backend
//! crates; this core consumes them through [`ExceptionStore`] only. The
//! [`MemoryStore`] here is the in-process reference implementation used by the
//! demo binary and the test suites, not a production backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::FaultlineError;
use crate::models::exception::ExceptionRecord;
use crate::query::{CountQuery, GetQuery, TimestampOrder};

#[async_trait]
pub trait ExceptionStore: Send + Sync {
    /// Persist one record.
    async fn store(&self, record: ExceptionRecord) -> Result<(), FaultlineError>;

    /// Fetch one page, ordered by timestamp and filtered by the optional text
    /// query. `q.page` is ≥ 1 by contract.
    async fn get(&self, q: &GetQuery) -> Result<Vec<ExceptionRecord>, FaultlineError>;

    /// Total records matching the filter, ignoring order and pagination.
    async fn count(&self, q: &CountQuery) -> Result<u64, FaultlineError>;
}

/// Reference store backed by a `Vec` behind an async lock. Filter is a
/// substring match on the stack text.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ExceptionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(record: &ExceptionRecord, query: Option<&str>) -> bool {
        match query {
            Some(q) => record.stack.contains(q),
            None => true,
        }
    }
}

#[async_trait]
impl ExceptionStore for MemoryStore {
    async fn store(&self, record: ExceptionRecord) -> Result<(), FaultlineError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn get(&self, q: &GetQuery) -> Result<Vec<ExceptionRecord>, FaultlineError> {
        let records = self.records.read().await;
        let mut matching: Vec<ExceptionRecord> = records
            .iter()
            .filter(|r| Self::matches(r, q.query.as_deref()))
            .cloned()
            .collect();

        matching.sort_by_key(|r| r.timestamp);
        if q.order == TimestampOrder::Desc {
            matching.reverse();
        }

        let offset = (q.page as usize).saturating_sub(1).saturating_mul(q.limit as usize);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(q.limit as usize)
            .collect())
    }

    async fn count(&self, q: &CountQuery) -> Result<u64, FaultlineError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| Self::matches(r, q.query.as_deref()))
            .count() as u64)
    }
}

// ============================================================================
// Unit tests
// ============================================================================

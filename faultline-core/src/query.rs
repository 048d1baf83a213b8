//! Dashboard query parameters.
//!
//! A request's raw query string is decoded into [`RawQuery`] by the server
//! crate, then overlaid onto per-request defaults here. The overlay rules are
//! deliberately conservative: `timestampOrder` is honored only for the exact
//! literal `"asc"`, and `page` produces an explicit [`PageParam::Invalid`]
//! rather than a coerced garbage value, so the caller has to pick a policy for
//! bad input instead of letting it flow into offset arithmetic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Page size for every dashboard request. Not user-overridable.
pub const PAGE_LIMIT: u32 = 100;

/// String-keyed query mapping — the only request capability the parser needs.
pub type RawQuery = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampOrder {
    Asc,
    #[default]
    Desc,
}

/// Result of parsing the `page` parameter.
///
/// `Valid` always holds a page number ≥ 1. `Invalid` keeps the raw text so the
/// rejection can echo what was actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageParam {
    Valid(u32),
    Invalid(String),
}

impl PageParam {
    fn parse(raw: &str) -> Self {
        match raw.parse::<u32>() {
            Ok(n) if n >= 1 => PageParam::Valid(n),
            _ => PageParam::Invalid(raw.to_string()),
        }
    }
}

/// Per-request dashboard parameters: defaults overlaid with whatever the
/// query string validly supplies. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub order: TimestampOrder,
    pub page: PageParam,
    pub limit: u32,
    pub query: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            order: TimestampOrder::Desc,
            page: PageParam::Valid(1),
            limit: PAGE_LIMIT,
            query: None,
        }
    }
}

impl QueryParams {
    pub fn from_raw(raw: &RawQuery) -> Self {
        let mut params = Self::default();

        // Only the exact literal "asc" flips the order. "desc", "ASC", or any
        // other value leaves the default untouched.
        if raw.get("timestampOrder").map(String::as_str) == Some("asc") {
            params.order = TimestampOrder::Asc;
        }
        if let Some(page) = raw.get("page") {
            params.page = PageParam::parse(page);
        }
        if let Some(q) = raw.get("q") {
            params.query = Some(q.clone());
        }

        params
    }

    /// The page fetch sent to the store. `None` when `page` is invalid — the
    /// store must never see a page outside its `page ≥ 1` contract.
    pub fn get_query(&self) -> Option<GetQuery> {
        match self.page {
            PageParam::Valid(page) => Some(GetQuery {
                order: self.order,
                page,
                limit: self.limit,
                query: self.query.clone(),
            }),
            PageParam::Invalid(_) => None,
        }
    }

    /// The count sent to the store: only the text filter, never order or
    /// pagination — the total is filter-dependent only.
    pub fn count_query(&self) -> CountQuery {
        CountQuery {
            query: self.query.clone(),
        }
    }
}

/// One page of exceptions, ordered and filtered. `page` is always ≥ 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetQuery {
    pub order: TimestampOrder,
    pub page: u32,
    pub limit: u32,
    pub query: Option<String>,
}

/// Total matching records for a filter, ignoring order and pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountQuery {
    pub query: Option<String>,
}

/// Offset-pagination boundary check: does the window fetched so far fall short
/// of the reported total? Infers a next page without issuing a page+1 probe.
pub fn has_next_page(page: u32, limit: u32, returned: usize, total: u64) -> bool {
    (page as u64 - 1) * limit as u64 + (returned as u64) < total
}

pub fn has_previous_page(page: u32) -> bool {
    page != 1
}

// ============================================================================
// Unit tests
// ============================================================================

//! The exceptions dashboard middleware.
//!
//! Intercepts exactly one path on the host router and serves the rendered
//! dashboard; every other request passes straight through to the next
//! handler with no side effects.
//!
//! Architecture mirrors the rest of the crate: a thin axum middleware wrapper
//! delegates to [`dashboard_inner`], which is directly testable without axum
//! dispatch machinery.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use faultline_core::{
    has_next_page, has_previous_page, ExceptionStore, FaultlineError, GetQuery, PageParam,
    QueryParams, RawQuery,
};

use crate::render::{escape_html, DashboardContext, TemplateRenderer};

/// Shared state for the dashboard middleware. Request handling itself is
/// stateless; this only carries the collaborators and the intercepted route.
pub struct DashboardState {
    pub store: Arc<dyn ExceptionStore>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub route: String,
}

/// Middleware entry point for `axum::middleware::from_fn_with_state`.
///
/// Path mismatch delegates to the continuation exactly once and touches
/// neither the store nor the renderer.
pub async fn dashboard_middleware(
    State(state): State<Arc<DashboardState>>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() != state.route {
        return next.run(req).await;
    }

    let raw = decode_query(req.uri().query().unwrap_or(""));
    let (status, body) = dashboard_inner(&state, &raw).await;
    (status, Html(body)).into_response()
}

/// Decode a raw query string into the string-keyed mapping the parser
/// consumes. Repeated keys keep the last value.
pub fn decode_query(raw: &str) -> RawQuery {
    serde_urlencoded::from_str(raw).unwrap_or_default()
}

/// Inner dashboard pipeline — parse, fetch, paginate, render.
pub async fn dashboard_inner(state: &DashboardState, raw: &RawQuery) -> (StatusCode, String) {
    let params = QueryParams::from_raw(raw);

    let get = match params.get_query() {
        Some(get) => get,
        None => {
            let raw_page = match &params.page {
                PageParam::Invalid(raw) => raw.as_str(),
                PageParam::Valid(_) => "",
            };
            return (
                StatusCode::BAD_REQUEST,
                format!(
                    "<!doctype html><html><body><p>Invalid page parameter: &quot;{}&quot;. \
                     Expected an integer &ge; 1.</p></body></html>",
                    escape_html(raw_page)
                ),
            );
        }
    };

    match fetch_and_render(state, &params, get).await {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            tracing::error!("Dashboard request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "<!doctype html><html><body><p>Internal error: {}</p></body></html>",
                    escape_html(&e.to_string())
                ),
            )
        }
    }
}

/// Both store calls plus the render. Either store failure aborts the whole
/// request; there are no retries and no partial results.
async fn fetch_and_render(
    state: &DashboardState,
    params: &QueryParams,
    get: GetQuery,
) -> Result<String, FaultlineError> {
    let exceptions = state.store.get(&get).await?;
    let total_count = state.store.count(&params.count_query()).await?;

    let ctx = DashboardContext {
        has_next_page: has_next_page(get.page, get.limit, exceptions.len(), total_count),
        has_previous_page: has_previous_page(get.page),
        exceptions,
        timestamp_order: get.order,
        page: get.page,
        limit: get.limit,
        total_count,
        query: get.query,
    };

    state.renderer.render(&ctx).await
}

// ============================================================================
// Unit tests — inner pipeline against the reference memory store
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlRenderer;
    use chrono::{Duration, Utc};
    use faultline_core::{ExceptionRecord, MemoryStore};

    const ROUTE: &str = "/__exceptions";

    async fn state_with_records(n: usize) -> DashboardState {
        let store = MemoryStore::new();
        let base = Utc::now();
        for i in 0..n {
            store
                .store(ExceptionRecord {
                    stack: format!("TypeError: nope {}\n  at handler", i),
                    timestamp: base + Duration::seconds(i as i64),
                })
                .await
                .unwrap();
        }
        DashboardState {
            store: Arc::new(store),
            renderer: Arc::new(HtmlRenderer::new(ROUTE)),
            route: ROUTE.to_string(),
        }
    }

    #[test]
    fn test_decode_query_splits_pairs() {
        let raw = decode_query("page=3&q=Type%20Error&timestampOrder=asc");
        assert_eq!(raw.get("page").map(String::as_str), Some("3"));
        assert_eq!(raw.get("q").map(String::as_str), Some("Type Error"));
        assert_eq!(raw.get("timestampOrder").map(String::as_str), Some("asc"));
    }

    #[test]
    fn test_decode_query_empty() {
        assert!(decode_query("").is_empty());
    }

    #[tokio::test]
    async fn test_default_request_renders_page_one() {
        let state = state_with_records(3).await;
        let (status, body) = dashboard_inner(&state, &RawQuery::new()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("3 total"));
        assert!(body.contains("newest first"));
        assert!(body.contains("page 1"));
    }

    #[tokio::test]
    async fn test_invalid_page_is_rejected() {
        let state = state_with_records(3).await;
        let raw = decode_query("page=abc");
        let (status, body) = dashboard_inner(&state, &raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid page parameter"));
        assert!(body.contains("abc"));
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected() {
        let state = state_with_records(3).await;
        let (status, _) = dashboard_inner(&state, &decode_query("page=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_narrows_results() {
        let state = state_with_records(5).await;
        let (status, body) = dashboard_inner(&state, &decode_query("q=nope%203")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("1 total"));
    }

    #[tokio::test]
    async fn test_pagination_flags_flow_into_view() {
        // 250 records, 100 per page: page 1 has next only, page 3 has prev only.
        let state = state_with_records(250).await;

        let (_, body) = dashboard_inner(&state, &RawQuery::new()).await;
        assert!(body.contains("rel=\"next\""));
        assert!(!body.contains("rel=\"prev\""));

        let (_, body) = dashboard_inner(&state, &decode_query("page=3")).await;
        assert!(!body.contains("rel=\"next\""));
        assert!(body.contains("rel=\"prev\""));
    }

    #[tokio::test]
    async fn test_empty_store_renders_placeholder() {
        let state = state_with_records(0).await;
        let (status, body) = dashboard_inner(&state, &RawQuery::new()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No exceptions recorded"));
    }
}

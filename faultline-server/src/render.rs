//! Dashboard rendering seam.
//!
//! The middleware hands a fully-computed [`DashboardContext`] to a
//! [`TemplateRenderer`] and sends whatever markup comes back. Hosts that want
//! a real template engine implement the trait; [`HtmlRenderer`] is the shipped
//! default, a plain formatted view with no engine behind it.

use async_trait::async_trait;
use faultline_core::{ExceptionRecord, FaultlineError, TimestampOrder};
use serde::Serialize;

/// Everything the view needs for one page of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardContext {
    pub exceptions: Vec<ExceptionRecord>,
    pub timestamp_order: TimestampOrder,
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub query: Option<String>,
}

#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, ctx: &DashboardContext) -> Result<String, FaultlineError>;
}

/// Minimal HTML escaping for text interpolated into the default view.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Default view: a self-contained HTML document with the exception table and
/// prev/next links that preserve the active filter and order.
pub struct HtmlRenderer {
    route: String,
}

impl HtmlRenderer {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }

    fn page_href(&self, ctx: &DashboardContext, page: u32) -> String {
        let mut pairs: Vec<(&str, String)> = vec![("page", page.to_string())];
        if ctx.timestamp_order == TimestampOrder::Asc {
            pairs.push(("timestampOrder", "asc".to_string()));
        }
        if let Some(q) = &ctx.query {
            pairs.push(("q", q.clone()));
        }
        // Serialization of string pairs cannot fail.
        let qs = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        format!("{}?{}", self.route, qs)
    }
}

#[async_trait]
impl TemplateRenderer for HtmlRenderer {
    async fn render(&self, ctx: &DashboardContext) -> Result<String, FaultlineError> {
        let mut rows = String::new();
        for record in &ctx.exceptions {
            rows.push_str(&format!(
                "<tr><td class=\"timestamp\">{}</td><td><pre>{}</pre></td></tr>\n",
                record.timestamp.to_rfc3339(),
                escape_html(&record.stack),
            ));
        }
        if ctx.exceptions.is_empty() {
            rows.push_str("<tr><td colspan=\"2\" class=\"empty\">No exceptions recorded.</td></tr>\n");
        }

        let mut nav = String::new();
        if ctx.has_previous_page {
            nav.push_str(&format!(
                "<a rel=\"prev\" href=\"{}\">&lsaquo; Previous</a>\n",
                escape_html(&self.page_href(ctx, ctx.page - 1)),
            ));
        }
        if ctx.has_next_page {
            nav.push_str(&format!(
                "<a rel=\"next\" href=\"{}\">Next &rsaquo;</a>\n",
                escape_html(&self.page_href(ctx, ctx.page + 1)),
            ));
        }

        let order = match ctx.timestamp_order {
            TimestampOrder::Asc => "oldest first",
            TimestampOrder::Desc => "newest first",
        };
        let filter = match &ctx.query {
            Some(q) => format!(" matching &quot;{}&quot;", escape_html(q)),
            None => String::new(),
        };

        Ok(format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Exceptions</title>\n\
             <style>\n\
             body {{ font-family: monospace; margin: 2rem; }}\n\
             table {{ border-collapse: collapse; width: 100%; }}\n\
             td {{ border: 1px solid #ccc; padding: 0.5rem; vertical-align: top; }}\n\
             td.timestamp {{ white-space: nowrap; }}\n\
             pre {{ margin: 0; white-space: pre-wrap; }}\n\
             nav a {{ margin-right: 1rem; }}\n\
             </style>\n\
             </head>\n<body>\n\
             <h1>Exceptions</h1>\n\
             <form method=\"get\" action=\"{route}\">\n\
             <input type=\"text\" name=\"q\" placeholder=\"filter\" value=\"{qval}\">\n\
             <button type=\"submit\">Search</button>\n\
             </form>\n\
             <p class=\"meta\">{total} total{filter}, {order}, page {page} ({limit} per page)</p>\n\
             <table>\n<tr><th>Timestamp</th><th>Stack</th></tr>\n{rows}</table>\n\
             <nav>\n{nav}</nav>\n\
             </body>\n</html>\n",
            route = escape_html(&self.route),
            qval = escape_html(ctx.query.as_deref().unwrap_or("")),
            total = ctx.total_count,
            filter = filter,
            order = order,
            page = ctx.page,
            limit = ctx.limit,
            rows = rows,
            nav = nav,
        ))
    }
}

// ============================================================================
// Unit tests
// ============================================================================

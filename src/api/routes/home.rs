//! Index Route
//!
//! - GET / - HTML list of available API routes

use axum::response::Html;

use crate::query;

/// GET /
pub async fn index() -> Html<String> {
    let items: String = query::list_routes()
        .iter()
        .map(|route| format!("<li>{}</li>", escape_html(route)))
        .collect();

    Html(format!("<h1>Available Routes:</h1><ul>{}</ul>", items))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

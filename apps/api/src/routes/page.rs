use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// Single-page UI for the HR manager and employee views. Talks to the JSON API only.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

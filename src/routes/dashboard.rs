//! # routes::dashboard — `GET /`
//!
//! Static page that polls `/api/screener` every 30 s.

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

//! Embedded dashboard

use axum::response::Html;

/// Serve the embedded cockpit dashboard
pub async fn serve_ui() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

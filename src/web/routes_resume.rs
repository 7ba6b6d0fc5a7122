//! Resume download.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::error;

use super::routes_pages::not_found;
use super::AppState;

/// GET /download-resume — the configured PDF as an attachment, 404 if absent.
pub(super) async fn handler_download_resume(State(state): State<Arc<AppState>>) -> Response {
    let resume = &state.resume;
    match tokio::fs::read(&resume.path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    content_disposition(&resume.download_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(path = %resume.path.display(), error = %e, "resume not available");
            not_found().into_response()
        }
    }
}

/// `attachment; filename="..."`, restricted to printable ASCII.
fn content_disposition(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if !c.is_ascii() || c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_disposition_quotes_name() {
        assert_eq!(
            content_disposition("jane-resume.pdf"),
            "attachment; filename=\"jane-resume.pdf\""
        );
        assert_eq!(
            content_disposition("a\"b\r\n-é.pdf"),
            "attachment; filename=\"a_b__-_.pdf\""
        );
    }
}

//! Contact form submission — `POST /contact`, answered with JSON.
//!
//! | Outcome | Status | `message` |
//! |---------|--------|-----------|
//! | sent | 200 | success text |
//! | CSRF rejected | 400 | refresh prompt |
//! | validation failed | 400 | first validation error |
//! | configuration missing | 500 | generic |
//! | send failed | 500 | generic |

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use super::AppState;
use crate::contact::{ContactForm, ContactOutcome};

pub(super) const CSRF_REJECTED_MESSAGE: &str =
    "Your session has expired. Please refresh the page and try again.";

#[derive(Debug, Serialize)]
pub(super) struct ContactResponse {
    status: &'static str,
    message: String,
}

impl ContactResponse {
    fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

fn status_for(outcome: &ContactOutcome) -> StatusCode {
    match outcome {
        ContactOutcome::Sent => StatusCode::OK,
        ContactOutcome::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        ContactOutcome::ConfigError | ContactOutcome::SendFailed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

const UNREADABLE_BODY_MESSAGE: &str = "Could not read the submitted form. Please try again.";

const FORM_FIELDS: [&str; 4] = ["name", "email", "message", "csrf_token"];

/// Contact fields from a urlencoded or multipart body, with or without a
/// content type. Fields that cannot be decoded are treated as missing, so the
/// visitor still gets the JSON validation result.
pub(super) struct ContactBody(pub(super) ContactForm);

impl<S> FromRequest<S> for ContactBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| {
                ct.trim_start()
                    .to_ascii_lowercase()
                    .starts_with("multipart/form-data")
            });

        if is_multipart {
            let form = match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(e) => {
                    warn!(error = %e, "unreadable multipart contact body");
                    ContactForm::default()
                }
            };
            return Ok(ContactBody(form));
        }

        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(ContactBody(ContactForm::from_pairs(
                url::form_urlencoded::parse(&bytes),
            ))),
            Err(rejection) => {
                warn!(error = %rejection, "unreadable contact body");
                Err((
                    rejection.status(),
                    Json(ContactResponse::error(UNREADABLE_BODY_MESSAGE.to_string())),
                )
                    .into_response())
            }
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> ContactForm {
    let mut pairs = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart contact body");
                break;
            }
        };
        let Some(name) = field.name().filter(|n| FORM_FIELDS.contains(n)).map(str::to_string)
        else {
            continue;
        };
        match field.text().await {
            Ok(text) => pairs.push((name, text)),
            Err(e) => {
                warn!(field = %name, error = %e, "unreadable multipart field");
                break;
            }
        }
    }
    ContactForm::from_pairs(pairs)
}

pub(super) async fn handler_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ContactBody(form): ContactBody,
) -> impl IntoResponse {
    if let Some(guard) = &state.csrf {
        let token = form.csrf_token.as_deref().or_else(|| {
            headers
                .get("x-csrftoken")
                .and_then(|v| v.to_str().ok())
        });
        if let Err(e) = guard.verify(token, chrono::Utc::now().timestamp()) {
            warn!(reason = %e, "contact submission rejected");
            state.prom_metrics.record_contact("csrf_rejected");
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::error(CSRF_REJECTED_MESSAGE.to_string())),
            );
        }
    }

    let outcome = state.contact.submit(&form).await;
    state.prom_metrics.record_contact(outcome.label());

    let status = status_for(&outcome);
    let message = outcome.client_message();
    let body = if outcome.is_success() {
        ContactResponse::success(message)
    } else {
        ContactResponse::error(message)
    };
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{Field, ValidationError};

    #[test]
    fn outcome_status_codes() {
        assert_eq!(status_for(&ContactOutcome::Sent), StatusCode::OK);
        assert_eq!(
            status_for(&ContactOutcome::ValidationFailed(ValidationError::EmptyField(
                Field::Name
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ContactOutcome::ConfigError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ContactOutcome::SendFailed(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_shape() {
        let json = serde_json::to_value(ContactResponse::error("nope".into())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "nope"}));
    }
}

//! # Web — Axum Server for the Portfolio Site
//!
//! Serves server-rendered pages from the JSON catalog, the resume PDF, static
//! assets, and the contact form endpoint.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | homepage with featured projects |
//! | `GET /projects` | project archive |
//! | `GET /project/{id}` | merged project detail (`?from=home\|archive`) |
//! | `GET /download-resume` | resume PDF attachment |
//! | `POST /contact` | contact form, JSON response |
//! | `GET /static/*` | static assets (when a directory is configured) |
//! | `GET /healthz`, `GET /metrics` | probes |
//!
//! Handlers share one read-only [`AppState`]; there is no per-request mutable
//! state besides the metrics registry.

mod routes_contact;
mod routes_health;
mod routes_pages;
mod routes_resume;
pub mod views;

use crate::catalog::Catalog;
use crate::config::{AppConfig, MailSettings, ResumeFile};
use crate::contact::{ContactPipeline, MailTransport, SmtpMailer};
use crate::csrf::{self, CsrfGuard};
use crate::prom_metrics;
use anyhow::Result;
use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Instrument};

/// Contact submissions are a few form fields.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppState {
    pub catalog: Catalog,
    pub contact: ContactPipeline,
    pub csrf: Option<CsrfGuard>,
    pub resume: ResumeFile,
    pub prom_metrics: prom_metrics::Metrics,
}

impl AppState {
    /// Build state from configuration and an already-constructed transport.
    pub fn new(config: &AppConfig, transport: Option<Arc<dyn MailTransport>>) -> Arc<Self> {
        Arc::new(AppState {
            catalog: Catalog::new(&config.data_dir),
            contact: ContactPipeline::new(config.mail.recipient.clone(), transport),
            csrf: config
                .secret_key
                .as_deref()
                .map(|key| CsrfGuard::new(key.as_bytes(), csrf::DEFAULT_TTL)),
            resume: config.resume.clone(),
            prom_metrics: prom_metrics::Metrics::new(),
        })
    }

    /// A fresh CSRF token for an outgoing page, if protection is enabled.
    pub(super) fn csrf_token(&self) -> Option<String> {
        self.csrf
            .as_ref()
            .map(|guard| guard.issue(chrono::Utc::now().timestamp()))
    }
}

/// Records request latency, propagates or generates `x-request-id`, and wraps
/// the request in a tracing span.
async fn metrics_middleware(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> axum::response::Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = req.method().to_string();
    let raw_path = req.uri().path().to_string();
    let norm_path = normalize_path(&raw_path);
    let start = std::time::Instant::now();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %raw_path,
    );
    let mut response = next.run(req).instrument(span).await;

    state
        .prom_metrics
        .http_request_duration
        .get_or_create(&prom_metrics::HttpLabel {
            method,
            path: norm_path,
        })
        .observe(start.elapsed().as_secs_f64());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Collapse per-project and per-asset paths into one label each.
fn normalize_path(path: &str) -> String {
    if path.starts_with("/project/") {
        "/project/:id".to_string()
    } else if path.starts_with("/static/") {
        "/static/*".to_string()
    } else {
        path.to_string()
    }
}

pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/", get(routes_pages::handler_home))
        .route("/projects", get(routes_pages::handler_projects))
        .route("/project/{id}", get(routes_pages::handler_project_detail))
        .route(
            "/download-resume",
            get(routes_resume::handler_download_resume),
        )
        .route("/contact", post(routes_contact::handler_contact))
        .route("/healthz", get(routes_health::handler_healthz))
        .route("/metrics", get(routes_health::handler_metrics));

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.fallback(routes_pages::handler_not_found)
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}

/// SMTP transport for the contact form, or `None` when mail is unconfigured
/// or misconfigured. Either way the site keeps serving and submissions
/// report a configuration error.
pub fn mail_transport(settings: &MailSettings) -> Option<Arc<dyn MailTransport>> {
    match SmtpMailer::from_settings(settings) {
        Ok(Some(mailer)) => Some(Arc::new(mailer)),
        Ok(None) => {
            warn!("mail server or sender not configured; contact form will report a configuration error");
            None
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "invalid mail settings; contact form will report a configuration error");
            None
        }
    }
}

pub async fn run(port: u16, config: AppConfig) -> Result<()> {
    let transport = mail_transport(&config.mail);
    if config.mail.recipient.is_none() {
        warn!("MAIL_RECIPIENT not set; contact form will report a configuration error");
    }
    if config.secret_key.is_none() {
        warn!("SECRET_KEY not set; contact form CSRF protection is disabled");
    }

    let state = AppState::new(&config, transport);
    let app = build_router(state, config.static_dir.as_deref());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, data_dir = %config.data_dir.display(), "portfolio running");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("portfolio shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT, shutting down"),
                    _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                ctrl_c.await.ok();
                info!("received SIGINT, shutting down");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("received SIGINT, shutting down");
    }
}

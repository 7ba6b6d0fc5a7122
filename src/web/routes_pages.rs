//! HTML pages: homepage, project archive, project detail, 404.

use axum::extract::{Path as AxumPath, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use super::views::{self, BackLink};
use super::AppState;
use crate::catalog::select_featured;

/// GET / — hero, featured selection, all projects, contact form.
pub(super) async fn handler_home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let projects = state.catalog.projects();
    let site = state.catalog.site_data();
    let featured = select_featured(&projects);
    let token = state.csrf_token();
    Html(views::home(&site, &projects, &featured, token.as_deref()).into_string())
}

/// GET /projects
pub(super) async fn handler_projects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let projects = state.catalog.projects();
    Html(views::projects_page(&projects).into_string())
}

#[derive(Deserialize)]
pub(super) struct ProjectQuery {
    from: Option<String>,
}

/// GET /project/{id} — merged base + detail view.
pub(super) async fn handler_project_detail(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
    Query(params): Query<ProjectQuery>,
) -> Response {
    match state.catalog.get_project(&id) {
        Some(project) => {
            let back = BackLink::from_referrer(params.from.as_deref());
            Html(views::project_detail(&project, back).into_string()).into_response()
        }
        None => not_found().into_response(),
    }
}

pub(super) fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found().into_string()))
}

pub(super) async fn handler_not_found() -> impl IntoResponse {
    not_found()
}

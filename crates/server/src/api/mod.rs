use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{create_project_folder, generate_article_structure, list_project_folders};
use shared::{
    domain::ProjectFolder,
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        CreateProjectFolderRequest, GenerateArticleRequest, GenerateArticleResponse,
        ProjectFolderQuery, GENERATE_ARTICLE_STRUCTURE_ROUTE, PROJECT_FOLDERS_ROUTE,
    },
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::error;

use crate::app_state::AppState;

const MAX_FOLDER_REQUEST_BODY_BYTES: usize = 16 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    // The generation route accepts prompts of any size.
    let generation: Router<Arc<AppState>> = Router::new()
        .route(
            GENERATE_ARTICLE_STRUCTURE_ROUTE,
            post(http_generate_article_structure).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::disable());
    let folders: Router<Arc<AppState>> = Router::new()
        .route(
            PROJECT_FOLDERS_ROUTE,
            get(http_list_project_folders).post(http_create_project_folder),
        )
        .layer(RequestBodyLimitLayer::new(MAX_FOLDER_REQUEST_BODY_BYTES));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(generation)
        .merge(folders)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn http_generate_article_structure(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateArticleRequest>, JsonRejection>,
) -> Result<Json<GenerateArticleResponse>, HttpError> {
    let Json(req) = body.map_err(|rejection| {
        error!(%rejection, "error generating article structure");
        into_http_error(ApiException::generation_failed())
    })?;

    generate_article_structure(&state.api, &req.prompt)
        .await
        .map(Json)
        .map_err(into_http_error)
}

async fn http_list_project_folders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProjectFolderQuery>, QueryRejection>,
) -> Result<Json<Vec<ProjectFolder>>, HttpError> {
    let Query(q) = query.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("user_email is required")),
        )
    })?;
    list_project_folders(&state.api, &q.user_email)
        .await
        .map(Json)
        .map_err(into_http_error)
}

async fn http_create_project_folder(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateProjectFolderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectFolder>), HttpError> {
    let Json(req) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(rejection.body_text())),
        )
    })?;
    let folder = create_project_folder(&state.api, &req.user_email, &req.name)
        .await
        .map_err(into_http_error)?;
    Ok((StatusCode::CREATED, Json(folder)))
}

fn into_http_error(err: ApiException) -> HttpError {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

//! Route table and handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use super::{origin_guard, ApiError, AppState};
use crate::models::{Folder, FolderInput, ProxyRequest, ProxyResponse, Request, RequestInput};
use crate::proxy::validate_proxy_request;

type ApiResult<T> = Result<T, ApiError>;

/// Build the API router with origin checking and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/request", post(execute_request))
        .route("/api/requests", get(list_requests).post(create_request))
        .route(
            "/api/requests/{id}",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/api/folders", get(list_folders).post(create_folder))
        .route(
            "/api/folders/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .layer(middleware::from_fn_with_state(state.port, origin_guard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn parse_id(raw: &str, invalid: &'static str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::bad_request(invalid))
}

async fn execute_request(
    State(state): State<AppState>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> ApiResult<Json<ProxyResponse>> {
    let Json(request) = payload.map_err(ApiError::invalid_body)?;
    validate_proxy_request(&request).map_err(ApiError::validation)?;

    let response = state.executor.proxy(&request).await?;
    Ok(Json(response))
}

async fn list_requests(State(state): State<AppState>) -> ApiResult<Json<Vec<Request>>> {
    Ok(Json(state.store.list_requests().await?))
}

async fn create_request(
    State(state): State<AppState>,
    payload: Result<Json<RequestInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Request>)> {
    let Json(input) = payload.map_err(ApiError::invalid_body)?;
    let request = state.store.create_request(input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Request>> {
    let id = parse_id(&id, "Invalid request ID")?;
    Ok(Json(state.store.get_request(id).await?))
}

async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RequestInput>, JsonRejection>,
) -> ApiResult<Json<Request>> {
    let id = parse_id(&id, "Invalid request ID")?;
    let Json(input) = payload.map_err(ApiError::invalid_body)?;
    state.store.update_request(id, input).await?;
    Ok(Json(state.store.get_request(id).await?))
}

async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "Invalid request ID")?;
    state.store.delete_request(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_folders(State(state): State<AppState>) -> ApiResult<Json<Vec<Folder>>> {
    Ok(Json(state.store.list_folders().await?))
}

async fn create_folder(
    State(state): State<AppState>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Folder>)> {
    let Json(input) = payload.map_err(ApiError::invalid_body)?;
    let folder = state.store.create_folder(input).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Folder>> {
    let id = parse_id(&id, "Invalid folder ID")?;
    Ok(Json(state.store.get_folder(id).await?))
}

async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> ApiResult<Json<Folder>> {
    let id = parse_id(&id, "Invalid folder ID")?;
    let Json(input) = payload.map_err(ApiError::invalid_body)?;
    state.store.update_folder(id, input).await?;
    Ok(Json(state.store.get_folder(id).await?))
}

async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "Invalid folder ID")?;
    state.store.delete_folder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

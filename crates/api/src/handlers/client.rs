use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use mailing_core::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_client(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let Json(payload) = payload?;
    let client = state.clients.create(payload).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<Client>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let client = state.clients.update(id, payload).await?;

    Ok(Json(client))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.clients.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

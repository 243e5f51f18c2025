use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use mailing_core::models::{
    message::Message,
    notification::{CreateNotificationRequest, Notification, UpdateNotificationRequest},
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state.notifications.list().await?;

    Ok(Json(notifications))
}

#[axum::debug_handler]
pub async fn create_notification(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let Json(payload) = payload?;
    let notification = state.notifications.create(payload).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[axum::debug_handler]
pub async fn get_notification(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Notification>, AppError> {
    let Path(id) = id?;
    let notification = state.notifications.get(id).await?;

    Ok(Json(notification))
}

#[axum::debug_handler]
pub async fn update_notification(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateNotificationRequest>, JsonRejection>,
) -> Result<Json<Notification>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let notification = state.notifications.update(id, payload).await?;

    Ok(Json(notification))
}

#[axum::debug_handler]
pub async fn delete_notification(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.notifications.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Message>>, AppError> {
    let Path(id) = id?;
    let messages = state.notifications.messages(id).await?;

    Ok(Json(messages))
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/v1/notification/",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/v1/notification/:id/",
            get(handlers::notification::get_notification)
                .patch(handlers::notification::update_notification)
                .delete(handlers::notification::delete_notification),
        )
        .route(
            "/v1/notification/:id/messages/",
            get(handlers::notification::list_messages),
        )
}

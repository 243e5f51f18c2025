use axum::{
    routing::{patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

// No read endpoints: clients are write-only through the API.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/v1/client/", post(handlers::client::create_client))
        .route(
            "/v1/client/:id/",
            patch(handlers::client::update_client).delete(handlers::client::delete_client),
        )
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/entities", get(handlers::entity::list_entities))
        .route("/api/entities", post(handlers::entity::create_entity))
}

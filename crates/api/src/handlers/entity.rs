use axum::{extract::State, Json};
use std::sync::Arc;

use agenda_core::models::entity::{
    CreateEntityRequest, CreateEntityResponse, EntityResponse, ListEntitiesResponse,
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_entity(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEntityRequest>,
) -> Result<Json<CreateEntityResponse>, AppError> {
    let entity =
        agenda_db::repositories::entity::create_entity(&state.db_pool, &payload.name).await?;

    Ok(Json(CreateEntityResponse {
        id: entity.id,
        name: entity.name,
        created_at: entity.created_at,
    }))
}

#[axum::debug_handler]
pub async fn list_entities(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListEntitiesResponse>, AppError> {
    let entities = agenda_db::repositories::entity::list_entities(&state.db_pool).await?;

    Ok(Json(ListEntitiesResponse {
        entities: entities
            .into_iter()
            .map(|e| EntityResponse { id: e.id, name: e.name })
            .collect(),
    }))
}

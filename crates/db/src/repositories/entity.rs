use agenda_core::errors::{AgendaError, AgendaResult};
use sqlx::{Pool, Postgres};

use crate::models::DbEntity;
use crate::store_error;

pub async fn create_entity(pool: &Pool<Postgres>, name: &str) -> AgendaResult<DbEntity> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AgendaError::Validation(
            "Entity name must not be empty".to_string(),
        ));
    }

    tracing::debug!("Creating entity: name={}", name);

    let entity = sqlx::query_as::<_, DbEntity>(
        r#"
        INSERT INTO entities (name)
        VALUES ($1)
        RETURNING id, name, active, created_at
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|err| match store_error(err) {
        AgendaError::Conflict(_) => {
            AgendaError::Conflict(format!("Entity already registered: {name}"))
        }
        other => other,
    })?;

    Ok(entity)
}

pub async fn list_entities(pool: &Pool<Postgres>) -> AgendaResult<Vec<DbEntity>> {
    let entities = sqlx::query_as::<_, DbEntity>(
        r#"
        SELECT id, name, active, created_at
        FROM entities
        WHERE active IS TRUE
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(store_error)?;

    Ok(entities)
}

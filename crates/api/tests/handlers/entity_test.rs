use chrono::Utc;
use pretty_assertions::assert_eq;

use agenda_api::middleware::error_handling::AppError;
use agenda_core::{
    errors::AgendaError,
    models::entity::{CreateEntityResponse, EntityResponse, ListEntitiesResponse},
};
use agenda_db::models::DbEntity;

use crate::test_utils::TestContext;

async fn test_create_entity_wrapper(
    ctx: &mut TestContext,
    name: &'static str,
) -> Result<CreateEntityResponse, AppError> {
    let entity = ctx.entity_repo.create_entity(name).await?;

    Ok(CreateEntityResponse {
        id: entity.id,
        name: entity.name,
        created_at: entity.created_at,
    })
}

async fn test_list_entities_wrapper(
    ctx: &mut TestContext,
) -> Result<ListEntitiesResponse, AppError> {
    let entities = ctx.entity_repo.list_entities().await?;

    Ok(ListEntitiesResponse {
        entities: entities
            .into_iter()
            .map(|e| EntityResponse { id: e.id, name: e.name })
            .collect(),
    })
}

fn db_entity(id: i64, name: &str) -> DbEntity {
    DbEntity {
        id,
        name: name.to_string(),
        active: true,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_entity_returns_stored_row() {
    let mut ctx = TestContext::new();

    ctx.entity_repo
        .expect_create_entity()
        .times(1)
        .returning(|name| Ok(db_entity(1, name)));

    let response = test_create_entity_wrapper(&mut ctx, "CABOCLO")
        .await
        .expect("create should succeed");

    assert_eq!(response.id, 1);
    assert_eq!(response.name, "CABOCLO");
}

#[tokio::test]
async fn test_duplicate_entity_name_conflicts() {
    let mut ctx = TestContext::new();

    ctx.entity_repo
        .expect_create_entity()
        .times(1)
        .returning(|name| Err(AgendaError::Conflict(format!("Entity already registered: {name}"))));

    let result = test_create_entity_wrapper(&mut ctx, "CABOCLO").await;
    assert!(matches!(result, Err(AppError(AgendaError::Conflict(_)))));
}

#[tokio::test]
async fn test_client_resolution_reuses_existing_client() {
    let mut ctx = TestContext::new();

    // Same name resolves to the same client id; the phone rides along only
    // on first contact.
    ctx.client_repo
        .expect_find_or_create_client()
        .times(2)
        .returning(|_, _| Ok(42));

    let first = ctx
        .client_repo
        .find_or_create_client("Maria Silva", Some("11999990000"))
        .await
        .unwrap();
    let second = ctx
        .client_repo
        .find_or_create_client("Maria Silva", None)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_entities_passthrough() {
    let mut ctx = TestContext::new();

    ctx.entity_repo
        .expect_list_entities()
        .times(1)
        .returning(|| Ok(vec![db_entity(1, "CABOCLO"), db_entity(2, "PRETO VELHO")]));

    let response = test_list_entities_wrapper(&mut ctx)
        .await
        .expect("list should succeed");

    assert_eq!(response.entities.len(), 2);
    assert_eq!(response.entities[0].name, "CABOCLO");
    assert_eq!(response.entities[1].id, 2);
}

use agenda_core::errors::AgendaResult;
use agenda_core::models::client::PhoneKind;
use sqlx::PgConnection;

use crate::store_error;

/// Resolves a client by exact name, inserting one if absent.
///
/// When a phone number is supplied and the client has no primary phone on
/// file, it is attached as primary. An existing primary phone is never
/// overwritten. Runs on a borrowed connection so booking creation can keep
/// the whole resolution inside its transaction.
pub async fn find_or_create_client(
    conn: &mut PgConnection,
    name: &str,
    phone: Option<&str>,
) -> AgendaResult<i64> {
    tracing::debug!("Resolving client: name={}", name);

    let existing = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM clients
        WHERE name = $1
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await
    .map_err(store_error)?;

    let client_id = match existing {
        Some(id) => id,
        None => sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO clients (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .map_err(store_error)?,
    };

    if let Some(number) = phone.map(str::trim).filter(|n| !n.is_empty()) {
        attach_primary_phone(conn, client_id, number).await?;
    }

    Ok(client_id)
}

async fn attach_primary_phone(
    conn: &mut PgConnection,
    client_id: i64,
    number: &str,
) -> AgendaResult<()> {
    let has_primary = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT 1
        FROM client_phones
        WHERE client_id = $1 AND is_primary IS TRUE
        LIMIT 1
        "#,
    )
    .bind(client_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(store_error)?;

    if has_primary.is_none() {
        sqlx::query(
            r#"
            INSERT INTO client_phones (client_id, kind, number, is_primary)
            VALUES ($1, $2, $3, TRUE)
            "#,
        )
        .bind(client_id)
        .bind(PhoneKind::Mobile.as_str())
        .bind(number)
        .execute(&mut *conn)
        .await
        .map_err(store_error)?;
    }

    Ok(())
}

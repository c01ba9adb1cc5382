use agenda_core::errors::{AgendaError, AgendaResult};
use agenda_core::models::booking::BookingStatus;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::models::{DbBooking, DbBookingRow, NewBooking};
use crate::repositories::client::find_or_create_client;
use crate::store_error;

/// Slot indices already taken for (entity, date). The caller picks the next
/// free one; nothing is reserved by reading.
pub async fn occupied_slots(
    pool: &Pool<Postgres>,
    entity_id: i64,
    date: NaiveDate,
) -> AgendaResult<Vec<i16>> {
    let slots = sqlx::query_scalar::<_, i16>(
        r#"
        SELECT slot_index
        FROM bookings
        WHERE entity_id = $1 AND date = $2
        ORDER BY slot_index ASC
        "#,
    )
    .bind(entity_id)
    .bind(date)
    .fetch_all(pool)
    .await
    .map_err(store_error)?;

    Ok(slots)
}

/// Inserts a booking, resolving the optional client name first.
///
/// Client resolution and the booking insert run in one transaction, so a
/// failed insert cannot strand a freshly created client. Losing the slot
/// race surfaces as `AgendaError::Conflict`; callers may re-allocate and
/// retry, this function never retries on its own.
pub async fn create_booking(pool: &Pool<Postgres>, new: &NewBooking) -> AgendaResult<DbBooking> {
    tracing::debug!(
        "Creating booking: entity_id={}, date={}, slot_index={}",
        new.entity_id,
        new.date,
        new.slot_index
    );

    let mut tx = pool.begin().await.map_err(store_error)?;

    let client_id = match new.client_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            Some(find_or_create_client(&mut tx, name, new.phone.as_deref()).await?)
        }
        _ => None,
    };

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (entity_id, date, slot_index, client_id, status, arrival_minutes, note)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, entity_id, date, slot_index, client_id, status, arrival_minutes, note, created_at
        "#,
    )
    .bind(new.entity_id)
    .bind(new.date)
    .bind(new.slot_index)
    .bind(client_id)
    .bind(new.status.as_str())
    .bind(new.arrival_minutes)
    .bind(new.note.as_deref())
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| match store_error(err) {
        AgendaError::Conflict(_) => AgendaError::Conflict(format!(
            "Slot {} already taken for entity {} on {}",
            new.slot_index, new.entity_id, new.date
        )),
        other => other,
    })?;

    tx.commit().await.map_err(store_error)?;

    tracing::debug!("Booking created: id={}", booking.id);
    Ok(booking)
}

/// Day listing with forward-only keyset pagination.
///
/// Rows are ordered by id ascending on every page so `cursor` (the last-seen
/// id) composes across pages. One phone per client, primary first.
pub async fn list_bookings(
    pool: &Pool<Postgres>,
    date: NaiveDate,
    entity_id: Option<i64>,
    cursor: Option<i64>,
    limit: i64,
) -> AgendaResult<Vec<DbBookingRow>> {
    let rows = sqlx::query_as::<_, DbBookingRow>(
        r#"
        SELECT b.id, b.entity_id, e.name AS entity_name,
               b.date, b.slot_index,
               b.client_id, c.name AS client_name,
               p.number AS phone,
               b.status, b.arrival_minutes, b.note, b.created_at
          FROM bookings b
          JOIN entities e ON e.id = b.entity_id
          LEFT JOIN clients c ON c.id = b.client_id
          LEFT JOIN LATERAL (
                SELECT number
                  FROM client_phones t
                 WHERE t.client_id = c.id
                 ORDER BY t.is_primary DESC, t.id ASC
                 LIMIT 1
          ) p ON TRUE
         WHERE b.date = $1
           AND ($2::BIGINT IS NULL OR b.entity_id = $2)
           AND ($3::BIGINT IS NULL OR b.id > $3)
         ORDER BY b.id ASC
         LIMIT $4
        "#,
    )
    .bind(date)
    .bind(entity_id)
    .bind(cursor)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(store_error)?;

    Ok(rows)
}

/// Joint update of the two editable fields. Both are written even when only
/// one changed, keeping a reconciled row internally consistent.
pub async fn update_booking_fields(
    pool: &Pool<Postgres>,
    id: i64,
    status: BookingStatus,
    arrival_minutes: Option<i16>,
) -> AgendaResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET status = $2, arrival_minutes = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(arrival_minutes)
    .execute(pool)
    .await
    .map_err(store_error)?;

    if result.rows_affected() == 0 {
        return Err(AgendaError::NotFound(format!("Booking with id {id} not found")));
    }

    Ok(())
}

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use agenda_core::{
    errors::{AgendaError, AgendaResult},
    models::booking::{
        Booking, CreateBookingRequest, CreateBookingResponse, ListBookingsResponse,
        NextSlotResponse,
    },
    reconcile::ARRIVAL_MAX,
    slots::{is_valid_slot, next_free_slot},
};
use agenda_db::models::{DbBooking, NewBooking};

use crate::{middleware::error_handling::AppError, ApiState};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

/// Query parameters for the allocation preview endpoint.
#[derive(Debug, Deserialize)]
pub struct NextSlotQuery {
    pub entity_id: i64,
    pub date: NaiveDate,
}

/// Query parameters for the day listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub date: NaiveDate,
    pub entity_id: Option<i64>,
    /// Last-seen booking id from the previous page.
    pub cursor: Option<i64>,
    pub limit: Option<i64>,
}

/// Previews the next free slot for (entity, date).
///
/// Pure read: nothing is reserved, and two sessions previewing at the same
/// time may see the same value. The insert path resolves that race.
#[axum::debug_handler]
pub async fn next_slot(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<NextSlotQuery>,
) -> Result<Json<NextSlotResponse>, AppError> {
    let slot_index = allocate_slot(&state, query.entity_id, query.date).await?;

    Ok(Json(NextSlotResponse {
        entity_id: query.entity_id,
        date: query.date,
        slot_index,
    }))
}

/// Creates a booking, allocating a slot when the caller did not pick one.
///
/// A caller-supplied slot that is already taken returns 409 directly. When
/// the slot was auto-allocated and the insert loses the race, allocation is
/// re-run once and the insert retried; a second conflict surfaces as 409.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    if let Some(minutes) = payload.arrival_minutes {
        if !(0..=ARRIVAL_MAX).contains(&i32::from(minutes)) {
            return Err(AppError(AgendaError::Validation(format!(
                "Arrival minutes out of range 0..={ARRIVAL_MAX}: {minutes}"
            ))));
        }
    }
    if let Some(slot) = payload.slot_index {
        if !is_valid_slot(slot) {
            return Err(AppError(AgendaError::Validation(format!(
                "Slot index out of range 1..=12: {slot}"
            ))));
        }
    }

    let slot_index = match payload.slot_index {
        Some(slot) => slot,
        None => allocate_slot(&state, payload.entity_id, payload.date).await?,
    };

    let new = NewBooking {
        entity_id: payload.entity_id,
        date: payload.date,
        slot_index,
        client_name: payload.client_name.clone(),
        phone: payload.phone.clone(),
        status: payload.status,
        arrival_minutes: payload.arrival_minutes,
        note: payload.note.clone(),
    };

    let booking = match agenda_db::repositories::booking::create_booking(&state.db_pool, &new).await
    {
        Ok(booking) => booking,
        Err(AgendaError::Conflict(msg)) if payload.slot_index.is_none() => {
            tracing::debug!("Lost slot race, re-allocating once: {msg}");
            let slot_index = allocate_slot(&state, payload.entity_id, payload.date).await?;
            let retry = NewBooking { slot_index, ..new };
            agenda_db::repositories::booking::create_booking(&state.db_pool, &retry).await?
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(booking_response(booking)?))
}

/// Lists a day's bookings with forward-only keyset pagination.
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let rows = agenda_db::repositories::booking::list_bookings(
        &state.db_pool,
        query.date,
        query.entity_id,
        query.cursor,
        limit,
    )
    .await?;

    // A short page means the listing is exhausted.
    let next_cursor = if (rows.len() as i64) < limit {
        None
    } else {
        rows.last().map(|row| row.id)
    };

    let rows = rows
        .into_iter()
        .map(Booking::try_from)
        .collect::<AgendaResult<Vec<_>>>()?;

    Ok(Json(ListBookingsResponse { rows, next_cursor }))
}

async fn allocate_slot(state: &ApiState, entity_id: i64, date: NaiveDate) -> AgendaResult<i16> {
    let occupied =
        agenda_db::repositories::booking::occupied_slots(&state.db_pool, entity_id, date).await?;
    Ok(next_free_slot(&occupied))
}

fn booking_response(booking: DbBooking) -> AgendaResult<CreateBookingResponse> {
    Ok(CreateBookingResponse {
        id: booking.id,
        entity_id: booking.entity_id,
        date: booking.date,
        slot_index: booking.slot_index,
        client_id: booking.client_id,
        status: booking.status.parse()?,
        created_at: booking.created_at,
    })
}

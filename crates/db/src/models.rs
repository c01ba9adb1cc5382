use agenda_core::errors::AgendaError;
use agenda_core::models::booking::{Booking, BookingStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEntity {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: i64,
    pub entity_id: i64,
    pub date: NaiveDate,
    pub slot_index: i16,
    pub client_id: Option<i64>,
    pub status: String,
    pub arrival_minutes: Option<i16>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Day-listing row: a booking joined with its entity name and, when a client
/// is attached, the client name and one phone (primary first).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingRow {
    pub id: i64,
    pub entity_id: i64,
    pub entity_name: String,
    pub date: NaiveDate,
    pub slot_index: i16,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub arrival_minutes: Option<i16>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a booking with its slot already decided.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub entity_id: i64,
    pub date: NaiveDate,
    pub slot_index: i16,
    pub client_name: Option<String>,
    pub phone: Option<String>,
    pub status: BookingStatus,
    pub arrival_minutes: Option<i16>,
    pub note: Option<String>,
}

impl TryFrom<DbBookingRow> for Booking {
    type Error = AgendaError;

    fn try_from(row: DbBookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            entity_id: row.entity_id,
            entity_name: row.entity_name,
            date: row.date,
            slot_index: row.slot_index,
            client_id: row.client_id,
            client_name: row.client_name,
            phone: row.phone,
            status: row.status.parse()?,
            arrival_minutes: row.arrival_minutes,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AgendaError;

/// Status lifecycle of a booking. Stored as uppercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Scheduled,
    InService,
    Done,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Scheduled => "SCHEDULED",
            BookingStatus::InService => "IN_SERVICE",
            BookingStatus::Done => "DONE",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "SCHEDULED" => Ok(BookingStatus::Scheduled),
            "IN_SERVICE" => Ok(BookingStatus::InService),
            "DONE" => Ok(BookingStatus::Done),
            other => Err(AgendaError::Validation(format!(
                "Unknown booking status: {other}"
            ))),
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Waiting
    }
}

/// A booking as presented to callers: joined with its entity name and the
/// client's name/primary phone when a client is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub entity_id: i64,
    pub entity_name: String,
    pub date: NaiveDate,
    pub slot_index: i16,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub phone: Option<String>,
    pub status: BookingStatus,
    pub arrival_minutes: Option<i16>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub entity_id: i64,
    pub date: NaiveDate,
    /// When absent, the next free slot for (entity, date) is allocated.
    pub slot_index: Option<i16>,
    pub client_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    pub arrival_minutes: Option<i16>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub id: i64,
    pub entity_id: i64,
    pub date: NaiveDate,
    pub slot_index: i16,
    pub client_id: Option<i64>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextSlotResponse {
    pub entity_id: i64,
    pub date: NaiveDate,
    pub slot_index: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub rows: Vec<Booking>,
    /// Last-seen id to pass back as `cursor`; `None` when the page is the
    /// last one.
    pub next_cursor: Option<i64>,
}

/// Formats arrival minutes as `HH:MM` for display; empty string when unset.
pub fn format_hhmm(minutes: Option<i16>) -> String {
    match minutes {
        Some(m) if (0..=1439).contains(&m) => format!("{:02}:{:02}", m / 60, m % 60),
        _ => String::new(),
    }
}

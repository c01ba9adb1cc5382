use agenda_core::errors::AgendaResult;
use agenda_core::models::booking::BookingStatus;
use chrono::NaiveDate;
use mockall::mock;

use crate::models::{DbBooking, DbBookingRow, DbEntity, NewBooking};

// Mock repositories for testing
mock! {
    pub EntityRepo {
        pub async fn create_entity(&self, name: &'static str) -> AgendaResult<DbEntity>;

        pub async fn list_entities(&self) -> AgendaResult<Vec<DbEntity>>;
    }
}

mock! {
    pub ClientRepo {
        pub async fn find_or_create_client(
            &self,
            name: &'static str,
            phone: Option<&'static str>,
        ) -> AgendaResult<i64>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn occupied_slots(
            &self,
            entity_id: i64,
            date: NaiveDate,
        ) -> AgendaResult<Vec<i16>>;

        pub async fn create_booking(&self, new: NewBooking) -> AgendaResult<DbBooking>;

        pub async fn list_bookings(
            &self,
            date: NaiveDate,
            entity_id: Option<i64>,
            cursor: Option<i64>,
            limit: i64,
        ) -> AgendaResult<Vec<DbBookingRow>>;

        pub async fn update_booking_fields(
            &self,
            id: i64,
            status: BookingStatus,
            arrival_minutes: Option<i16>,
        ) -> AgendaResult<()>;
    }
}

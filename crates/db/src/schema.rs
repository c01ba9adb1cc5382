use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create entities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entities (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create clients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create client_phones table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS client_phones (
            id BIGSERIAL PRIMARY KEY,
            client_id BIGINT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            kind TEXT NOT NULL DEFAULT 'MOBILE'
                CHECK (kind IN ('MOBILE', 'LANDLINE', 'WHATSAPP', 'OTHER')),
            number TEXT NOT NULL,
            is_primary BOOLEAN NOT NULL DEFAULT FALSE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id BIGSERIAL PRIMARY KEY,
            entity_id BIGINT NOT NULL REFERENCES entities(id) ON DELETE RESTRICT,
            date DATE NOT NULL,
            slot_index SMALLINT NOT NULL CHECK (slot_index BETWEEN 1 AND 12),
            client_id BIGINT REFERENCES clients(id) ON DELETE SET NULL,
            status TEXT NOT NULL DEFAULT 'WAITING'
                CHECK (status IN ('WAITING', 'SCHEDULED', 'IN_SERVICE', 'DONE')),
            arrival_minutes SMALLINT
                CHECK (arrival_minutes IS NULL OR arrival_minutes BETWEEN 0 AND 1439),
            note TEXT,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // The unique index is what arbitrates concurrent slot allocation: two
    // sessions may preview the same free slot, only one insert wins.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS bookings_unq_entity_date_slot
            ON bookings (entity_id, date, slot_index);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_entity_date ON bookings (entity_id, date);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings (status);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_client_id ON bookings (client_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_client_phones_client_id ON client_phones (client_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

//! Pool construction and in-code DDL for the Pagila-shaped rental tables.
//!
//! The schema carries the one constraint the processor depends on: a partial
//! unique index on open rentals, so the database itself rejects a second open
//! rental for the same inventory copy no matter how two transactions interleave.

use crate::config::AppConfig;
use crate::error::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Build the connection pool from config. An unreachable store surfaces as
/// `Unavailable` here rather than on first request.
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

const RENTAL_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customer (
        customer_id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS staff (
        staff_id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory (
        inventory_id SERIAL PRIMARY KEY,
        film_id INTEGER NOT NULL,
        store_id INTEGER NOT NULL DEFAULT 1,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rental (
        rental_id SERIAL PRIMARY KEY,
        rental_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        inventory_id INTEGER NOT NULL REFERENCES inventory (inventory_id),
        customer_id INTEGER NOT NULL REFERENCES customer (customer_id),
        staff_id INTEGER NOT NULL REFERENCES staff (staff_id),
        return_date TIMESTAMPTZ
    )
    "#,
];

/// At most one open rental per inventory copy.
const IDX_UNQ_OPEN_RENTAL: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_unq_open_rental
    ON rental (inventory_id)
    WHERE return_date IS NULL
"#;

/// Create the rental tables and the open-rental uniqueness index if absent.
/// Idempotent; called once at startup (and by tests against a scratch database).
pub async fn ensure_rental_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in RENTAL_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    sqlx::query(IDX_UNQ_OPEN_RENTAL).execute(pool).await?;
    Ok(())
}

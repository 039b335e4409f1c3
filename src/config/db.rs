// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup and manage SQLite connection pool

use crate::config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Schema for the local store, applied on startup.
/// The identifier is assigned by SQLite; name and coordinates are
/// deliberately not unique.
const PLACES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS places (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT NOT NULL,
        category  TEXT NOT NULL,
        date      TEXT NOT NULL,
        latitude  REAL NOT NULL,
        longitude REAL NOT NULL,
        image     TEXT NOT NULL
    )
"#;

/// Initialize SQLite connection pool
/// DOCUMENTATION: Creates connection pool, applies the places schema
/// and verifies the connection works
/// Called once during application startup in main.rs
pub async fn init_db_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        // First run on a device has no database file yet
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .connect_with(options)
        .await?;

    // Apply schema before anything else touches the store
    sqlx::query(PLACES_SCHEMA).execute(&pool).await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

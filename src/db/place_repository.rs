// src/db/place_repository.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: Abstract database operations from business logic

use crate::errors::PlacesError;
use crate::models::{NewPlace, Place};
use sqlx::SqlitePool;

/// Classify a sqlx error without losing the failure kind.
/// Constraint violations, connection problems and everything else stay
/// distinguishable for the caller.
fn map_db_err(op: &str, err: sqlx::Error) -> PlacesError {
    log::error!("{} failed: {}", op, err);
    match err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            PlacesError::ConstraintViolation(db.message().to_string())
        }
        sqlx::Error::Io(e) => PlacesError::ConnectionError(e.to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            PlacesError::ConnectionError(err.to_string())
        }
        other => PlacesError::DatabaseError(other.to_string()),
    }
}

/// PlaceRepository: All database operations for places
/// DOCUMENTATION: Uses query_as for type-safe queries against SQLite
pub struct PlaceRepository;

impl PlaceRepository {
    /// Insert a new place in the local store
    /// DOCUMENTATION: Inserts every field except the identifier,
    /// which SQLite assigns, and returns the stored record
    pub async fn insert(pool: &SqlitePool, place: &NewPlace) -> Result<Place, PlacesError> {
        let result = sqlx::query(
            r#"
            INSERT INTO places (name, category, date, latitude, longitude, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&place.name)
        .bind(&place.category)
        .bind(place.date)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.image)
        .execute(pool)
        .await
        .map_err(|e| map_db_err("insert place", e))?;

        let id = result.last_insert_rowid();
        let stored = Self::get_by_id(pool, id).await?;

        log::info!("Created place with id: {}", id);
        Ok(stored)
    }

    /// Retrieve a place by its identifier
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Place, PlacesError> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, name, category, date, latitude, longitude, image
            FROM places
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| map_db_err("get place", e))?
        .ok_or_else(|| {
            log::warn!("Place not found: {}", id);
            PlacesError::NotFound(id)
        })
    }

    /// List every place in the local store
    /// DOCUMENTATION: Local enumeration only - the remote catalog listing
    /// lives in the places controller
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Place>, PlacesError> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, name, category, date, latitude, longitude, image
            FROM places
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| map_db_err("list places", e))
    }

    /// Overwrite an existing place
    /// DOCUMENTATION: Full replacement record - every field except the
    /// identifier is written, rows matched by identifier
    pub async fn update(pool: &SqlitePool, place: &Place) -> Result<Place, PlacesError> {
        let rows = sqlx::query(
            r#"
            UPDATE places
            SET name = ?1,
                category = ?2,
                date = ?3,
                latitude = ?4,
                longitude = ?5,
                image = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&place.name)
        .bind(&place.category)
        .bind(place.date)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.image)
        .bind(place.id)
        .execute(pool)
        .await
        .map_err(|e| map_db_err("update place", e))?
        .rows_affected();

        if rows == 0 {
            log::warn!("Update matched no rows for place: {}", place.id);
            return Err(PlacesError::NotFound(place.id));
        }

        log::info!("Updated place: {}", place.id);
        Self::get_by_id(pool, place.id).await
    }

    /// Delete a place by its identifier
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), PlacesError> {
        let rows = sqlx::query("DELETE FROM places WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| map_db_err("delete place", e))?
            .rows_affected();

        if rows == 0 {
            log::warn!("Delete matched no rows for place: {}", id);
            return Err(PlacesError::NotFound(id));
        }

        log::info!("Deleted place: {}", id);
        Ok(())
    }
}

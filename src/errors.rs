// src/errors.rs
// DOCUMENTATION: Custom error types
// PURPOSE: Centralized error handling for entire application

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One variant per failure kind so callers can tell
/// "no such row" from "constraint violation" from "connection failure"
/// instead of receiving a flattened boolean
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Place not found with id: {0}")]
    NotFound(i64),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Remote catalog error: {0}")]
    RemoteApiError(String),
}

impl PlacesError {
    /// True when the error means the targeted row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlacesError::NotFound(_))
    }
}

// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines all serialization/deserialization models for the catalog and the local store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Represents a complete place record from the local store
/// DOCUMENTATION: This struct maps directly to the places table in SQLite
/// and doubles as the wire shape served by the remote catalog
/// Carries the same bounds as NewPlace so a full-row overwrite
/// revalidates what it writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Place {
    /// Unique identifier, assigned by the store on insert
    pub id: i64,

    /// Place name - required field for all places
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Free-form category (monument, beach, city, ...)
    #[validate(length(min = 1, max = 100))]
    pub category: String,

    /// Date the place was recorded
    pub date: NaiveDate,

    /// Geographic coordinates - latitude
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Geographic coordinates - longitude
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Image reference (path or file name)
    pub image: String,
}

/// Payload for inserting a new place
/// DOCUMENTATION: Carries every field except the identifier,
/// which the store assigns. Also used as the full replacement
/// record on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPlace {
    /// Place name (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Free-form category (required)
    #[validate(length(min = 1, max = 100))]
    pub category: String,

    /// Date the place was recorded
    pub date: NaiveDate,

    /// Latitude in decimal degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Longitude in decimal degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Image reference (path or file name)
    pub image: String,
}

/// Ordering mode for the remote catalog listing
/// DOCUMENTATION: Each mode issues its own network request; the catalog
/// sorts server-side via the `sort` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    Name,
    Date,
    Category,
}

impl ListOrder {
    /// Value sent as the `sort` query parameter
    pub fn sort_param(&self) -> &'static str {
        match self {
            ListOrder::Name => "name",
            ListOrder::Date => "date",
            ListOrder::Category => "category",
        }
    }
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sort_param())
    }
}

impl FromStr for ListOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(ListOrder::Name),
            "date" => Ok(ListOrder::Date),
            "category" | "type" => Ok(ListOrder::Category),
            other => Err(format!("unknown ordering: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPlace {
        NewPlace {
            name: "Alhambra".to_string(),
            category: "Monumento".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            latitude: 37.176,
            longitude: -3.588,
            image: "alhambra.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_place_passes_validation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut place = sample();
        place.latitude = 91.0;
        assert!(place.validate().is_err());

        let mut place = sample();
        place.longitude = -181.0;
        assert!(place.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut place = sample();
        place.name = String::new();
        assert!(place.validate().is_err());
    }

    #[test]
    fn test_list_order_round_trip() {
        assert_eq!("date".parse::<ListOrder>().unwrap(), ListOrder::Date);
        assert_eq!(ListOrder::Name.sort_param(), "name");
        // legacy spelling from the old data model
        assert_eq!("type".parse::<ListOrder>().unwrap(), ListOrder::Category);
        assert!("rating".parse::<ListOrder>().is_err());
    }

    #[test]
    fn test_date_serializes_as_plain_text() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"date\":\"2023-01-01\""));
    }
}

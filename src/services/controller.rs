// src/services/controller.rs
// DOCUMENTATION: Places controller - coordination between store and catalog
// PURPOSE: One owned instance per caller; local CRUD on one side, remote listing on the other

use crate::db::PlaceRepository;
use crate::errors::PlacesError;
use crate::models::{ListOrder, NewPlace, Place};
use crate::services::PlaceSource;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use validator::Validate;

/// Places controller
/// DOCUMENTATION: Built from an injected pool and catalog handle; owns
/// nothing process-wide. The local store and the remote catalog are
/// disjoint - nothing fetched from the catalog is written to the store.
pub struct PlacesController<S: PlaceSource> {
    /// Local store handle
    pool: SqlitePool,
    /// Remote catalog handle
    remote: S,
    /// Snapshot of the last successful catalog fetch
    cached: RwLock<Option<Vec<Place>>>,
}

impl<S: PlaceSource> PlacesController<S> {
    /// Create a controller over a store and a catalog
    pub fn new(pool: SqlitePool, remote: S) -> Self {
        Self {
            pool,
            remote,
            cached: RwLock::new(None),
        }
    }

    /// List places from the remote catalog
    /// DOCUMENTATION: Awaitable - the caller gets the fetched records
    /// directly instead of racing a shared field. On success the cached
    /// snapshot is replaced; on any failure it is left untouched.
    pub async fn list(&self, order: Option<ListOrder>) -> Result<Vec<Place>, PlacesError> {
        match self.remote.find_all(order).await {
            Ok(places) => {
                let mut cached = self.cached.write().await;
                *cached = Some(places.clone());
                log::debug!("Catalog snapshot replaced ({} places)", places.len());
                Ok(places)
            }
            Err(e) => {
                log::error!("Catalog listing failed, snapshot kept: {}", e);
                Err(e)
            }
        }
    }

    /// Snapshot of the last successful catalog fetch
    /// DOCUMENTATION: Returns a clone, never a guard, so readers cannot
    /// hold the lock across awaits. None until the first successful list.
    pub async fn cached(&self) -> Option<Vec<Place>> {
        self.cached.read().await.clone()
    }

    /// Insert a place into the local store
    /// DOCUMENTATION: Validates first; the store assigns the identifier
    /// and the completed record is returned
    pub async fn insert(&self, place: NewPlace) -> Result<Place, PlacesError> {
        place
            .validate()
            .map_err(|e| PlacesError::ValidationError(e.to_string()))?;

        PlaceRepository::insert(&self.pool, &place).await
    }

    /// Overwrite a place in the local store
    /// DOCUMENTATION: Full replacement record keyed by identifier;
    /// NotFound when no row matches
    pub async fn update(&self, place: &Place) -> Result<Place, PlacesError> {
        place
            .validate()
            .map_err(|e| PlacesError::ValidationError(e.to_string()))?;

        PlaceRepository::update(&self.pool, place).await
    }

    /// Delete a place from the local store by identifier
    pub async fn delete(&self, id: i64) -> Result<(), PlacesError> {
        PlaceRepository::delete(&self.pool, id).await
    }

    /// Read a place from the local store by identifier
    pub async fn get(&self, id: i64) -> Result<Place, PlacesError> {
        PlaceRepository::get_by_id(&self.pool, id).await
    }

    /// Enumerate the local store
    pub async fn local(&self) -> Result<Vec<Place>, PlacesError> {
        PlaceRepository::list_all(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{init_db_pool, Config};
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    /// Catalog stub that replays a scripted sequence of responses and
    /// records the ordering it was asked for
    struct ScriptedCatalog {
        responses: Mutex<VecDeque<Result<Vec<Place>, PlacesError>>>,
        seen_orders: Mutex<Vec<Option<ListOrder>>>,
    }

    impl ScriptedCatalog {
        fn new(responses: Vec<Result<Vec<Place>, PlacesError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                seen_orders: Mutex::new(Vec::new()),
            }
        }
    }

    impl PlaceSource for ScriptedCatalog {
        async fn find_all(&self, order: Option<ListOrder>) -> Result<Vec<Place>, PlacesError> {
            self.seen_orders.lock().await.push(order);
            self.responses
                .lock()
                .await
                .pop_front()
                .expect("no scripted response left")
        }
    }

    async fn memory_pool() -> SqlitePool {
        let mut config = Config::from_env();
        config.database_url = "sqlite::memory:".to_string();
        // A single connection: every pooled connection to :memory: would
        // otherwise open its own private database
        config.db_max_connections = 1;
        init_db_pool(&config).await.unwrap()
    }

    fn alhambra() -> NewPlace {
        NewPlace {
            name: "Alhambra".to_string(),
            category: "Monumento".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            latitude: 37.176,
            longitude: -3.588,
            image: "alhambra.jpg".to_string(),
        }
    }

    fn catalog_entry(id: i64, name: &str) -> Place {
        Place {
            id,
            name: name.to_string(),
            category: "Ciudad".to_string(),
            date: NaiveDate::from_ymd_opt(2022, 8, 20).unwrap(),
            latitude: 37.389,
            longitude: -5.984,
            image: "sevilla.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_replaces_snapshot_on_success_only() {
        let catalog = ScriptedCatalog::new(vec![
            Ok(vec![catalog_entry(1, "Sevilla")]),
            Err(PlacesError::RemoteApiError("API error 404 Not Found: ".into())),
            Err(PlacesError::RemoteApiError("Request failed: connection refused".into())),
        ]);
        let controller = PlacesController::new(memory_pool().await, catalog);

        // Before any fetch there is no snapshot
        assert!(controller.cached().await.is_none());

        let listed = controller.list(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(controller.cached().await.unwrap(), listed);

        // Unsuccessful HTTP response: error surfaced, snapshot untouched
        assert!(controller.list(None).await.is_err());
        assert_eq!(controller.cached().await.unwrap(), listed);

        // Transport failure: same guarantee
        assert!(controller.list(None).await.is_err());
        assert_eq!(controller.cached().await.unwrap(), listed);
    }

    #[tokio::test]
    async fn test_list_forwards_the_ordering_mode() {
        let catalog = ScriptedCatalog::new(vec![Ok(vec![]), Ok(vec![])]);
        let controller = PlacesController::new(memory_pool().await, catalog);

        controller.list(Some(ListOrder::Date)).await.unwrap();
        controller.list(None).await.unwrap();

        let seen = controller.remote.seen_orders.lock().await;
        assert_eq!(*seen, vec![Some(ListOrder::Date), None]);
    }

    #[tokio::test]
    async fn test_insert_delete_get_scenario() {
        let controller =
            PlacesController::new(memory_pool().await, ScriptedCatalog::new(vec![]));

        let stored = controller.insert(alhambra()).await.unwrap();
        assert_eq!(stored.name, "Alhambra");

        controller.delete(stored.id).await.unwrap();
        assert!(controller.get(stored.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_payload_before_the_store() {
        let controller =
            PlacesController::new(memory_pool().await, ScriptedCatalog::new(vec![]));

        let mut bad = alhambra();
        bad.latitude = 123.0;

        let err = controller.insert(bad).await.unwrap_err();
        assert!(matches!(err, PlacesError::ValidationError(_)));

        // Nothing reached the store
        assert!(controller.local().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_through_controller_overwrites_fields() {
        let controller =
            PlacesController::new(memory_pool().await, ScriptedCatalog::new(vec![]));

        let mut stored = controller.insert(alhambra()).await.unwrap();
        stored.category = "Palacio".to_string();

        let updated = controller.update(&stored).await.unwrap();
        assert_eq!(updated.category, "Palacio");
        assert_eq!(controller.get(stored.id).await.unwrap().category, "Palacio");
    }

    #[tokio::test]
    async fn test_catalog_and_store_stay_disjoint() {
        let catalog = ScriptedCatalog::new(vec![Ok(vec![catalog_entry(42, "Sevilla")])]);
        let controller = PlacesController::new(memory_pool().await, catalog);

        controller.list(None).await.unwrap();

        // The fetched snapshot is never written into the local store
        assert!(controller.local().await.unwrap().is_empty());
    }
}

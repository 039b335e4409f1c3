// src/services/catalog_client.rs
// DOCUMENTATION: Remote places catalog client
// PURPOSE: Handle communication with the REST catalog serving place records

use crate::errors::PlacesError;
use crate::models::{ListOrder, Place};
use reqwest::Client;
use std::time::Duration;

/// Source of remote place listings
/// DOCUMENTATION: The controller takes its catalog handle through this
/// trait, so tests can stand in for the network
#[allow(async_fn_in_trait)]
pub trait PlaceSource {
    /// Fetch the full catalog listing, optionally ordered
    async fn find_all(&self, order: Option<ListOrder>) -> Result<Vec<Place>, PlacesError>;
}

/// Remote places catalog client
/// DOCUMENTATION: Thin reqwest wrapper around GET {base}/places
pub struct RemotePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the catalog, without trailing slash
    base_url: String,
}

impl RemotePlacesClient {
    /// Create a new catalog client
    /// DOCUMENTATION: One request timeout for every call; there is no
    /// retry policy at this layer
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PlacesError::RemoteApiError(format!("Client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the listing endpoint
    fn listing_url(&self) -> String {
        format!("{}/places", self.base_url)
    }
}

impl PlaceSource for RemotePlacesClient {
    /// Fetch all places from the catalog
    /// DOCUMENTATION: Each ordering mode is its own network request -
    /// the catalog sorts server-side via the `sort` query parameter
    ///
    /// # Returns
    /// Vector of place records from the response body
    async fn find_all(&self, order: Option<ListOrder>) -> Result<Vec<Place>, PlacesError> {
        let url = self.listing_url();

        let mut request = self.client.get(&url);
        if let Some(order) = order {
            request = request.query(&[("sort", order.sort_param())]);
        }

        log::debug!("Catalog listing request: {} (sort: {:?})", url, order);

        let response = request.send().await.map_err(|e| {
            log::error!("Catalog request failed: {}", e);
            PlacesError::RemoteApiError(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Catalog error {}: {}", status, body);
            return Err(PlacesError::RemoteApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let places: Vec<Place> = response.json().await.map_err(|e| {
            log::error!("Failed to parse catalog response: {}", e);
            PlacesError::RemoteApiError(format!("Parse error: {}", e))
        })?;

        log::info!("Catalog listing returned {} places", places.len());
        Ok(places)
    }
}

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::point::Point;

/// A candidate venue returned by a places provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: Option<String>,
    pub category_id: String,
    /// Coordinates, when the provider has them
    #[serde(default)]
    pub location: Option<Point>,
    /// Free-text address, geocoded when `location` is missing
    #[serde(default)]
    pub address: Option<String>,
}

/// What to search for around the driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacesQuery {
    pub origin: Point,
    pub categories: BTreeSet<String>,
    pub radius_m: u32,
    pub limit: usize,
}

/// A driving route between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Vec<Point>,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Category id <-> human-readable name lookup.
pub trait CategoryDirectory: Send + Sync {
    fn name_of(&self, category_id: &str) -> Option<&str>;

    fn id_of(&self, name: &str) -> Option<&str>;
}

/// Nearby-places search filtered by category and radius.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Identifier used in logs and errors.
    fn name(&self) -> &'static str {
        "places"
    }

    /// An empty result is valid and means nothing was found.
    async fn nearby(&self, query: &PlacesQuery) -> Result<Vec<Place>, ProviderError>;
}

/// Free-text address to coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    fn name(&self) -> &'static str {
        "geocoder"
    }

    /// `Ok(None)` when the address is unknown.
    async fn geocode(&self, address: &str) -> Result<Option<Point>, ProviderError>;
}

/// Point-to-point routing.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    fn name(&self) -> &'static str {
        "router"
    }

    /// `Ok(None)` when no route exists.
    async fn route(&self, from: Point, to: Point) -> Result<Option<Route>, ProviderError>;
}

//! Reposition planning.
//!
//! Resolves the categories open right now, asks the places provider for
//! candidates around the driver, clusters them, and picks a busy target
//! and an idle waiting spot. Collaborator calls run under an explicit
//! timeout; the engines only start once the full point list is in hand.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cluster::{rank_clusters, select_targets, ClusterConfig, ClusterEngine, Targets};
use crate::error::{ProviderError, Result};
use crate::point::Point;
use crate::providers::{GeocodeCache, Place, PlacesProvider, PlacesQuery, Route, RouteProvider};
use crate::storage::Config;
use crate::venue::{ActiveCategories, RuleTable};

/// Planner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub cluster: ClusterConfig,
    pub search_radius_m: u32,
    pub limit: usize,
    /// Applied to every collaborator call
    pub timeout: Duration,
    pub min_distance_km: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PlannerConfig {
    fn from(config: &Config) -> Self {
        Self {
            cluster: ClusterConfig {
                epsilon_km: config.clustering.epsilon_km,
            },
            search_radius_m: config.providers.search_radius_m,
            limit: config.providers.limit,
            timeout: Duration::from_secs(config.providers.timeout_secs),
            min_distance_km: config.ranking.min_distance_km,
        }
    }
}

/// Outcome of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    /// No venue rule matches the current time
    NothingOpen,
    /// Categories are open but no candidate places were found
    NoPlacesNearby { categories: BTreeSet<String> },
    Targets {
        categories: BTreeSet<String>,
        /// Candidate points that went into clustering
        points: usize,
        clusters: usize,
        targets: Targets,
        /// Route from the driver to the busy target, when a router is set
        route: Option<Route>,
    },
}

/// Composes the resolver, the clustering engine, and the collaborators.
pub struct Planner {
    rules: RuleTable,
    places: Arc<dyn PlacesProvider>,
    geocoder: Option<GeocodeCache>,
    router: Option<Arc<dyn RouteProvider>>,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(rules: RuleTable, places: Arc<dyn PlacesProvider>, config: PlannerConfig) -> Self {
        Self {
            rules,
            places,
            geocoder: None,
            router: None,
            config,
        }
    }

    /// Geocode places that arrive with an address but no coordinates.
    pub fn with_geocoder(mut self, cache: GeocodeCache) -> Self {
        self.geocoder = Some(cache);
        self
    }

    pub fn with_router(mut self, router: Arc<dyn RouteProvider>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a reposition for a driver at `driver` at local time `at`.
    ///
    /// # Errors
    ///
    /// Returns a provider error if the places search fails or times out.
    /// Geocoding and routing failures are logged and tolerated.
    pub async fn recommend(&mut self, driver: Point, at: NaiveDateTime) -> Result<Recommendation> {
        let categories = match self.rules.resolve_at(at) {
            ActiveCategories::NoneActive => {
                tracing::info!(%at, "no venue categories open");
                return Ok(Recommendation::NothingOpen);
            }
            ActiveCategories::Active(categories) => categories,
        };

        let query = PlacesQuery {
            origin: driver,
            categories: categories.clone(),
            radius_m: self.config.search_radius_m,
            limit: self.config.limit,
        };
        let provider = self.places.name();
        let places = with_timeout(provider, self.config.timeout, self.places.nearby(&query)).await?;

        let points = self.locate(places).await;
        if points.is_empty() {
            tracing::info!(categories = categories.len(), "no candidate places nearby");
            return Ok(Recommendation::NoPlacesNearby { categories });
        }

        let clusters = ClusterEngine::with_config(self.config.cluster).cluster(&points);
        let cluster_count = clusters.len();
        let ranked = rank_clusters(clusters, driver, self.config.min_distance_km);
        let Some(targets) = select_targets(&ranked) else {
            return Ok(Recommendation::NoPlacesNearby { categories });
        };

        let route = self.route_to(driver, targets.busy.cluster.centroid()).await;
        tracing::info!(
            points = points.len(),
            clusters = cluster_count,
            busy_members = targets.busy.cluster.len(),
            has_idle = targets.idle.is_some(),
            "reposition planned"
        );

        Ok(Recommendation::Targets {
            categories,
            points: points.len(),
            clusters: cluster_count,
            targets,
            route,
        })
    }

    /// Turn places into points, geocoding address-only places when a
    /// geocoder is configured. Places that cannot be located are dropped.
    async fn locate(&mut self, places: Vec<Place>) -> Vec<Point> {
        let mut points = Vec::with_capacity(places.len());
        for place in places {
            if let Some(location) = place.location {
                points.push(location);
                continue;
            }
            let (Some(cache), Some(address)) = (self.geocoder.as_mut(), place.address.as_deref()) else {
                tracing::debug!(category_id = %place.category_id, "dropping place without coordinates");
                continue;
            };
            let timeout = self.config.timeout;
            match with_timeout("geocoder", timeout, cache.geocode(address)).await {
                Ok(Some(point)) => points.push(point),
                Ok(None) => tracing::warn!(address, "could not geocode address"),
                Err(err) => tracing::warn!(address, error = %err, "geocoding failed"),
            }
        }
        points
    }

    async fn route_to(&self, from: Point, to: Point) -> Option<Route> {
        let router = self.router.as_ref()?;
        match with_timeout(router.name(), self.config.timeout, router.route(from, to)).await {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!(error = %err, "routing failed");
                None
            }
        }
    }
}

async fn with_timeout<T, F>(
    provider: &'static str,
    timeout: Duration,
    call: F,
) -> std::result::Result<T, ProviderError>
where
    F: Future<Output = std::result::Result<T, ProviderError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| ProviderError::Timeout {
            provider,
            timeout_secs: timeout.as_secs(),
        })?
}

//! # Hotspot Core Library
//!
//! This library recommends where a for-hire driver should reposition.
//! It implements a CLI-first philosophy where all operations are available via
//! a standalone CLI binary over the same core library.
//!
//! ## Architecture
//!
//! - **Venue rules**: decide which venue categories are open for a given hour
//!   and weekday, including overnight windows and wrapping day ranges
//! - **Clustering**: greedy agglomeration of candidate points followed by a
//!   merge pass, producing demand hot-spots with centroids
//! - **Providers**: contracts for places, geocoding and routing collaborators
//! - **Planner**: composes the above into a busy target and an idle spot
//! - **Storage**: TOML-based configuration
//!
//! Both engines are pure and synchronous. Only the planner awaits, and
//! only on collaborators.
//!
//! ## Key Components
//!
//! - [`RuleTable`]: validated venue rules and category names
//! - [`ClusterEngine`]: two-phase spatial clustering
//! - [`Planner`]: reposition planning over the collaborators
//! - [`Config`]: application configuration management

pub mod cluster;
pub mod error;
pub mod planner;
pub mod point;
pub mod providers;
pub mod storage;
pub mod venue;

pub use cluster::{rank_clusters, select_targets, Cluster, ClusterConfig, ClusterEngine, RankedCluster, Targets};
pub use error::{ConfigError, CoreError, FormatError, ProviderError};
pub use planner::{Planner, PlannerConfig, Recommendation};
pub use point::{centroid_of, distance_km, Point};
pub use providers::{
    CategoryDirectory, GeocodeCache, Geocoder, Place, PlacesProvider, PlacesQuery, Route, RouteProvider,
    StaticCategoryDirectory, StaticPlacesProvider,
};
pub use storage::Config;
pub use venue::{
    parse_day_range, parse_time, resolve_active_categories, ActiveCategories, RuleRow, RuleTable, TimeOfDay,
    VenueRule,
};

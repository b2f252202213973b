//! Spatial clustering of demand points.

pub mod engine;
pub mod rank;

pub use engine::{Cluster, ClusterConfig, ClusterEngine, DEFAULT_EPSILON_KM};
pub use rank::{rank_clusters, select_targets, RankedCluster, Targets, DEFAULT_MIN_DISTANCE_KM};

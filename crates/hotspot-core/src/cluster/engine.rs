//! Two-phase demand clustering.
//!
//! Phase 1 grows clusters greedily from seeds taken off the front of the
//! input, absorbing every remaining point within `epsilon_km` of the
//! cluster's running centroid. Phase 2 merges clusters whose centroids
//! lie within `2 * epsilon_km`, repeating until a full sweep merges
//! nothing.
//!
//! Phase 1 is order-dependent: the same points in a different order can
//! produce different clusters. Seeds are always taken from the front of
//! the input so a given ordering always gives the same result.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::point::{distance_km, Point};

/// Default proximity threshold in kilometres.
pub const DEFAULT_EPSILON_KM: f64 = 1.0;

/// A group of points and their mean position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    members: Vec<Point>,
    centroid: Point,
}

impl Cluster {
    /// Start a cluster from a single point.
    pub fn seed(point: Point) -> Self {
        Self {
            members: vec![point],
            centroid: point,
        }
    }

    pub fn members(&self) -> &[Point] {
        &self.members
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a cluster holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a point, updating the centroid as a running mean.
    fn absorb(&mut self, point: Point) {
        let n = self.members.len() as f64 + 1.0;
        self.centroid.lat += (point.lat - self.centroid.lat) / n;
        self.centroid.lon += (point.lon - self.centroid.lon) / n;
        self.members.push(point);
    }

    /// Fold `other` into this cluster; the centroid is the
    /// membership-weighted mean of the two centroids.
    fn merge(&mut self, other: Cluster) {
        let n1 = self.members.len() as f64;
        let n2 = other.members.len() as f64;
        let total = n1 + n2;
        self.centroid = Point::new(
            (self.centroid.lat * n1 + other.centroid.lat * n2) / total,
            (self.centroid.lon * n1 + other.centroid.lon * n2) / total,
        );
        self.members.extend(other.members);
    }
}

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Absorption radius in km. Clusters merge within twice this.
    /// A value of zero or less disables merging.
    pub epsilon_km: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            epsilon_km: DEFAULT_EPSILON_KM,
        }
    }
}

/// Spatial clustering engine. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    config: ClusterConfig,
}

impl ClusterEngine {
    /// Create an engine with the default 1 km threshold
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Set the proximity threshold
    pub fn with_epsilon(mut self, epsilon_km: f64) -> Self {
        self.config.epsilon_km = epsilon_km;
        self
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Run both phases. Empty input gives an empty result.
    pub fn cluster(&self, points: &[Point]) -> Vec<Cluster> {
        let seeded = self.agglomerate(points);
        let seeded_count = seeded.len();
        let merged = self.merge_adjacent(seeded);
        tracing::debug!(
            points = points.len(),
            seeded = seeded_count,
            clusters = merged.len(),
            epsilon_km = self.config.epsilon_km,
            "clustered demand points"
        );
        merged
    }

    /// Phase 1: greedy agglomeration around running centroids.
    pub fn agglomerate(&self, points: &[Point]) -> Vec<Cluster> {
        let epsilon = self.config.epsilon_km;
        let mut pool: VecDeque<Point> = points.iter().copied().collect();
        let mut clusters = Vec::new();

        while let Some(seed) = pool.pop_front() {
            let mut cluster = Cluster::seed(seed);
            // Each absorption moves the centroid before the next point is tested.
            pool.retain(|point| {
                if distance_km(cluster.centroid, *point) <= epsilon {
                    cluster.absorb(*point);
                    false
                } else {
                    true
                }
            });
            clusters.push(cluster);
        }

        clusters
    }

    /// Phase 2: merge clusters whose centroids are within `2 * epsilon_km`.
    ///
    /// Sweeps the list, trying each cluster against all others. A cluster
    /// that absorbed something is retried at its new position. The loop
    /// stops after a full sweep with no merges. Never returns more
    /// clusters than it was given.
    pub fn merge_adjacent(&self, mut clusters: Vec<Cluster>) -> Vec<Cluster> {
        let epsilon = self.config.epsilon_km;
        if epsilon.is_nan() || epsilon <= 0.0 || clusters.len() <= 1 {
            return clusters;
        }
        let limit = 2.0 * epsilon;

        loop {
            let mut merged_any = false;
            let mut index = 0;
            while index < clusters.len() {
                match merge_into(&mut clusters, index, limit) {
                    Some(position) => {
                        merged_any = true;
                        index = position;
                    }
                    None => index += 1,
                }
            }
            if !merged_any {
                return clusters;
            }
        }
    }
}

/// Merge every cluster within `limit` of the one at `index` into it.
///
/// Returns the merged cluster's new position, or `None` (leaving the list
/// untouched) when nothing was close enough.
fn merge_into(clusters: &mut Vec<Cluster>, index: usize, limit: f64) -> Option<usize> {
    let mut current = clusters.remove(index);
    let mut position = index;
    let mut merged = false;

    let mut i = 0;
    while i < clusters.len() {
        if distance_km(current.centroid, clusters[i].centroid) <= limit {
            let other = clusters.remove(i);
            current.merge(other);
            merged = true;
            if i < position {
                position -= 1;
            }
        } else {
            i += 1;
        }
    }

    clusters.insert(position, current);
    merged.then_some(position)
}

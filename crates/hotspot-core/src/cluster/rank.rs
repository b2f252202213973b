//! Ranking clusters by demand mass over distance, and picking a busy
//! target plus a nearby idle waiting spot.

use serde::Serialize;

use super::engine::Cluster;
use crate::point::{distance_km, Point};

/// Distances below this are clamped when scoring, so a cluster on top of
/// the driver does not get an unbounded score.
pub const DEFAULT_MIN_DISTANCE_KM: f64 = 0.1;

/// A cluster with its distance from the driver and its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCluster {
    pub cluster: Cluster,
    /// Distance from the driver to the centroid
    pub distance_km: f64,
    /// members / max(distance_km, min_distance_km)
    pub score: f64,
}

/// Where to go and where to wait.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Targets {
    /// Highest-ranked cluster
    pub busy: RankedCluster,
    /// The other cluster nearest to `busy`, if any
    pub idle: Option<RankedCluster>,
}

/// Score and sort clusters, best first.
///
/// Ties are broken by distance, then by input order.
pub fn rank_clusters(
    clusters: Vec<Cluster>,
    origin: Point,
    min_distance_km: f64,
) -> Vec<RankedCluster> {
    let floor = if min_distance_km > 0.0 {
        min_distance_km
    } else {
        DEFAULT_MIN_DISTANCE_KM
    };

    let mut ranked: Vec<RankedCluster> = clusters
        .into_iter()
        .map(|cluster| {
            let distance = distance_km(origin, cluster.centroid());
            let score = cluster.len() as f64 / distance.max(floor);
            RankedCluster {
                cluster,
                distance_km: distance,
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.distance_km.total_cmp(&b.distance_km))
    });
    ranked
}

/// Pick the busy target and the idle spot from a ranked list.
///
/// Returns `None` for an empty list.
pub fn select_targets(ranked: &[RankedCluster]) -> Option<Targets> {
    let (busy, rest) = ranked.split_first()?;
    let busy_centroid = busy.cluster.centroid();

    let idle = rest
        .iter()
        .map(|candidate| (distance_km(busy_centroid, candidate.cluster.centroid()), candidate))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| candidate.clone());

    Some(Targets {
        busy: busy.clone(),
        idle,
    })
}

//! Integration tests for the planner over fake collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use hotspot_core::{
    CoreError, GeocodeCache, Geocoder, Place, PlacesProvider, PlacesQuery, Planner, PlannerConfig, Point,
    ProviderError, Recommendation, Route, RouteProvider, RuleRow, RuleTable, StaticPlacesProvider,
};

const DRIVER: Point = Point::new(52.0, 4.0);

fn friday(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 13)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn rules() -> RuleTable {
    RuleTable::from_rows(vec![
        RuleRow::new("nightclub", "22:00", "02:00", "Fri-Sat"),
        RuleRow::new("airport", "21:00", "23:59", "Sun-Sat"),
    ])
}

fn located(category_id: &str, lat: f64, lon: f64) -> Place {
    Place {
        name: None,
        category_id: category_id.to_string(),
        location: Some(Point::new(lat, lon)),
        address: None,
    }
}

fn addressed(category_id: &str, address: &str) -> Place {
    Place {
        name: None,
        category_id: category_id.to_string(),
        location: None,
        address: Some(address.to_string()),
    }
}

fn planner(places: Vec<Place>) -> Planner {
    Planner::new(
        rules(),
        Arc::new(StaticPlacesProvider::new(places)),
        PlannerConfig::default(),
    )
}

struct SlowPlaces;

#[async_trait]
impl PlacesProvider for SlowPlaces {
    fn name(&self) -> &'static str {
        "slow-places"
    }

    async fn nearby(&self, _query: &PlacesQuery) -> Result<Vec<Place>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
}

struct BrokenPlaces;

#[async_trait]
impl PlacesProvider for BrokenPlaces {
    async fn nearby(&self, _query: &PlacesQuery) -> Result<Vec<Place>, ProviderError> {
        Err(ProviderError::Transport {
            provider: "places",
            message: "connection refused".into(),
        })
    }
}

/// Knows one street; counts calls.
struct OneStreetGeocoder {
    calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for OneStreetGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Point>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(address
            .starts_with("Markt")
            .then(|| Point::new(52.0101, 4.0)))
    }
}

/// Straight-line "route" between the two points.
struct CrowFlies;

#[async_trait]
impl RouteProvider for CrowFlies {
    async fn route(&self, from: Point, to: Point) -> Result<Option<Route>, ProviderError> {
        let distance_km = from.distance_km(&to);
        Ok(Some(Route {
            polyline: vec![from, to],
            distance_km,
            duration_min: distance_km / 30.0 * 60.0,
        }))
    }
}

struct DownRouter;

#[async_trait]
impl RouteProvider for DownRouter {
    async fn route(&self, _from: Point, _to: Point) -> Result<Option<Route>, ProviderError> {
        Err(ProviderError::Transport {
            provider: "router",
            message: "503".into(),
        })
    }
}

#[tokio::test]
async fn test_nothing_open_skips_places_search() {
    let mut planner = Planner::new(rules(), Arc::new(BrokenPlaces), PlannerConfig::default());
    let rec = planner.recommend(DRIVER, friday(15)).await.unwrap();
    assert_eq!(rec, Recommendation::NothingOpen);
}

#[tokio::test]
async fn test_no_places_nearby() {
    let mut planner = planner(vec![located("cafe", 52.001, 4.0), located("nightclub", 53.0, 4.0)]);
    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();
    match rec {
        Recommendation::NoPlacesNearby { categories } => {
            assert!(categories.contains("nightclub"));
            assert!(categories.contains("airport"));
        }
        other => panic!("unexpected recommendation: {other:?}"),
    }
}

#[tokio::test]
async fn test_busy_and_idle_targets() {
    let mut planner = planner(vec![
        located("nightclub", 52.010, 4.0),
        located("nightclub", 52.0101, 4.0),
        located("nightclub", 52.0102, 4.0),
        located("airport", 51.990, 4.0),
        located("cafe", 52.0, 4.0),
    ]);
    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();

    let Recommendation::Targets { points, clusters, targets, route, .. } = rec else {
        panic!("expected targets");
    };
    assert_eq!(points, 4);
    assert_eq!(clusters, 2);
    assert_eq!(targets.busy.cluster.len(), 3);
    assert_eq!(targets.idle.map(|idle| idle.cluster.len()), Some(1));
    assert!(route.is_none());
}

#[tokio::test]
async fn test_single_cluster_has_no_idle_spot() {
    let mut planner = planner(vec![located("nightclub", 52.010, 4.0)]);
    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();
    let Recommendation::Targets { targets, .. } = rec else {
        panic!("expected targets");
    };
    assert!(targets.idle.is_none());
}

#[tokio::test]
async fn test_address_only_places_are_geocoded_once() {
    let geocoder = Arc::new(OneStreetGeocoder {
        calls: AtomicUsize::new(0),
    });
    let places = vec![
        addressed("nightclub", "Markt 1, Delft"),
        addressed("nightclub", "Markt 1, Delft"),
        addressed("nightclub", "Nowhere 0"),
    ];
    let mut planner = planner(places).with_geocoder(GeocodeCache::new(geocoder.clone()));

    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();
    let Recommendation::Targets { points, targets, .. } = rec else {
        panic!("expected targets");
    };
    assert_eq!(points, 2);
    assert_eq!(targets.busy.cluster.len(), 2);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_route_to_busy_target() {
    let mut planner = planner(vec![located("nightclub", 52.010, 4.0)]).with_router(Arc::new(CrowFlies));
    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();
    let Recommendation::Targets { route, targets, .. } = rec else {
        panic!("expected targets");
    };
    let route = route.unwrap();
    assert_eq!(route.polyline, vec![DRIVER, targets.busy.cluster.centroid()]);
    assert!((route.distance_km - targets.busy.distance_km).abs() < 1e-9);
}

#[tokio::test]
async fn test_routing_failure_is_tolerated() {
    let mut planner = planner(vec![located("nightclub", 52.010, 4.0)]).with_router(Arc::new(DownRouter));
    let rec = planner.recommend(DRIVER, friday(23)).await.unwrap();
    assert!(matches!(rec, Recommendation::Targets { route: None, .. }));
}

#[tokio::test]
async fn test_places_failure_is_fatal() {
    let mut planner = Planner::new(rules(), Arc::new(BrokenPlaces), PlannerConfig::default());
    let err = planner.recommend(DRIVER, friday(23)).await.unwrap_err();
    assert!(matches!(err, CoreError::Provider(ProviderError::Transport { .. })));
}

#[tokio::test]
async fn test_slow_places_provider_times_out() {
    let config = PlannerConfig {
        timeout: Duration::from_millis(50),
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(rules(), Arc::new(SlowPlaces), config);
    let err = planner.recommend(DRIVER, friday(23)).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Provider(ProviderError::Timeout { provider: "slow-places", .. })
    ));
}

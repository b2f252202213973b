//! Contracts for the external collaborators the planner consumes:
//! category names, nearby places, geocoding, and routing.
//!
//! Only in-memory implementations live here; network clients are
//! supplied by the embedding application.

mod cache;
mod memory;
mod traits;

pub use cache::GeocodeCache;
pub use memory::{StaticCategoryDirectory, StaticPlacesProvider};
pub use traits::{CategoryDirectory, Geocoder, Place, PlacesProvider, PlacesQuery, Route, RouteProvider};

//! Geocode memoization.
//!
//! The cache is an ordinary value owned by whoever orchestrates a run, so
//! the engines never see it and two callers never share it by accident.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Geocoder;
use crate::error::ProviderError;
use crate::point::Point;

/// Remembers geocoder answers per address, misses included.
///
/// Transport errors are not cached.
pub struct GeocodeCache {
    geocoder: Arc<dyn Geocoder>,
    entries: HashMap<String, Option<Point>>,
}

impl GeocodeCache {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            entries: HashMap::new(),
        }
    }

    /// Number of cached addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Geocode `address`, asking the geocoder only on the first request.
    pub async fn geocode(&mut self, address: &str) -> Result<Option<Point>, ProviderError> {
        if let Some(hit) = self.entries.get(address) {
            return Ok(*hit);
        }
        let answer = self.geocoder.geocode(address).await?;
        self.entries.insert(address.to_string(), answer);
        Ok(answer)
    }
}

//! In-memory collaborator implementations, for offline files and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::traits::{CategoryDirectory, Place, PlacesProvider, PlacesQuery};
use crate::error::ProviderError;
use crate::venue::RuleTable;

/// Category names held in a map.
#[derive(Debug, Clone, Default)]
pub struct StaticCategoryDirectory {
    by_id: BTreeMap<String, String>,
}

impl StaticCategoryDirectory {
    pub fn new(by_id: BTreeMap<String, String>) -> Self {
        Self { by_id }
    }

    /// Use the `[categories]` section of a rule table.
    pub fn from_rule_table(table: &RuleTable) -> Self {
        Self::new(table.categories.clone())
    }
}

impl CategoryDirectory for StaticCategoryDirectory {
    fn name_of(&self, category_id: &str) -> Option<&str> {
        self.by_id.get(category_id).map(String::as_str)
    }

    fn id_of(&self, name: &str) -> Option<&str> {
        self.by_id
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| id.as_str())
    }
}

/// Serves a fixed list of places.
///
/// Places with coordinates are filtered by radius; places with only an
/// address are passed through for the caller to geocode.
#[derive(Debug, Clone, Default)]
pub struct StaticPlacesProvider {
    places: Vec<Place>,
}

impl StaticPlacesProvider {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Parse a JSON array of places.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[async_trait]
impl PlacesProvider for StaticPlacesProvider {
    fn name(&self) -> &'static str {
        "static-places"
    }

    async fn nearby(&self, query: &PlacesQuery) -> Result<Vec<Place>, ProviderError> {
        let radius_km = query.radius_m as f64 / 1000.0;
        Ok(self
            .places
            .iter()
            .filter(|place| query.categories.contains(&place.category_id))
            .filter(|place| match place.location {
                Some(location) => query.origin.distance_km(&location) <= radius_km,
                None => place.address.is_some(),
            })
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn place(category_id: &str, lat: f64, lon: f64) -> Place {
        Place {
            name: None,
            category_id: category_id.to_string(),
            location: Some(Point::new(lat, lon)),
            address: None,
        }
    }

    fn query(categories: &[&str], radius_m: u32, limit: usize) -> PlacesQuery {
        PlacesQuery {
            origin: Point::new(52.0, 4.0),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            radius_m,
            limit,
        }
    }

    #[tokio::test]
    async fn filters_by_category_and_radius() {
        let provider = StaticPlacesProvider::new(vec![
            place("cafe", 52.001, 4.0),
            place("cafe", 52.1, 4.0),
            place("park", 52.001, 4.0),
        ]);
        let found = provider.nearby(&query(&["cafe"], 2000, 10)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location, Some(Point::new(52.001, 4.0)));
    }

    #[tokio::test]
    async fn respects_limit() {
        let provider = StaticPlacesProvider::new(vec![place("cafe", 52.0, 4.0); 5]);
        let found = provider.nearby(&query(&["cafe"], 2000, 3)).await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn address_only_places_pass_through() {
        let provider = StaticPlacesProvider::new(vec![Place {
            name: Some("Market".into()),
            category_id: "cafe".into(),
            location: None,
            address: Some("Markt 69, Delft".into()),
        }]);
        let found = provider.nearby(&query(&["cafe"], 10, 10)).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn directory_looks_up_both_ways() {
        let directory = StaticCategoryDirectory::from_rule_table(&RuleTable::builtin());
        assert_eq!(directory.name_of("nightclub"), Some("Clubs"));
        assert_eq!(directory.id_of("Parks"), Some("park"));
        assert_eq!(directory.name_of("casino"), None);
    }

    #[test]
    fn parses_places_json() {
        let provider = StaticPlacesProvider::from_json(
            r#"[{"category_id": "cafe", "location": {"lat": 52.0, "lon": 4.0}},
                {"category_id": "park", "address": "Markt 1, Delft"}]"#,
        )
        .unwrap();
        assert_eq!(provider.len(), 2);
    }
}

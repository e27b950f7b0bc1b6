//! Overpass (OpenStreetMap) HTTP adapter for nearby places.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ExploreError;
use crate::estimate::RandomEstimator;
use crate::haversine::distance_km;
use crate::place::{Category, Coordinate, Place, PlaceId, Tags};
use crate::traits::{PlaceEstimator, PlaceSource};

/// Default search radius around the user.
pub const DEFAULT_RADIUS_METERS: u32 = 2000;

/// Name given to records with neither `name` nor `brand`.
pub const UNNAMED_PLACE: &str = "Unnamed Place";

/// What to do when the Overpass request or its decoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    /// Log and report zero places.
    #[default]
    ReturnEmpty,
    /// Return `ExploreError::FetchFailed`.
    Propagate,
}

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub radius_meters: u32,
    pub failure_policy: FetchFailurePolicy,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 30,
            radius_meters: DEFAULT_RADIUS_METERS,
            failure_policy: FetchFailurePolicy::ReturnEmpty,
        }
    }
}

#[derive(Debug)]
pub struct OverpassClient<E = RandomEstimator> {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
    estimator: E,
}

impl OverpassClient<RandomEstimator> {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        Self::with_estimator(config, RandomEstimator::default())
    }
}

impl<E: PlaceEstimator> OverpassClient<E> {
    pub fn with_estimator(config: OverpassConfig, estimator: E) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            estimator,
        })
    }

    pub fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// Fetch with the configured radius.
    pub fn fetch_default_radius(&self, center: Coordinate) -> Result<Vec<Place>, ExploreError> {
        self.fetch_nearby(center, self.config.radius_meters)
    }

    fn request_elements(&self, query: String) -> Result<Vec<OverpassElement>, reqwest::Error> {
        let body = self
            .client
            .post(&self.config.endpoint)
            .body(query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OverpassResponse>())?;
        Ok(body.elements)
    }
}

impl<E: PlaceEstimator> PlaceSource for OverpassClient<E> {
    fn fetch_nearby(&self, center: Coordinate, radius_meters: u32) -> Result<Vec<Place>, ExploreError> {
        let query = overpass_query(center, radius_meters);

        match self.request_elements(query) {
            Ok(elements) => {
                let raw_count = elements.len();
                let places = normalize_elements(elements, center, &self.estimator);
                info!(raw_count, kept = places.len(), %center, "fetched nearby places");
                Ok(places)
            }
            Err(err) => match self.config.failure_policy {
                FetchFailurePolicy::ReturnEmpty => {
                    warn!(error = %err, %center, "place fetch failed, returning no places");
                    Ok(Vec::new())
                }
                FetchFailurePolicy::Propagate => Err(ExploreError::FetchFailed(err)),
            },
        }
    }
}

/// Build the Overpass QL query for all supported categories around `center`.
pub fn overpass_query(center: Coordinate, radius_meters: u32) -> String {
    let around = format!("(around:{},{},{})", radius_meters, center.lat, center.lng);
    format!(
        "[out:json][timeout:25];\n\
         (\n\
         node[\"amenity\"~\"restaurant|cafe|fast_food|pharmacy|bank|atm\"]{around};\n\
         node[\"shop\"~\"supermarket|convenience|bakery|clothes|hairdresser\"]{around};\n\
         node[\"leisure\"~\"fitness_centre\"]{around};\n\
         node[\"tourism\"~\"hotel|hostel\"]{around};\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;\n"
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// One element of an Overpass JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
}

/// Tag predicate paired with the category it selects.
struct CategoryRule {
    key: &'static str,
    values: &'static [&'static str],
    category: Category,
}

/// Ordered rules; the first match wins because a record can carry several
/// matching tags at once.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule { key: "amenity", values: &["cafe"], category: Category::Cafe },
    CategoryRule { key: "amenity", values: &["restaurant", "fast_food"], category: Category::Food },
    CategoryRule { key: "shop", values: &["bakery"], category: Category::Bakery },
    CategoryRule { key: "amenity", values: &["pharmacy"], category: Category::Pharmacy },
    CategoryRule { key: "leisure", values: &["fitness_centre"], category: Category::Gym },
    CategoryRule { key: "shop", values: &["books"], category: Category::Bookstore },
    CategoryRule { key: "tourism", values: &["hotel", "hostel"], category: Category::Stays },
    CategoryRule { key: "shop", values: &["convenience", "supermarket"], category: Category::Essentials },
    CategoryRule { key: "shop", values: &["hairdresser", "beauty"], category: Category::Beauty },
];

/// Map OSM tags to a category.
pub fn classify(tags: &Tags) -> Category {
    let matched = CATEGORY_RULES.iter().find(|rule| {
        tags.get(rule.key)
            .is_some_and(|value| rule.values.contains(&value.as_str()))
    });

    match matched {
        Some(rule) => rule.category,
        None if tags.contains_key("shop") => Category::Shopping,
        None => Category::Services,
    }
}

/// Display name from `name`, falling back to `brand`. `None` when neither is usable.
pub fn display_name(tags: &Tags) -> Option<String> {
    let name = ["name", "brand"]
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())?;

    if name == UNNAMED_PLACE {
        return None;
    }
    Some(name.to_string())
}

/// Turn raw Overpass elements into places, preserving response order.
pub fn normalize_elements<E>(elements: Vec<OverpassElement>, center: Coordinate, estimator: &E) -> Vec<Place>
where
    E: PlaceEstimator + ?Sized,
{
    elements
        .into_iter()
        .filter_map(|element| normalize_element(element, center, estimator))
        .collect()
}

fn normalize_element<E>(element: OverpassElement, center: Coordinate, estimator: &E) -> Option<Place>
where
    E: PlaceEstimator + ?Sized,
{
    let (Some(lat), Some(lng)) = (element.lat, element.lon) else {
        debug!(id = element.id, "discarding element without coordinates");
        return None;
    };
    let Some(name) = display_name(&element.tags) else {
        debug!(id = element.id, "discarding unnamed element");
        return None;
    };

    let category = classify(&element.tags);
    let estimate = estimator.estimate(&element.tags);
    let position = Coordinate::new_unchecked(lat, lng);

    Some(Place {
        id: PlaceId(element.id),
        name,
        category,
        lat,
        lng,
        price_range: estimate.price_range,
        rating: estimate.rating,
        distance_km: distance_km(center, position),
        tags: element.tags,
    })
}

//! Seams between the explorer and the outside world.
//!
//! The explorer only talks to these traits, so each data source, estimator,
//! location backend, and router can be swapped or mocked independently.

use crate::error::ExploreError;
use crate::place::{Coordinate, Place, PriceRange, Rating, Tags};
use crate::routing::{DirectionsRequest, Route};

/// Fetches normalized places around a coordinate.
///
/// Implementations attach `distance_km` relative to `center` on every record.
pub trait PlaceSource {
    fn fetch_nearby(&self, center: Coordinate, radius_meters: u32) -> Result<Vec<Place>, ExploreError>;
}

/// Placeholder price and rating for a raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceEstimate {
    pub price_range: PriceRange,
    pub rating: Rating,
}

/// Supplies price and rating for records that lack them.
///
/// Upstream map data has neither, so every estimate is synthetic until a
/// real pricing source implements this trait.
pub trait PlaceEstimator {
    fn estimate(&self, tags: &Tags) -> PlaceEstimate;
}

/// Single-shot position lookup.
pub trait LocationProvider {
    /// Returns `LocationUnavailable` when unsupported or denied.
    fn current_position(&self) -> Result<Coordinate, ExploreError>;
}

/// Computes a route for a directions request.
pub trait RouteProvider {
    fn route(&self, request: &DirectionsRequest) -> Result<Route, ExploreError>;
}

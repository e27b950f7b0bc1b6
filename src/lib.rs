//! nearo core
//!
//! Nearby place discovery: fetch points of interest around a coordinate,
//! normalize them, filter and sort them for display, and keep the state a
//! list/map front end renders from.

pub mod error;
pub mod place;
pub mod traits;
pub mod haversine;
pub mod estimate;
pub mod overpass;
pub mod synthetic;
pub mod select;
pub mod location;
pub mod polyline;
pub mod routing;
pub mod osrm;
pub mod map;
pub mod explorer;

pub use error::ExploreError;
pub use explorer::{Explorer, ExplorerConfig, FetchOutcome, FetchTicket, PlacesStatus};
pub use place::{Category, Coordinate, Place, PlaceId, PriceRange, Rating};
pub use select::{CategoryFilter, Criteria, SortKey, select_places};

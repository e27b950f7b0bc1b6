//! Error type shared by every module in the crate.

use thiserror::Error;

use crate::place::PlaceId;

#[derive(Debug, Error)]
pub enum ExploreError {
    /// Geolocation is unsupported or was denied.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Network or decode failure talking to the map-data service.
    #[error("place fetch failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    #[error("malformed price range \"{0}\"")]
    MalformedPriceData(String),

    #[error("route unavailable: {0}")]
    RouteUnavailable(String),

    #[error("unknown place id {0}")]
    UnknownPlace(PlaceId),

    /// The fetch ticket was superseded or the explorer shut down.
    #[error("fetch cancelled")]
    Cancelled,
}

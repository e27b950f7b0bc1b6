//! Directions between the user and a place.
//!
//! [`OsrmRouter`](crate::osrm::OsrmRouter) follows roads; [`StraightLineRouter`]
//! is the fallback when no routing service is reachable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ExploreError;
use crate::haversine::{distance_km, km_to_seconds};
use crate::place::Coordinate;
use crate::polyline::Polyline;
use crate::traits::RouteProvider;

/// Average travel speed assumed by the straight-line router.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Start and end of a requested route. Replaced wholesale by the next request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// One turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub distance_km: f64,
    pub duration_secs: f64,
    pub geometry: Polyline,
    pub steps: Vec<RouteStep>,
}

/// Great-circle route at an assumed speed. Ignores roads but never fails.
#[derive(Debug, Clone)]
pub struct StraightLineRouter {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }
}

impl RouteProvider for StraightLineRouter {
    fn route(&self, request: &DirectionsRequest) -> Result<Route, ExploreError> {
        let km = distance_km(request.start, request.end);
        let duration_secs = f64::from(km_to_seconds(km, self.speed_kmh));

        Ok(Route {
            distance_km: km,
            duration_secs,
            geometry: Polyline::new(vec![request.start, request.end]),
            steps: vec![RouteStep {
                instruction: "Head straight to destination".to_string(),
                distance_m: km * 1000.0,
                duration_secs,
            }],
        })
    }
}

/// Try `primary`, fall back to `fallback` when it fails.
#[derive(Debug, Clone)]
pub struct FallbackRouter<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackRouter<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: RouteProvider, F: RouteProvider> RouteProvider for FallbackRouter<P, F> {
    fn route(&self, request: &DirectionsRequest) -> Result<Route, ExploreError> {
        match self.primary.route(request) {
            Ok(route) => Ok(route),
            Err(err) => {
                warn!(error = %err, "primary router failed, using fallback");
                self.fallback.route(request)
            }
        }
    }
}

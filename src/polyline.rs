//! Route geometry as a sequence of coordinates.
//!
//! OSRM returns GeoJSON `[lng, lat]` pairs; they are flipped into
//! [`Coordinate`]s at the boundary so the rest of the crate never sees
//! lng-first ordering.

use serde::{Deserialize, Serialize};

use crate::haversine::distance_km;
use crate::place::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Build from GeoJSON `[lng, lat]` positions.
    pub fn from_geojson(positions: &[[f64; 2]]) -> Self {
        let points = positions
            .iter()
            .map(|[lng, lat]| Coordinate::new_unchecked(*lat, *lng))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Sum of great-circle segment lengths.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]))
            .sum()
    }

    /// South-west and north-east corners, for fitting the map to a route.
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let first = *self.points.first()?;
        let (south_west, north_east) = self.points.iter().fold((first, first), |(sw, ne), p| {
            (
                Coordinate::new_unchecked(sw.lat.min(p.lat), sw.lng.min(p.lng)),
                Coordinate::new_unchecked(ne.lat.max(p.lat), ne.lng.max(p.lng)),
            )
        });
        Some((south_west, north_east))
    }
}

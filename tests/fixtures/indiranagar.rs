//! Sample points of interest around Indiranagar, Bangalore.
//!
//! Coordinates are approximate; names and tags mirror what Overpass returns
//! for the neighbourhood.

#![allow(dead_code)]

use serde_json::{Value, json};

use nearo::place::Tags;
use nearo::{Category, Coordinate, Place, PlaceId, PriceRange, Rating};

/// 100 Feet Road, the default fallback center.
pub const CENTER: Coordinate = Coordinate::new_unchecked(12.9716, 77.5946);

/// Indiranagar metro station.
pub const INDIRANAGAR: Coordinate = Coordinate::new_unchecked(12.9784, 77.6408);

/// A raw Overpass element with the given tags.
pub fn element(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> Value {
    let tags: serde_json::Map<String, Value> = tags
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    json!({ "type": "node", "id": id, "lat": lat, "lon": lon, "tags": tags })
}

/// A realistic Overpass response: named places, an unnamed node, and the
/// tagless skeleton nodes that `out skel qt` appends.
pub fn overpass_response() -> Value {
    json!({
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            element(1001, 12.9719, 77.6412, &[("amenity", "cafe"), ("name", "Third Wave Coffee")]),
            element(1002, 12.9792, 77.6408, &[("amenity", "restaurant"), ("name", "Toit")]),
            element(1003, 12.9700, 77.6389, &[("shop", "bakery"), ("amenity", "cafe"), ("name", "Glen's Bakehouse")]),
            element(1004, 12.9781, 77.6392, &[("amenity", "pharmacy"), ("brand", "Apollo Pharmacy")]),
            element(1005, 12.9765, 77.6385, &[("amenity", "atm")]),
            element(1006, 12.9755, 77.6430, &[("shop", "kiosk"), ("name", "Nandini Milk Parlour")]),
            element(1007, 12.9742, 77.6401, &[("tourism", "hostel"), ("name", "Zostel")]),
            element(1008, 12.9730, 77.6420, &[("name", "Unnamed Place"), ("shop", "clothes")]),
            { "type": "node", "id": 1009, "lat": 12.9711, "lon": 77.6399 }
        ]
    })
}

/// A normalized place with explicit display fields.
pub fn place(id: i64, category: Category, price: &str, rating: f64, distance_km: f64) -> Place {
    Place {
        id: PlaceId(id),
        name: format!("Place {id}"),
        category,
        lat: CENTER.lat,
        lng: CENTER.lng,
        price_range: PriceRange::new(price),
        rating: Rating::new(rating),
        distance_km,
        tags: Tags::new(),
    }
}

/// A place at a real position; distance is left for the explorer to fill in.
pub fn place_at(id: i64, coordinate: Coordinate) -> Place {
    Place {
        id: PlaceId(id),
        name: format!("Place {id}"),
        category: Category::Food,
        lat: coordinate.lat,
        lng: coordinate.lng,
        price_range: PriceRange::new("₹100 - ₹300"),
        rating: Rating::new(4.0),
        distance_km: f64::NAN,
        tags: Tags::new(),
    }
}

pub fn ids(places: &[Place]) -> Vec<i64> {
    places.iter().map(|p| p.id.0).collect()
}

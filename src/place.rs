//! Place records and the value types they are built from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExploreError;
use crate::haversine::{distance_km, round_km};

/// Free-form OpenStreetMap tag mapping.
pub type Tags = BTreeMap<String, String>;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Validated constructor. Rejects non-finite values and anything outside
    /// lat [-90, 90], lng [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, ExploreError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        if lat_ok && lng_ok {
            Ok(Self { lat, lng })
        } else {
            Err(ExploreError::InvalidCoordinate { lat, lng })
        }
    }

    /// Constructor for constants and values already known to be in range.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.lat, self.lng)
    }
}

/// Identifier of a place within one fetch batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub i64);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Business category shown in the category tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Cafe,
    Bakery,
    Services,
    Beauty,
    Gym,
    Shopping,
    Bookstore,
    Stays,
    Essentials,
    Pharmacy,
    /// Catch-all for labels outside the known set. Tag classification
    /// never yields it.
    Other,
}

impl Category {
    /// Real categories in tab order.
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Cafe,
        Category::Bakery,
        Category::Services,
        Category::Beauty,
        Category::Gym,
        Category::Shopping,
        Category::Bookstore,
        Category::Stays,
        Category::Essentials,
        Category::Pharmacy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Cafe => "Cafe",
            Category::Bakery => "Bakery",
            Category::Services => "Services",
            Category::Beauty => "Beauty",
            Category::Gym => "Gym",
            Category::Shopping => "Shopping",
            Category::Bookstore => "Bookstore",
            Category::Stays => "Stays",
            Category::Essentials => "Essentials",
            Category::Pharmacy => "Pharmacy",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()));
        Ok(found.unwrap_or(Category::Other))
    }
}

/// Parsed numeric bounds of a [`PriceRange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub low: f64,
    pub high: f64,
}

impl PriceBounds {
    pub fn average(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Textual low-high price pair in a single currency, e.g. `"₹100 - ₹500"`.
///
/// Source data carries no pricing, so these strings are produced by a
/// [`PlaceEstimator`](crate::traits::PlaceEstimator) and are placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRange(String);

impl PriceRange {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Format a range with a currency symbol in front of both bounds.
    pub fn from_bounds(currency: &str, low: u32, high: u32) -> Self {
        Self(format!("{currency}{low} - {currency}{high}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse both bounds. Currency symbols and other decorations are ignored.
    pub fn bounds(&self) -> Result<PriceBounds, ExploreError> {
        let malformed = || ExploreError::MalformedPriceData(self.0.clone());
        let (low, high) = self.0.split_once('-').ok_or_else(malformed)?;
        let low = parse_amount(low).ok_or_else(malformed)?;
        let high = parse_amount(high).ok_or_else(malformed)?;
        Ok(PriceBounds { low, high })
    }

    /// Arithmetic mean of the bounds, `None` when malformed.
    pub fn average(&self) -> Option<f64> {
        self.bounds().ok().map(|bounds| bounds.average())
    }

    /// Lower bound, `None` when malformed.
    pub fn lower(&self) -> Option<f64> {
        self.bounds().ok().map(|bounds| bounds.low)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First number in `text`: a run of digits, optionally followed by `.` and
/// more digits. Dots elsewhere (as in `"Rs. 100"`) are not part of it.
fn parse_amount(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let number = &text[start..];
    let whole = digit_run(number);

    let end = match number[whole..].strip_prefix('.') {
        Some(fraction) if digit_run(fraction) > 0 => whole + 1 + digit_run(fraction),
        _ => whole,
    };
    number[..end].parse::<f64>().ok()
}

fn digit_run(text: &str) -> usize {
    text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len())
}

/// Star rating in [3.0, 5.0], one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 3.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Self {
        let value = if value.is_finite() { value } else { Self::MIN };
        Self((value.clamp(Self::MIN, Self::MAX) * 10.0).round() / 10.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Ratings shown with a "Top" badge.
    pub fn is_top(&self) -> bool {
        self.0 >= 4.5
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// A normalized point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub price_range: PriceRange,
    pub rating: Rating,
    /// Kilometers from the coordinate last given to [`Place::update_distance`].
    pub distance_km: f64,
    #[serde(default)]
    pub tags: Tags,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat, self.lng)
    }

    /// Recompute `distance_km` against a new origin.
    pub fn update_distance(&mut self, origin: Coordinate) {
        self.distance_km = distance_km(origin, self.coordinate());
    }

    /// Distance for display, e.g. `"1.2 km"`.
    pub fn distance_label(&self) -> String {
        format!("{:.1} km", round_km(self.distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(12.97, 77.59).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(ExploreError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn price_bounds_ignore_currency() {
        let range = PriceRange::new("₹100 - ₹500");
        assert_eq!(range.bounds().unwrap(), PriceBounds { low: 100.0, high: 500.0 });
        assert_eq!(range.average(), Some(300.0));
        assert_eq!(range.lower(), Some(100.0));
    }

    #[test]
    fn price_bounds_plain_numbers() {
        assert_eq!(PriceRange::new("100 - 500").average(), Some(300.0));
        assert_eq!(PriceRange::from_bounds("$", 20, 40).as_str(), "$20 - $40");
    }

    #[test]
    fn price_bounds_skip_stray_dots() {
        let range = PriceRange::new("Rs. 100 - Rs. 500");
        assert_eq!(range.bounds().unwrap(), PriceBounds { low: 100.0, high: 500.0 });
        assert_eq!(range.average(), Some(300.0));

        let range = PriceRange::new("₹99.50 - ₹120.");
        assert_eq!(range.bounds().unwrap(), PriceBounds { low: 99.5, high: 120.0 });
    }

    #[test]
    fn malformed_price_is_an_error() {
        for text in ["", "cheap", "₹100", "₹ - ₹500", "100 - ?", "Rs. - Rs. 500", ". - ."] {
            let range = PriceRange::new(text);
            assert!(
                matches!(range.bounds(), Err(ExploreError::MalformedPriceData(_))),
                "{text:?} should be malformed"
            );
            assert_eq!(range.average(), None);
        }
    }

    #[test]
    fn rating_is_clamped_and_rounded() {
        assert_eq!(Rating::new(4.26).value(), 4.3);
        assert_eq!(Rating::new(1.0).value(), 3.0);
        assert_eq!(Rating::new(7.0).value(), 5.0);
        assert_eq!(Rating::new(f64::NAN).value(), 3.0);
        assert_eq!(Rating::new(4.0).to_string(), "4.0");
        assert!(Rating::new(4.5).is_top());
    }

    #[test]
    fn category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!("Nightlife".parse::<Category>().unwrap(), Category::Other);
    }

    #[test]
    fn place_serializes_camel_case() {
        let place = Place {
            id: PlaceId(7),
            name: "Chai Point".into(),
            category: Category::Cafe,
            lat: 12.97,
            lng: 77.64,
            price_range: PriceRange::new("₹100 - ₹300"),
            rating: Rating::new(4.2),
            distance_km: 1.234,
            tags: Tags::new(),
        };
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["priceRange"], "₹100 - ₹300");
        assert_eq!(json["category"], "Cafe");
        assert_eq!(json["distanceKm"], 1.234);
        assert_eq!(place.distance_label(), "1.2 km");
    }
}
